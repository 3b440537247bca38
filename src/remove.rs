use crate::buffer::LineBuffer;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// An unused binding reported by the lint reporter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Line number the binding is introduced on (1-indexed)
    pub line: usize,
    /// Name of the unused binding
    pub symbol: String,
}

/// Removal patterns, in fixed priority order
///
/// Each finding is tried against the patterns in `PRIORITY` order and the
/// first pattern that produces an action wins. A finding that matches no
/// pattern is a no-op, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovePattern {
    /// Remove the symbol as a comma-delimited member of an import brace list
    BracedMember,
    /// Delete an import line that binds nothing but the symbol
    /// (default or `* as` namespace form)
    WholeLineImport,
    /// Rewrite `const [symbol, other]` keeping the second slot in position
    DestructuredFirst,
    /// Rewrite `const [other, symbol]` dropping the trailing slot
    DestructuredSecond,
}

/// What a matched pattern does to the line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineAction {
    /// Replace the line text
    Rewrite(String),
    /// Delete the whole line
    Remove,
}

impl RemovePattern {
    /// Priority order for pattern application
    pub const PRIORITY: [RemovePattern; 4] = [
        RemovePattern::BracedMember,
        RemovePattern::WholeLineImport,
        RemovePattern::DestructuredFirst,
        RemovePattern::DestructuredSecond,
    ];

    /// Try to apply this pattern to a line for the given symbol
    ///
    /// # Arguments
    /// * `line` - Current text of the line
    /// * `symbol` - The unused binding to remove
    ///
    /// # Returns
    /// * `Some(LineAction)` if the pattern matched and changes the line
    /// * `None` if the pattern does not apply
    pub fn apply(&self, line: &str, symbol: &str) -> Option<LineAction> {
        match self {
            RemovePattern::BracedMember => {
                remove_braced_member(line, symbol).map(LineAction::Rewrite)
            }
            RemovePattern::WholeLineImport => {
                matches_whole_line_import(line, symbol).then_some(LineAction::Remove)
            }
            RemovePattern::DestructuredFirst => {
                remove_destructured_first(line, symbol).map(LineAction::Rewrite)
            }
            RemovePattern::DestructuredSecond => {
                remove_destructured_second(line, symbol).map(LineAction::Rewrite)
            }
        }
    }
}

/// Remove a symbol from the brace list of a named import line
///
/// The line must have an import-with-braces shape; the symbol is removed as
/// a comma-delimited member together with one adjacent comma, leaving the
/// rest of the line byte-for-byte intact. Removing the sole member leaves an
/// empty brace list for the post-pass cleanup to delete.
fn remove_braced_member(line: &str, symbol: &str) -> Option<String> {
    let shape = Regex::new(r"^(\s*import\b[^{}]*)\{([^{}]*)\}(\s*from\b.*)$").ok()?;
    let caps = shape.captures(line)?;
    let members = caps.get(2)?.as_str();

    let sym = regex::escape(symbol);
    let with_trailing = Regex::new(&format!(r"\b{sym}\b\s*,\s*")).ok()?;
    let with_leading = Regex::new(&format!(r",\s*\b{sym}\b")).ok()?;
    let alone = Regex::new(&format!(r"\b{sym}\b")).ok()?;

    let new_members = if with_trailing.is_match(members) {
        with_trailing.replace(members, "").into_owned()
    } else if with_leading.is_match(members) {
        with_leading.replace(members, "").into_owned()
    } else if alone.is_match(members) {
        alone.replace(members, "").into_owned()
    } else {
        return None;
    };

    Some(format!("{}{{{}}}{}", &caps[1], new_members, &caps[3]))
}

/// Check whether a line is an import whose only binding is the symbol
///
/// Matches the default form (`import Foo from 'x';`) and the namespace form
/// (`import * as Foo from 'x';`), with an optional `type` keyword and an
/// optional trailing semicolon. Imports that also bind other names do not
/// match; deleting them would destroy the sibling bindings.
fn matches_whole_line_import(line: &str, symbol: &str) -> bool {
    let sym = regex::escape(symbol);
    let Ok(re) = Regex::new(&format!(
        r#"^\s*import\s+(?:type\s+)?(?:\*\s+as\s+)?{sym}\s+from\s*['"][^'"]*['"]\s*;?\s*$"#
    )) else {
        return false;
    };
    re.is_match(line)
}

/// Rewrite a two-element destructuring where the symbol occupies slot one
///
/// The surviving binding keeps its position via a placeholder comma:
/// `const [value, setValue]` becomes `const [, setValue]`.
fn remove_destructured_first(line: &str, symbol: &str) -> Option<String> {
    let sym = regex::escape(symbol);
    let re = Regex::new(&format!(r"const\s*\[\s*{sym}\s*,\s*(\w+)\s*\]")).ok()?;
    if !re.is_match(line) {
        return None;
    }
    Some(re.replace(line, "const [, ${1}]").into_owned())
}

/// Rewrite a two-element destructuring where the symbol occupies slot two
///
/// Trailing slots can be dropped without shifting the first binding:
/// `const [value, setValue]` becomes `const [value]`.
fn remove_destructured_second(line: &str, symbol: &str) -> Option<String> {
    let sym = regex::escape(symbol);
    let re = Regex::new(&format!(r"const\s*\[\s*(\w+)\s*,\s*{sym}\s*\]")).ok()?;
    if !re.is_match(line) {
        return None;
    }
    Some(re.replace(line, "const [${1}]").into_owned())
}

/// Result of removing a set of findings from one buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveOutcome {
    /// Whether the serialized buffer differs from the input text
    pub changed: bool,
    /// Number of findings that matched a pattern
    pub applied: usize,
    /// Number of findings that were no-ops (out of range or no match)
    pub skipped: usize,
}

/// Sort findings by line number in descending order for sequential application
///
/// Removals are applied from the bottom of the file upward so that each one
/// operates on a still-valid line number. Line slots are never spliced while
/// processing, but the descending order also fixes which finding goes first
/// when two findings land on the same line. Ties break on the symbol name so
/// the order is deterministic.
///
/// # Arguments
/// * `findings` - Slice of findings to sort
///
/// # Returns
/// * New Vec<Finding> sorted by line descending
///
/// # Example
/// ```
/// use import_prune::{Finding, sort_findings_descending};
/// let findings = vec![
///     Finding { line: 2, symbol: "A".to_string() },
///     Finding { line: 10, symbol: "B".to_string() },
///     Finding { line: 5, symbol: "C".to_string() },
/// ];
/// let sorted = sort_findings_descending(&findings);
/// assert_eq!(sorted[0].line, 10);
/// assert_eq!(sorted[1].line, 5);
/// assert_eq!(sorted[2].line, 2);
/// ```
pub fn sort_findings_descending(findings: &[Finding]) -> Vec<Finding> {
    let mut sorted = findings.to_vec();
    sorted.sort_by(|a, b| b.line.cmp(&a.line).then_with(|| b.symbol.cmp(&a.symbol)));
    sorted
}

/// Remove unused bindings from a line buffer
///
/// This function:
/// 1. Sorts findings by line number descending
/// 2. For each finding: tries the removal patterns in priority order and
///    applies the first action produced; non-matching findings are skipped
/// 3. Runs a single cleanup pass if anything was applied: import lines whose
///    brace list is now empty are deleted, and stray commas are collapsed on
///    lines the brace-list pattern touched
///
/// The transformation is deterministic and idempotent: re-running it with
/// the same findings against the already-mutated buffer reports
/// `changed = false`, because the symbols are gone and no pattern matches.
/// No errors are raised; every anomaly degrades to a skipped finding.
///
/// # Arguments
/// * `buffer` - The line buffer to mutate
/// * `findings` - Findings scoped to this buffer's file
///
/// # Returns
/// * `RemoveOutcome` with the changed flag and applied/skipped counts
pub fn remove_bindings(buffer: &mut LineBuffer, findings: &[Finding]) -> RemoveOutcome {
    let original = buffer.to_text();

    let sorted = sort_findings_descending(findings);

    let mut applied = 0;
    let mut skipped = 0;
    let mut braced_lines: Vec<usize> = Vec::new();

    for finding in &sorted {
        // Out of range, or deleted by an earlier finding on the same line
        let Some(line) = buffer.line(finding.line).map(str::to_string) else {
            skipped += 1;
            continue;
        };

        let hit = RemovePattern::PRIORITY.iter().find_map(|pattern| {
            pattern
                .apply(&line, &finding.symbol)
                .map(|action| (*pattern, action))
        });

        match hit {
            Some((pattern, LineAction::Rewrite(new_line))) => {
                if pattern == RemovePattern::BracedMember {
                    braced_lines.push(finding.line);
                }
                buffer.set_line(finding.line, new_line);
                applied += 1;
            }
            Some((_, LineAction::Remove)) => {
                buffer.delete_line(finding.line);
                applied += 1;
            }
            None => skipped += 1,
        }
    }

    if applied > 0 {
        cleanup(buffer, &braced_lines);
    }

    let changed = buffer.to_text() != original;
    RemoveOutcome {
        changed,
        applied,
        skipped,
    }
}

/// Post-pass cleanup after all findings are processed
///
/// Deletes import lines left with an empty brace list and collapses stray
/// leading/trailing commas inside brace lists, but only on lines the
/// brace-list pattern touched, so untouched lines are never rewritten.
fn cleanup(buffer: &mut LineBuffer, braced_lines: &[usize]) {
    let Ok(empty_import) = Regex::new(r"^\s*import\s*(?:type\s+)?\{\s*\}\s*from\b") else {
        return;
    };
    for line_number in 1..=buffer.line_count() {
        let now_empty = buffer
            .line(line_number)
            .is_some_and(|l| empty_import.is_match(l));
        if now_empty {
            buffer.delete_line(line_number);
        }
    }

    let Ok(trailing_comma) = Regex::new(r",(\s*[}\)])") else {
        return;
    };
    let Ok(leading_comma) = Regex::new(r"(\{\s*),") else {
        return;
    };
    for &line_number in braced_lines {
        let Some(line) = buffer.line(line_number).map(str::to_string) else {
            continue;
        };
        let collapsed = trailing_comma.replace_all(&line, "${1}");
        let collapsed = leading_comma.replace_all(&collapsed, "${1}").into_owned();
        if collapsed != line {
            buffer.set_line(line_number, collapsed);
        }
    }
}
