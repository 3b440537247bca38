use crate::remove::Finding;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::Command;

/// Findings grouped by file, in deterministic path order
pub type FindingMap = BTreeMap<PathBuf, Vec<Finding>>;

/// Error types for reporter operations
#[derive(Debug)]
pub enum ReporterError {
    /// The lint command could not be spawned or captured
    Spawn { program: String, error: String },
    /// The lint command produced non-UTF-8 output
    NonUtf8Output,
    /// A structured findings report did not parse
    Parse(String),
    /// I/O error reading a report
    Io(String),
}

impl std::fmt::Display for ReporterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReporterError::Spawn { program, error } => {
                write!(f, "Failed to run lint command '{}': {}", program, error)
            }
            ReporterError::NonUtf8Output => write!(f, "Lint output is not valid UTF-8"),
            ReporterError::Parse(e) => write!(f, "Unparseable findings report: {}", e),
            ReporterError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ReporterError {}

impl From<io::Error> for ReporterError {
    fn from(err: io::Error) -> Self {
        ReporterError::Io(err.to_string())
    }
}

/// A source of findings
///
/// Any concrete way of obtaining findings (parsing captured lint output,
/// spawning the lint tool, reading a structured file) is an adapter behind
/// this trait. A reporter failure means "no findings available" to the
/// caller; it never means partial findings.
pub trait LintReporter {
    /// Collect findings grouped by file
    fn collect(&self) -> Result<FindingMap, ReporterError>;
}

/// Messages the linter attaches to unused bindings
const UNUSED_MARKERS: [&str; 2] = [
    "is defined but never used",
    "is assigned a value but never used",
];

/// Parse textual lint output into findings
///
/// Scans for lines shaped like
/// `path:line:col  error  'symbol' is defined but never used` and collects
/// one finding per match. Lines that do not carry an unused-binding message,
/// and lines that do but do not parse, are ignored.
pub fn parse_lint_output(output: &str) -> FindingMap {
    let mut map = FindingMap::new();

    let Ok(re) = Regex::new(r#"^(.+?):(\d+):(\d+)\s+error\s+['"](.+?)['"]\s+is"#) else {
        return map;
    };

    for line in output.lines() {
        if !UNUSED_MARKERS.iter().any(|marker| line.contains(marker)) {
            continue;
        }
        let Some(caps) = re.captures(line) else {
            continue;
        };
        let Ok(line_number) = caps[2].parse::<usize>() else {
            continue;
        };

        map.entry(PathBuf::from(&caps[1]))
            .or_default()
            .push(Finding {
                line: line_number,
                symbol: caps[4].to_string(),
            });
    }

    map
}

/// Format of a captured report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Raw lint output text
    Text,
    /// Structured findings JSON (see `FindingsFile`)
    Json,
}

/// A lint report already captured as text
#[derive(Debug, Clone)]
pub struct TextReport {
    /// The captured report
    pub source: String,
    /// How to interpret it
    pub format: ReportFormat,
}

impl TextReport {
    /// Wrap captured report text
    pub fn new(source: impl Into<String>, format: ReportFormat) -> Self {
        Self {
            source: source.into(),
            format,
        }
    }
}

impl LintReporter for TextReport {
    fn collect(&self) -> Result<FindingMap, ReporterError> {
        match self.format {
            ReportFormat::Text => Ok(parse_lint_output(&self.source)),
            ReportFormat::Json => FindingsFile::parse(&self.source).map(FindingsFile::into_map),
        }
    }
}

/// Structured findings report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindingsFile {
    /// Per-file finding lists
    pub files: Vec<FileFindings>,
}

/// Findings for one file in a structured report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileFindings {
    /// File the findings are scoped to
    pub path: PathBuf,
    /// Unused bindings in that file
    pub findings: Vec<Finding>,
}

impl FindingsFile {
    /// Parse a structured findings report from JSON
    pub fn parse(json: &str) -> Result<Self, ReporterError> {
        serde_json::from_str(json).map_err(|e| ReporterError::Parse(e.to_string()))
    }

    /// Group the findings by file
    pub fn into_map(self) -> FindingMap {
        let mut map = FindingMap::new();
        for file in self.files {
            map.entry(file.path).or_default().extend(file.findings);
        }
        map
    }
}

/// Reporter that spawns the lint command and parses its captured output
///
/// The lint tool's exit status is ignored: linters exit nonzero exactly when
/// they have something to report. Only failing to spawn or capture the
/// process counts as a reporter failure.
#[derive(Debug, Clone)]
pub struct CommandReporter {
    /// Program to spawn
    pub program: String,
    /// Arguments passed to the program
    pub args: Vec<String>,
    /// Working directory for the spawned process
    pub current_dir: Option<PathBuf>,
}

impl CommandReporter {
    /// Build a reporter from an argv-style command line
    ///
    /// Returns None for an empty argv.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
            current_dir: None,
        })
    }
}

impl LintReporter for CommandReporter {
    fn collect(&self) -> Result<FindingMap, ReporterError> {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }

        let output = command.output().map_err(|e| ReporterError::Spawn {
            program: self.program.clone(),
            error: e.to_string(),
        })?;

        let stdout =
            String::from_utf8(output.stdout).map_err(|_| ReporterError::NonUtf8Output)?;
        Ok(parse_lint_output(&stdout))
    }
}

/// Read a lint report from a file path or stdin and collect its findings
///
/// If `path` is Some, reads from the file at that path.
/// If `path` is None, reads from stdin.
pub fn read_report(path: Option<&str>, format: ReportFormat) -> Result<FindingMap, ReporterError> {
    let source = if let Some(p) = path {
        fs::read_to_string(p)?
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    };

    TextReport::new(source, format).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defined_but_never_used() {
        let output = "/repo/src/pages/App.tsx:10:8  error  'useState' is defined but never used  @typescript-eslint/no-unused-vars\n";
        let map = parse_lint_output(output);

        let findings = map.get(&PathBuf::from("/repo/src/pages/App.tsx")).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 10);
        assert_eq!(findings[0].symbol, "useState");
    }

    #[test]
    fn test_parse_assigned_value_never_used() {
        let output = "/repo/src/App.tsx:3:7  error  'total' is assigned a value but never used  no-unused-vars\n";
        let map = parse_lint_output(output);

        let findings = map.get(&PathBuf::from("/repo/src/App.tsx")).unwrap();
        assert_eq!(findings[0].symbol, "total");
    }

    #[test]
    fn test_parse_ignores_other_diagnostics() {
        let output = "\
/repo/src/App.tsx:5:1  error  'any' is not allowed  no-explicit-any
/repo/src/App.tsx:9:2  warning  Missing return type  explicit-function-return-type

3 problems (2 errors, 1 warning)
";
        let map = parse_lint_output(output);
        assert!(map.is_empty());
    }

    #[test]
    fn test_parse_groups_findings_per_file() {
        let output = "\
/repo/a.tsx:1:1  error  'A' is defined but never used  no-unused-vars
/repo/b.tsx:4:1  error  'B' is defined but never used  no-unused-vars
/repo/a.tsx:7:1  error  'C' is defined but never used  no-unused-vars
";
        let map = parse_lint_output(output);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&PathBuf::from("/repo/a.tsx")).unwrap().len(), 2);
        assert_eq!(map.get(&PathBuf::from("/repo/b.tsx")).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_unparseable_marker_line_is_ignored() {
        let output = "something is defined but never used somewhere\n";
        let map = parse_lint_output(output);
        assert!(map.is_empty());
    }

    #[test]
    fn test_findings_file_round_trip() {
        let json = r#"{
          "files": [
            { "path": "src/a.tsx", "findings": [ { "line": 3, "symbol": "Foo" } ] }
          ]
        }"#;

        let map = FindingsFile::parse(json).unwrap().into_map();

        let findings = map.get(&PathBuf::from("src/a.tsx")).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 3);
        assert_eq!(findings[0].symbol, "Foo");
    }

    #[test]
    fn test_findings_file_bad_json_is_parse_error() {
        let result = FindingsFile::parse("not json");
        assert!(matches!(result, Err(ReporterError::Parse(_))));
    }

    #[test]
    fn test_text_report_json_format() {
        let report = TextReport::new(
            r#"{ "files": [ { "path": "x.ts", "findings": [ { "line": 1, "symbol": "A" } ] } ] }"#,
            ReportFormat::Json,
        );

        let map = report.collect().unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_command_reporter_spawn_failure() {
        let reporter = CommandReporter {
            program: "/nonexistent/lint-tool".to_string(),
            args: vec![],
            current_dir: None,
        };

        let result = reporter.collect();
        assert!(matches!(result, Err(ReporterError::Spawn { .. })));
    }

    #[test]
    fn test_command_reporter_parses_captured_output() {
        let reporter = CommandReporter {
            program: "sh".to_string(),
            args: vec![
                "-c".to_string(),
                "echo \"/repo/a.tsx:2:1  error  'Gone' is defined but never used  no-unused-vars\""
                    .to_string(),
            ],
            current_dir: None,
        };

        let map = reporter.collect().unwrap();
        let findings = map.get(&PathBuf::from("/repo/a.tsx")).unwrap();
        assert_eq!(findings[0].symbol, "Gone");
    }

    #[test]
    fn test_from_argv() {
        let argv = vec!["npm".to_string(), "run".to_string(), "lint".to_string()];
        let reporter = CommandReporter::from_argv(&argv).unwrap();

        assert_eq!(reporter.program, "npm");
        assert_eq!(reporter.args, vec!["run", "lint"]);

        assert!(CommandReporter::from_argv(&[]).is_none());
    }
}
