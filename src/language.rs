use std::path::Path;

/// Source file kinds the tool understands
///
/// Findings land on web-frontend source files; everything else the lint
/// reporter might mention (config files, stylesheets, build output) is
/// outside the documented pattern set and gets skipped wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// JavaScript (.js, .jsx, .mjs, .cjs)
    JavaScript,
    /// TypeScript (.ts, .tsx, .mts, .cts)
    TypeScript,
    /// Unknown or unsupported file kind
    Unknown,
}

impl SourceKind {
    /// Get the file extensions associated with this kind
    pub fn extensions(&self) -> &[&str] {
        match self {
            SourceKind::JavaScript => &["js", "jsx", "mjs", "cjs"],
            SourceKind::TypeScript => &["ts", "tsx", "mts", "cts"],
            SourceKind::Unknown => &[],
        }
    }

    /// Get the kind name as a string
    pub fn name(&self) -> &str {
        match self {
            SourceKind::JavaScript => "JavaScript",
            SourceKind::TypeScript => "TypeScript",
            SourceKind::Unknown => "Unknown",
        }
    }

    /// Check if files of this kind can be processed
    pub fn is_supported(&self) -> bool {
        !matches!(self, SourceKind::Unknown)
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Detect the source kind from a file path
///
/// # Examples
/// ```
/// use import_prune::{SourceKind, detect_source_kind};
/// assert_eq!(detect_source_kind("src/pages/App.tsx"), SourceKind::TypeScript);
/// assert_eq!(detect_source_kind("legacy/widget.jsx"), SourceKind::JavaScript);
/// assert_eq!(detect_source_kind("styles/site.css"), SourceKind::Unknown);
/// ```
pub fn detect_source_kind<P: AsRef<Path>>(path: P) -> SourceKind {
    let extension = path
        .as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    match extension {
        "js" | "jsx" | "mjs" | "cjs" => SourceKind::JavaScript,
        "ts" | "tsx" | "mts" | "cts" => SourceKind::TypeScript,
        _ => SourceKind::Unknown,
    }
}
