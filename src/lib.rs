// Line buffer module
pub mod buffer;

// File operations module
pub mod file;

// Unused-binding removal module
pub mod remove;

// Wrapper stripping module
pub mod strip;

// Lint reporter module
pub mod report;

// JSON output module
pub mod json;

// Source kind detection module
pub mod language;

// Re-exports
pub use buffer::LineBuffer;
pub use file::{FileContent, FileError, checksum_of, read_file, write_file};
pub use remove::{
    Finding, LineAction, RemoveOutcome, RemovePattern, remove_bindings, sort_findings_descending,
};
pub use strip::{StripOptions, strip_wrapper};
pub use report::{
    CommandReporter, FileFindings, FindingMap, FindingsFile, LintReporter, ReportFormat,
    ReporterError, TextReport, parse_lint_output, read_report,
};
pub use json::{FileOutcomeJson, RunReport, generate_execution_id};
pub use language::{SourceKind, detect_source_kind};
