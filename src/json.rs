use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of one file in a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutcomeJson {
    /// File the outcome refers to
    pub path: String,
    /// "changed", "unchanged", "failed", or "skipped"
    pub status: String,
    /// Findings that matched a pattern in this file
    pub applied: usize,
    /// Findings that were no-ops in this file
    pub skipped: usize,
    /// Checksum of the file before processing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_checksum: Option<String>,
    /// Checksum of the replacement content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_checksum: Option<String>,
    /// Why the file failed or was skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl FileOutcomeJson {
    /// Outcome for a file whose content changed
    pub fn changed(
        path: String,
        applied: usize,
        skipped: usize,
        old_checksum: String,
        new_checksum: String,
    ) -> Self {
        Self {
            path,
            status: "changed".to_string(),
            applied,
            skipped,
            old_checksum: Some(old_checksum),
            new_checksum: Some(new_checksum),
            reason: None,
        }
    }

    /// Outcome for a file processed without any effective change
    pub fn unchanged(path: String, applied: usize, skipped: usize, checksum: String) -> Self {
        Self {
            path,
            status: "unchanged".to_string(),
            applied,
            skipped,
            old_checksum: Some(checksum),
            new_checksum: None,
            reason: None,
        }
    }

    /// Outcome for a file abandoned on a File Store failure
    pub fn failed(path: String, reason: String) -> Self {
        Self {
            path,
            status: "failed".to_string(),
            applied: 0,
            skipped: 0,
            old_checksum: None,
            new_checksum: None,
            reason: Some(reason),
        }
    }

    /// Outcome for a file whose findings were skipped wholesale
    pub fn skipped(path: String, skipped: usize, reason: String) -> Self {
        Self {
            path,
            status: "skipped".to_string(),
            applied: 0,
            skipped,
            old_checksum: None,
            new_checksum: None,
            reason: Some(reason),
        }
    }
}

/// Structured result of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique id of this run
    pub execution_id: String,
    /// Whether findings were available and processed
    pub success: bool,
    /// Whether writes were suppressed
    pub dry_run: bool,
    /// Individual file outcomes in processing order
    pub files: Vec<FileOutcomeJson>,
    /// Number of files whose content changed
    pub files_changed: usize,
    /// Total findings that matched a pattern
    pub findings_applied: usize,
    /// Total findings that were no-ops
    pub findings_skipped: usize,
    /// Error message when the run failed as a whole
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunReport {
    /// Create a successful run report from individual file outcomes
    pub fn success(execution_id: String, dry_run: bool, files: Vec<FileOutcomeJson>) -> Self {
        let files_changed = files.iter().filter(|f| f.status == "changed").count();
        let findings_applied = files.iter().map(|f| f.applied).sum();
        let findings_skipped = files.iter().map(|f| f.skipped).sum();

        Self {
            execution_id,
            success: true,
            dry_run,
            files,
            files_changed,
            findings_applied,
            findings_skipped,
            error: None,
        }
    }

    /// Create a failed run report (no file was touched)
    pub fn failure(execution_id: String, error: String) -> Self {
        Self {
            execution_id,
            success: false,
            dry_run: false,
            files: Vec::new(),
            files_changed: 0,
            findings_applied: 0,
            findings_skipped: 0,
            error: Some(error),
        }
    }
}

/// Generate a unique execution id for a run
pub fn generate_execution_id() -> String {
    Uuid::new_v4().to_string()
}
