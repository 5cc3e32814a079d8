//! Error types and load result structures for the schedule loader.

use std::path::PathBuf;

/// Errors that can occur while reading schedule files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON syntax error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML syntax error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Well-formed document whose content is not a schedule record shape.
    #[error("invalid schedule record: {0}")]
    Record(String),

    /// API envelope with `ok: false`.
    #[error("API envelope reports failure: {0}")]
    Envelope(String),
}

/// Result alias for loader operations.
pub type Result<T> = std::result::Result<T, LoadError>;

/// Outcome of loading a single file.
#[derive(Debug)]
pub struct LoadResult {
    /// Path to the file that was loaded.
    pub path: PathBuf,
    /// Status of the load attempt.
    pub status: LoadStatus,
}

/// Status of a single file load attempt.
#[derive(Debug)]
pub enum LoadStatus {
    /// File parsed; `records` schedules were read from it.
    Loaded { records: usize },
    /// File was skipped (dotfile, unsupported extension).
    Skipped { reason: String },
    /// Read or parse error.
    Failed { error: String },
}

impl LoadResult {
    pub fn is_failed(&self) -> bool {
        matches!(self.status, LoadStatus::Failed { .. })
    }
}
