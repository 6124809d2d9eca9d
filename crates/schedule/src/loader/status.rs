//! Per-file load outcomes.

use std::path::PathBuf;

use serde::Serialize;

/// Outcome of loading a single schedule file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadResult {
    /// Path to the file that was considered.
    pub path: PathBuf,
    /// Status of the load attempt.
    pub status: LoadStatus,
}

/// Status of a single file load attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadStatus {
    /// Definition parsed and resolved.
    Loaded { id: String, final_cron: String },
    /// File was skipped (dotfile, non-YAML).
    Skipped { reason: String },
    /// Read, parse, validation or calculation error.
    Failed { error: String },
}

impl LoadStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadStatus::Loaded { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadStatus::Failed { .. })
    }
}
