//! Error type for operations, calculations and schedule loading.

use cronmath_core::CronMathError;

/// Errors surfaced by the schedule layer.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// Unrecognised time unit tag.
    #[error("Invalid Unit: unit must be 'minutes' or 'hours', got '{0}'")]
    InvalidUnit(String),

    /// Unrecognised operation tag.
    #[error("Invalid Operation: operation type must be 'add' or 'sub', got '{0}'")]
    InvalidOperation(String),

    /// The core rejected the expression or the shift.
    #[error("Calculation Error: failed to calculate cron expression: {0}")]
    Calculation(#[from] CronMathError),

    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse/deserialization error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Definition validation error (e.g. empty name).
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result alias for schedule operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;
