use thiserror::Error;

use crate::field::Position;

/// Malformed cron input, raised when an expression is parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected 5 fields (minute hour day-of-month month day-of-week), got {0}")]
    FieldCount(usize),

    #[error("unsupported cron syntax '{0}'")]
    Unsupported(String),

    #[error("invalid {position} field '{token}'")]
    InvalidToken { position: Position, token: String },

    #[error("{position} value {value} is out of range {min}-{max}")]
    OutOfRange {
        position: Position,
        value: u32,
        min: u8,
        max: u8,
    },

    #[error("{position} range {lo}-{hi} is inverted")]
    InvertedRange { position: Position, lo: u8, hi: u8 },

    #[error("{position} step must be at least 1")]
    ZeroStride { position: Position },

    #[error("empty list element in {position} field '{token}'")]
    EmptyListElement { position: Position, token: String },
}

/// Why a shift cannot be written as a single cron expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShiftError {
    /// Members of the field wrap a different number of times.
    #[error("{position} values wrap unevenly when shifted by {delta}")]
    NonUniformCarry { position: Position, delta: i64 },

    /// The upstream field is a wildcard whose members carry differently, and
    /// this field is restricted so it cannot absorb the difference.
    #[error("{position} field is restricted but receives an uneven carry from a wildcard")]
    SpreadCarry { position: Position },

    #[error("shift carries {carry} year(s) while month or day fields are restricted")]
    YearCarry { carry: i64 },
}

/// Terminal error held by [`CronMath`](crate::CronMath).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CronMathError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Non-representable shift of {offset_minutes} minutes: {reason}")]
    NonRepresentable {
        offset_minutes: i64,
        reason: ShiftError,
    },

    #[error("Offset overflow: accumulated offset does not fit in 64-bit minutes")]
    OffsetOverflow,
}

impl CronMathError {
    pub fn is_parse(&self) -> bool {
        matches!(self, CronMathError::Parse(_))
    }

    pub fn is_non_representable(&self) -> bool {
        matches!(self, CronMathError::NonRepresentable { .. })
    }
}
