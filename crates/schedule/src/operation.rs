//! String-tagged operations: `{ type, value, unit }`.
//!
//! Tags are kept as plain strings so that definitions deserialize even when
//! a tag is wrong; the tag is checked when the operation is applied, which
//! yields [`ScheduleError::InvalidUnit`] / [`ScheduleError::InvalidOperation`].

use std::fmt;
use std::str::FromStr;

use cronmath_core::{CronMath, Duration};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Result, ScheduleError};

// ── Tags ────────────────────────────────────────────────────────────

/// Time unit of an operation value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Minutes,
    Hours,
}

impl Unit {
    pub fn duration(self, value: i64) -> Duration {
        match self {
            Unit::Minutes => Duration::Minutes(value),
            Unit::Hours => Duration::Hours(value),
        }
    }
}

impl FromStr for Unit {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "minutes" | "minute" | "min" | "m" => Ok(Unit::Minutes),
            "hours" | "hour" | "hr" | "h" => Ok(Unit::Hours),
            other => Err(ScheduleError::InvalidUnit(other.to_string())),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Minutes => write!(f, "minutes"),
            Unit::Hours => write!(f, "hours"),
        }
    }
}

/// Direction of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Add,
    Sub,
}

impl FromStr for OperationKind {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "add" => Ok(OperationKind::Add),
            "sub" => Ok(OperationKind::Sub),
            other => Err(ScheduleError::InvalidOperation(other.to_string())),
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Add => write!(f, "add"),
            OperationKind::Sub => write!(f, "sub"),
        }
    }
}

// ── Operation ───────────────────────────────────────────────────────

/// One time adjustment as written in a definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Operation {
    /// `add` or `sub`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Signed amount in `unit`s.
    pub value: i64,
    /// `minutes|minute|min|m` or `hours|hour|hr|h`.
    pub unit: String,
}

impl Operation {
    pub fn new(kind: OperationKind, value: i64, unit: Unit) -> Self {
        Self {
            kind: kind.to_string(),
            value,
            unit: unit.to_string(),
        }
    }

    pub fn from_duration(kind: OperationKind, duration: Duration) -> Self {
        match duration {
            Duration::Minutes(v) => Self::new(kind, v, Unit::Minutes),
            Duration::Hours(v) => Self::new(kind, v, Unit::Hours),
        }
    }

    pub fn kind(&self) -> Result<OperationKind> {
        self.kind.parse()
    }

    pub fn duration(&self) -> Result<Duration> {
        Ok(self.unit.parse::<Unit>()?.duration(self.value))
    }

    /// Apply this operation to `cm`. The unit is checked before the type.
    pub fn apply(&self, cm: CronMath) -> Result<CronMath> {
        let duration = self.duration()?;
        Ok(match self.kind()? {
            OperationKind::Add => cm.add(duration),
            OperationKind::Sub => cm.sub(duration),
        })
    }
}

impl FromStr for Operation {
    type Err = ScheduleError;

    /// Parse `type:value:unit`, e.g. `add:30:minutes`.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.splitn(3, ':').collect();
        let [kind, value, unit] = parts.as_slice() else {
            return Err(ScheduleError::Validation(format!(
                "operation must look like 'add:30:minutes', got '{s}'"
            )));
        };
        let value = value.trim().parse::<i64>().map_err(|e| {
            ScheduleError::Validation(format!("invalid operation value '{value}': {e}"))
        })?;
        let op = Operation {
            kind: kind.trim().to_string(),
            value,
            unit: unit.trim().to_string(),
        };
        // Surface bad tags at parse time rather than at apply time.
        op.kind()?;
        op.duration()?;
        Ok(op)
    }
}

/// Apply `operations` in order, tracing each one.
///
/// The first operation with a bad tag aborts with its error.
pub fn apply_all(mut cm: CronMath, operations: &[Operation]) -> Result<CronMath> {
    for (index, op) in operations.iter().enumerate() {
        trace!(index, op_type = %op.kind, value = op.value, unit = %op.unit, "applying operation");
        cm = op.apply(cm)?;
    }
    Ok(cm)
}

/// Parse a compact duration such as `30m`, `-2h` or `90min`.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();
    let split = s
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || (*i == 0 && (*c == '-' || *c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    let (value, unit) = s.split_at(split);

    let value = value.parse::<i64>().map_err(|e| {
        ScheduleError::Validation(format!("invalid duration '{s}': {e}"))
    })?;
    Ok(unit.trim().parse::<Unit>()?.duration(value))
}
