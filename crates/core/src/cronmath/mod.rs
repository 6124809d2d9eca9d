//! [`CronMath`]: chainable, lazily-shifted cron expression with a sticky error.


use std::cell::OnceCell;
use std::fmt;

use tracing::trace;

use crate::duration::Duration;
use crate::error::CronMathError;
use crate::expression::CronExpression;

/// A parsed cron expression plus a pending minute offset.
///
/// `add` / `sub` only accumulate the offset; the shift is computed once,
/// against the summed offset, the first time the result is observed through
/// [`Display`](fmt::Display), [`error`](CronMath::error) or
/// [`result`](CronMath::result). Errors are sticky: after a parse error, an
/// offset overflow, or an observed non-representable shift, further
/// `add` / `sub` calls are no-ops.
///
/// Not `Sync`; one instance is meant to be driven from one place.
#[derive(Debug, Clone)]
pub struct CronMath {
    input: String,
    base: Result<CronExpression, CronMathError>,
    offset: i64,
    resolved: OnceCell<Result<CronExpression, CronMathError>>,
}

impl CronMath {
    /// Parse `input`. A parse failure is stored, not returned.
    pub fn new(input: &str) -> Self {
        let base = CronExpression::parse(input).map_err(CronMathError::from);
        if let Err(e) = &base {
            trace!(input, error = %e, "cron expression rejected");
        }
        Self {
            input: input.to_string(),
            base,
            offset: 0,
            resolved: OnceCell::new(),
        }
    }

    /// Shift later by `duration` (earlier when negative).
    pub fn add(self, duration: Duration) -> Self {
        self.accumulate(duration, i64::checked_add)
    }

    /// Shift earlier by `duration` (later when negative).
    pub fn sub(self, duration: Duration) -> Self {
        self.accumulate(duration, i64::checked_sub)
    }

    fn accumulate(mut self, duration: Duration, op: fn(i64, i64) -> Option<i64>) -> Self {
        if self.is_failed() {
            return self;
        }

        match duration.as_minutes().and_then(|m| op(self.offset, m)) {
            Some(offset) => {
                self.offset = offset;
                self.resolved = OnceCell::new();
                trace!(%duration, offset_minutes = offset, "accumulated offset");
            }
            None => {
                self.base = Err(CronMathError::OffsetOverflow);
                trace!(%duration, offset_minutes = self.offset, "offset overflow");
            }
        }
        self
    }

    /// Whether an error has already been recorded, without materializing.
    fn is_failed(&self) -> bool {
        self.base.is_err() || matches!(self.resolved.get(), Some(Err(_)))
    }

    /// The terminal error, if any. Materializes the pending shift.
    pub fn error(&self) -> Option<&CronMathError> {
        self.result().err()
    }

    /// The shifted expression or the terminal error.
    pub fn result(&self) -> Result<&CronExpression, &CronMathError> {
        let base = self.base.as_ref()?;
        self.resolved
            .get_or_init(|| {
                let shifted = base.shifted(self.offset).map_err(|reason| {
                    CronMathError::NonRepresentable {
                        offset_minutes: self.offset,
                        reason,
                    }
                });
                match &shifted {
                    Ok(expr) => trace!(input = %self.input, offset_minutes = self.offset, result = %expr, "materialized"),
                    Err(e) => trace!(input = %self.input, offset_minutes = self.offset, error = %e, "materialization failed"),
                }
                shifted
            })
            .as_ref()
    }

    /// The input the instance was created from.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Accumulated offset in minutes.
    pub fn offset_minutes(&self) -> i64 {
        self.offset
    }
}

impl fmt::Display for CronMath {
    /// The shifted expression, or an empty string in the error state.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.result() {
            Ok(expr) => write!(f, "{expr}"),
            Err(_) => Ok(()),
        }
    }
}
