//! Time-shift arithmetic over parsed expressions.
//!
//! A signed minute offset is split into whole days, hours and minutes, then
//! folded left from the minute field to the month field with an integer
//! carry threaded through. Each field is shifted modularly within its domain
//! and must wrap uniformly: if some members cross a domain boundary and
//! others do not, the shifted set cannot be paired with a single carry and
//! the shift is refused.
//!
//! Wildcard fields absorb any shift. The carry they pass on is only exact when
//! the delta is a whole number of domain turns; otherwise it is
//! [`Carry::Spread`], which a later wildcard can absorb but a restricted
//! field cannot.


use tracing::{debug, trace};

use crate::error::ShiftError;
use crate::expression::CronExpression;
use crate::field::Field;

const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;

// ── Offset decomposition ────────────────────────────────────────────

/// An offset split by floored division so `hours` and `minutes` are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decomposition {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

/// Split `offset` minutes into `(days, hours, minutes)`.
///
/// `days` carries the sign; `hours` is in `0..24` and `minutes` in `0..60`.
pub fn decompose(offset: i64) -> Decomposition {
    let days = offset.div_euclid(MINUTES_PER_DAY);
    let rest = offset.rem_euclid(MINUTES_PER_DAY);
    Decomposition {
        days,
        hours: rest.div_euclid(MINUTES_PER_HOUR),
        minutes: rest.rem_euclid(MINUTES_PER_HOUR),
    }
}

// ── Carries ─────────────────────────────────────────────────────────

/// Carry passed from one field into the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Carry {
    /// Every member wrapped the same number of times.
    Exact(i64),
    /// Members of a wildcard wrapped by differing amounts.
    Spread,
}

impl Carry {
    pub const ZERO: Carry = Carry::Exact(0);

    /// Add a whole-unit delta on top of this carry.
    pub fn plus(self, delta: i64) -> Carry {
        match self {
            Carry::Exact(c) => Carry::Exact(c + delta),
            Carry::Spread => Carry::Spread,
        }
    }

    pub fn is_zero(self) -> bool {
        self == Carry::ZERO
    }
}

// ── Field shift ─────────────────────────────────────────────────────

/// Shift one field by `delta` domain units.
///
/// Returns the shifted field, re-canonicalized, and the carry into the next
/// coarser field.
pub fn shift_field(field: &Field, delta: Carry) -> Result<(Field, Carry), ShiftError> {
    let position = field.position();
    if delta.is_zero() {
        return Ok((field.clone(), Carry::ZERO));
    }

    let size = i64::from(position.size());
    if field.is_any() {
        let carry = match delta {
            Carry::Exact(d) if d.rem_euclid(size) == 0 => Carry::Exact(d.div_euclid(size)),
            _ => Carry::Spread,
        };
        trace!(%position, ?delta, ?carry, "wildcard absorbed shift");
        return Ok((Field::any(position), carry));
    }

    let delta = match delta {
        Carry::Exact(d) => d,
        Carry::Spread => return Err(ShiftError::SpreadCarry { position }),
    };

    let min = i64::from(position.min());
    let mut carry = None;
    let mut shifted = Vec::with_capacity(field.cardinality());
    for value in field.values() {
        let offset = i64::from(value) - min + delta;
        let wraps = offset.div_euclid(size);
        match carry {
            None => carry = Some(wraps),
            Some(c) if c != wraps => {
                return Err(ShiftError::NonUniformCarry { position, delta });
            }
            Some(_) => {}
        }
        // rem_euclid lands in `0..size`, so the wrapped value is in-domain.
        shifted.push((offset.rem_euclid(size) + min) as u8);
    }
    shifted.sort_unstable();

    let carry = Carry::Exact(carry.unwrap_or(0));
    let result = Field::from_set(position, shifted, field.is_step());
    trace!(%position, delta, ?carry, field = %result, "shifted field");
    Ok((result, carry))
}

// ── Expression shift ────────────────────────────────────────────────

/// Shift every firing of `expr` by `offset` minutes.
///
/// Minutes carry into hours, hours into days. The day delta moves day-of-month
/// and day-of-week independently; day-of-month carries into months. A whole
/// year carry is only absorbed when month, day-of-month and day-of-week are
/// all wildcards.
pub fn apply(expr: &CronExpression, offset: i64) -> Result<CronExpression, ShiftError> {
    let parts = decompose(offset);
    trace!(offset, days = parts.days, hours = parts.hours, minutes = parts.minutes, "decomposed offset");

    let result = fold(expr, parts);
    match &result {
        Ok(shifted) => debug!(offset, input = %expr, output = %shifted, "expression shifted"),
        Err(reason) => debug!(offset, input = %expr, %reason, "shift refused"),
    }
    result
}

fn fold(expr: &CronExpression, parts: Decomposition) -> Result<CronExpression, ShiftError> {
    let (minute, carry) = shift_field(expr.minute(), Carry::Exact(parts.minutes))?;
    let (hour, carry) = shift_field(expr.hour(), carry.plus(parts.hours))?;

    let day_delta = carry.plus(parts.days);
    let (day_of_month, carry) = shift_field(expr.day_of_month(), day_delta)?;
    let (day_of_week, _) = shift_field(expr.day_of_week(), day_delta)?;

    let (month, year_carry) = shift_field(expr.month(), carry)?;
    if let Carry::Exact(years) = year_carry {
        let calendar_bound = [expr.month(), expr.day_of_month(), expr.day_of_week()]
            .into_iter()
            .any(|field| !field.is_any());
        if years != 0 && calendar_bound {
            return Err(ShiftError::YearCarry { carry: years });
        }
    }

    Ok(CronExpression::from_parts([minute, hour, day_of_month, month, day_of_week]))
}
