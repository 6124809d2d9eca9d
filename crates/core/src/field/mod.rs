//! Single cron field model: positional domains, value-set variants, and
//! canonical emission.
//!
//! A [`Field`] pairs a [`Position`] (which fixes the inclusive domain) with a
//! [`FieldKind`] describing the value-set the way it was written. Set
//! semantics are always recovered through [`Field::values`]; emission goes
//! through enumeration so grammar-equivalent inputs print identically.

mod canonical;
mod parse;


use std::fmt;

use serde::{Deserialize, Serialize};

// ── Positions and domains ───────────────────────────────────────────

/// The five positions of a standard cron expression, in source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Minute,
    Hour,
    DayOfMonth,
    Month,
    DayOfWeek,
}

impl Position {
    /// All positions in source order.
    pub const ALL: [Position; 5] = [
        Position::Minute,
        Position::Hour,
        Position::DayOfMonth,
        Position::Month,
        Position::DayOfWeek,
    ];

    /// Smallest value in this position's domain.
    pub fn min(self) -> u8 {
        match self {
            Position::Minute | Position::Hour | Position::DayOfWeek => 0,
            Position::DayOfMonth | Position::Month => 1,
        }
    }

    /// Largest value in this position's domain.
    pub fn max(self) -> u8 {
        match self {
            Position::Minute => 59,
            Position::Hour => 23,
            Position::DayOfMonth => 31,
            Position::Month => 12,
            Position::DayOfWeek => 6,
        }
    }

    /// Number of values in the domain.
    pub fn size(self) -> u8 {
        self.max() - self.min() + 1
    }

    /// Whether `value` lies inside the domain.
    pub fn contains(self, value: u32) -> bool {
        value >= u32::from(self.min()) && value <= u32::from(self.max())
    }

    /// Index of this position within an expression.
    pub(crate) fn index(self) -> usize {
        match self {
            Position::Minute => 0,
            Position::Hour => 1,
            Position::DayOfMonth => 2,
            Position::Month => 3,
            Position::DayOfWeek => 4,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Minute => write!(f, "minute"),
            Position::Hour => write!(f, "hour"),
            Position::DayOfMonth => write!(f, "day-of-month"),
            Position::Month => write!(f, "month"),
            Position::DayOfWeek => write!(f, "day-of-week"),
        }
    }
}

// ── Field variants ──────────────────────────────────────────────────

/// How a field's value-set is expressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// `*`: every value in the domain.
    Any,
    /// A single bare value.
    Single(u8),
    /// Ascending, duplicate-free, non-empty list of values.
    List(Vec<u8>),
    /// Contiguous `lo-hi` subrange with `lo <= hi`.
    Range { lo: u8, hi: u8 },
    /// Progression `start, start + stride, ...` bounded by `end`.
    ///
    /// `*/k` has `start = min, end = max`; `a/k` has `end = max`;
    /// `a-b/k` keeps both bounds.
    Step { start: u8, end: u8, stride: u32 },
}

/// One positional cron field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    position: Position,
    kind: FieldKind,
}

impl Field {
    /// The full-domain field for `position`.
    pub fn any(position: Position) -> Self {
        Self {
            position,
            kind: FieldKind::Any,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Enumerate the field as an ascending, duplicate-free list of domain values.
    pub fn values(&self) -> Vec<u8> {
        let (min, max) = (self.position.min(), self.position.max());
        match &self.kind {
            FieldKind::Any => (min..=max).collect(),
            FieldKind::Single(v) => vec![*v],
            FieldKind::List(values) => values.clone(),
            FieldKind::Range { lo, hi } => (*lo..=*hi).collect(),
            FieldKind::Step { start, end, stride } => {
                let stride = usize::try_from(*stride).unwrap_or(usize::MAX);
                (*start..=*end).step_by(stride).collect()
            }
        }
    }

    /// Number of values the field matches.
    pub fn cardinality(&self) -> usize {
        self.values().len()
    }

    /// Whether the field matches its whole domain, however it was written.
    pub fn is_any(&self) -> bool {
        match self.kind {
            FieldKind::Any => true,
            _ => self.cardinality() == usize::from(self.position.size()),
        }
    }

    /// Whether two fields match the same value-set.
    pub fn same_set(&self, other: &Field) -> bool {
        self.position == other.position && self.values() == other.values()
    }
}

impl fmt::Display for Field {
    /// Writes the canonical form; see [`Field::canonical`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let canonical = self.canonical();
        canonical::render(&canonical, f)
    }
}
