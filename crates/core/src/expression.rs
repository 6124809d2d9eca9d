//! Five-field cron expression.

use std::fmt;
use std::str::FromStr;

use crate::error::{ParseError, ShiftError};
use crate::field::{Field, Position};
use crate::shift;

/// An ordered `(minute, hour, day-of-month, month, day-of-week)` tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronExpression {
    fields: [Field; 5],
}

impl CronExpression {
    /// Parse five whitespace-separated field tokens.
    ///
    /// Leading and trailing whitespace is trimmed and runs of whitespace
    /// between fields are accepted. `@`-macros and `#` comments are rejected.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = input.trim();
        if trimmed.starts_with('@') || trimmed.starts_with('#') {
            return Err(ParseError::Unsupported(trimmed.to_string()));
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        if tokens.len() != 5 {
            return Err(ParseError::FieldCount(tokens.len()));
        }

        Ok(Self {
            fields: [
                Field::parse(tokens[0], Position::Minute)?,
                Field::parse(tokens[1], Position::Hour)?,
                Field::parse(tokens[2], Position::DayOfMonth)?,
                Field::parse(tokens[3], Position::Month)?,
                Field::parse(tokens[4], Position::DayOfWeek)?,
            ],
        })
    }

    /// Assemble an expression from fields given in source order.
    ///
    /// Returns `None` if a field sits at the wrong position.
    pub fn from_fields(fields: [Field; 5]) -> Option<Self> {
        let in_order = fields
            .iter()
            .zip(Position::ALL)
            .all(|(field, position)| field.position() == position);
        in_order.then_some(Self { fields })
    }

    /// Fields already known to be in source order.
    pub(crate) fn from_parts(fields: [Field; 5]) -> Self {
        debug_assert!(Self::from_fields(fields.clone()).is_some());
        Self { fields }
    }

    pub fn field(&self, position: Position) -> &Field {
        &self.fields[position.index()]
    }

    pub fn fields(&self) -> &[Field; 5] {
        &self.fields
    }

    pub fn minute(&self) -> &Field {
        self.field(Position::Minute)
    }

    pub fn hour(&self) -> &Field {
        self.field(Position::Hour)
    }

    pub fn day_of_month(&self) -> &Field {
        self.field(Position::DayOfMonth)
    }

    pub fn month(&self) -> &Field {
        self.field(Position::Month)
    }

    pub fn day_of_week(&self) -> &Field {
        self.field(Position::DayOfWeek)
    }

    /// Shift every firing by `minutes`; see [`shift::apply`].
    pub fn shifted(&self, minutes: i64) -> Result<CronExpression, ShiftError> {
        shift::apply(self, minutes)
    }

    /// Whether both expressions match the same value-set at every position.
    pub fn same_sets(&self, other: &CronExpression) -> bool {
        self.fields
            .iter()
            .zip(other.fields.iter())
            .all(|(a, b)| a.same_set(b))
    }
}

impl FromStr for CronExpression {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CronExpression {
    /// Canonical fields joined by single spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{field}")?;
        }
        Ok(())
    }
}
