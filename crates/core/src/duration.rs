//! Signed time offsets accepted by [`CronMath`](crate::CronMath).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A signed offset in minutes or hours.
///
/// Serializes as `{"minutes": 30}` / `{"hours": -2}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Duration {
    Minutes(i64),
    Hours(i64),
}

impl Duration {
    /// The offset in minutes, or `None` if it does not fit in an `i64`.
    pub fn as_minutes(self) -> Option<i64> {
        match self {
            Duration::Minutes(n) => Some(n),
            Duration::Hours(n) => n.checked_mul(60),
        }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Duration::Minutes(n) => write!(f, "{n}m"),
            Duration::Hours(n) => write!(f, "{n}h"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_convert_to_minutes() {
        assert_eq!(Duration::Hours(2).as_minutes(), Some(120));
        assert_eq!(Duration::Hours(-3).as_minutes(), Some(-180));
        assert_eq!(Duration::Minutes(-45).as_minutes(), Some(-45));
    }

    #[test]
    fn oversized_hours_do_not_convert() {
        assert_eq!(Duration::Hours(i64::MAX).as_minutes(), None);
    }

    #[test]
    fn serde_uses_unit_keys() {
        let json = serde_json::to_string(&Duration::Minutes(30)).unwrap();
        assert_eq!(json, r#"{"minutes":30}"#);
        let parsed: Duration = serde_json::from_str(r#"{"hours":-2}"#).unwrap();
        assert_eq!(parsed, Duration::Hours(-2));
    }
}
