//! Cron-expression time arithmetic.
//!
//! This crate provides:
//! - A positional field model for standard 5-field cron (`*`, `v`, `a-b`,
//!   `a,b,c`, `*/k`, `a/k`, `a-b/k`) with canonical re-emission
//! - A shifter that moves every firing by a signed minute offset, carrying
//!   minute → hour → day → month, and refuses shifts no single expression
//!   can represent
//! - [`CronMath`], a chainable facade that accumulates offsets lazily and
//!   keeps the first error sticky
//!
//! ```
//! use cronmath_core::{CronMath, Duration};
//!
//! let shifted = CronMath::new("45 9 * * *").add(Duration::Minutes(30));
//! assert!(shifted.error().is_none());
//! assert_eq!(shifted.to_string(), "15 10 * * *");
//! ```

pub mod cronmath;
pub mod duration;
pub mod error;
pub mod expression;
pub mod field;
pub mod shift;

pub use cronmath::CronMath;
pub use duration::Duration;
pub use error::*;
pub use expression::CronExpression;
pub use field::{Field, FieldKind, Position};
