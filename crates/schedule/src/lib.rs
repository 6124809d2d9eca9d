//! Schedule adapter over `cronmath-core`.
//!
//! String-tagged operations (`{ type, value, unit }`), one-off
//! [`Calculation`]s, named [`ScheduleDefinition`]s and a filesystem
//! [`ScheduleLoader`] for directories of YAML definitions.

pub mod calculation;
pub mod definition;
pub mod error;
pub mod loader;
pub mod operation;

pub use calculation::{Calculation, CalculationResult};
pub use definition::{ResolvedSchedule, ScheduleDefinition};
pub use error::{Result, ScheduleError};
pub use loader::{LoadResult, LoadStatus, ScheduleLoader};
pub use operation::{apply_all, parse_duration, Operation, OperationKind, Unit};
