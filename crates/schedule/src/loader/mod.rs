//! Filesystem schedule loader.
//!
//! Scans a directory tree for YAML schedule definitions, resolves each one
//! and keeps the resolved schedules in memory keyed by id.

mod core;
mod status;


pub use self::core::ScheduleLoader;
pub use self::status::{LoadResult, LoadStatus};
