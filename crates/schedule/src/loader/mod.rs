//! Filesystem schedule loader.
//!
//! Reads schedule records from a single file or a directory tree of
//! `*.json` / `*.yml` / `*.yaml` files. A file may hold one record, a list,
//! a paginated page, or an API envelope around either.

mod core;
mod error;

#[cfg(test)]
mod tests;

pub use self::core::{FileFormat, LoadedSchedule, ScheduleLoader};
pub use self::error::{LoadError, LoadResult, LoadStatus, Result};
