//! Recurring schedules for lifeos habits and tasks.
//!
//! This crate provides:
//! - The persisted schedule record with lenient wire decoding
//! - An options builder that turns a record into a checked recurrence rule
//! - Occurrence evaluation (count, preview, or explicit window)
//! - Plain-English descriptions of a rule
//! - Whole-record validation with suggestions
//! - A filesystem loader for JSON/YAML record files and API exports

pub mod builder;
pub mod describe;
pub mod error;
pub mod evaluator;
pub mod loader;
pub mod record;
pub mod validation;
pub mod view;

pub use builder::{build_recurrence, Constraints, RecurrenceConfig};
pub use describe::{describe, try_describe};
pub use error::{Result, ScheduleError};
pub use evaluator::{occurrences, try_occurrences, ScheduleOptions, Window};
pub use loader::{LoadedSchedule, ScheduleLoader};
pub use record::{Frequency, RecordId, ScheduleRecord};
pub use validation::{validate_record, ValidationResult};
pub use view::ScheduleView;
