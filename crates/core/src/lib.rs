pub mod config;
pub mod envelope;
pub mod error;

pub use config::{Config, OffsetSetting, ScheduleConfig};
pub use envelope::*;
pub use error::*;
