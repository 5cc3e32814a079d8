//! Named reasons a schedule record cannot become a recurrence rule.

use chrono::NaiveDateTime;

/// Why a [`crate::ScheduleRecord`] failed to build.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("frequency is required")]
    MissingFrequency,

    #[error("unrecognized frequency index {0} (expected 0-6)")]
    BadFrequency(i64),

    #[error("start date is required")]
    MissingStart,

    #[error("invalid start '{0}'")]
    BadStart(String),

    #[error("interval must be a positive integer, got {0}")]
    BadInterval(i64),

    #[error("count must be a positive integer, got {0}")]
    BadCount(i64),

    #[error("invalid end '{0}'")]
    BadUntil(String),

    #[error("end {until} is before start {start}")]
    UntilBeforeStart {
        start: NaiveDateTime,
        until: NaiveDateTime,
    },

    #[error("{field} value {value} is outside {min}..={max}")]
    ConstraintOutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("{0} cannot contain 0; use negative values to count from the end")]
    ZeroConstraint(&'static str),

    #[error("week start index {0} is not a weekday (expected 0-6)")]
    BadWeekStart(i64),

    #[error("recurrence engine rejected the rule: {0}")]
    Engine(String),
}

impl ScheduleError {
    /// Wire field the error points at, e.g. `"startDate"`.
    pub fn path(&self) -> &'static str {
        match self {
            ScheduleError::MissingFrequency | ScheduleError::BadFrequency(_) => "freq",
            ScheduleError::MissingStart | ScheduleError::BadStart(_) => "startDate",
            ScheduleError::BadInterval(_) => "interval",
            ScheduleError::BadCount(_) => "count",
            ScheduleError::BadUntil(_) | ScheduleError::UntilBeforeStart { .. } => "endDate",
            ScheduleError::ConstraintOutOfRange { field, .. }
            | ScheduleError::ZeroConstraint(field) => *field,
            ScheduleError::BadWeekStart(_) => "weekStart",
            ScheduleError::Engine(_) => "",
        }
    }
}

impl From<rrule::RRuleError> for ScheduleError {
    fn from(err: rrule::RRuleError) -> Self {
        ScheduleError::Engine(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
