//! Persisted schedule record, exactly as the backend stores it.
//!
//! A [`ScheduleRecord`] is raw user input: indices instead of enums, display
//! formatted date and time strings, loosely typed numbers. Nothing here is
//! validated; [`crate::builder::build_recurrence`] turns a record into a
//! checked [`crate::RecurrenceConfig`].

mod codes;
pub(crate) mod lenient;

pub use codes::{
    month_name, parse_weekday_code, weekday_from_index, weekday_name, Frequency, WEEKDAY_CODES,
};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Record identifier: integer from the server, string for unsaved drafts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// A schedule as stored: the source fields of a recurrence rule.
///
/// Field names are camelCase on the wire; the backend's snake_case names
/// are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecord {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: String,

    /// Frequency index, `Yearly = 0` through `Secondly = 6`.
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub freq: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub interval: Option<i64>,

    #[serde(default, alias = "by_week_day", deserialize_with = "lenient::string_list")]
    pub by_week_day: Vec<String>,
    #[serde(default, alias = "by_month_day", deserialize_with = "lenient::int_list")]
    pub by_month_day: Vec<i64>,
    #[serde(default, alias = "by_month", deserialize_with = "lenient::int_list")]
    pub by_month: Vec<i64>,
    #[serde(default, alias = "by_year_day", deserialize_with = "lenient::int_list")]
    pub by_year_day: Vec<i64>,
    #[serde(default, alias = "by_week_no", deserialize_with = "lenient::int_list")]
    pub by_week_no: Vec<i64>,
    #[serde(default, alias = "by_hour", deserialize_with = "lenient::int_list")]
    pub by_hour: Vec<i64>,
    #[serde(default, alias = "by_minute", deserialize_with = "lenient::int_list")]
    pub by_minute: Vec<i64>,
    #[serde(default, alias = "by_second", deserialize_with = "lenient::int_list")]
    pub by_second: Vec<i64>,
    #[serde(default, alias = "by_set_position", deserialize_with = "lenient::int_list")]
    pub by_set_position: Vec<i64>,

    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub count: Option<i64>,

    /// `"MMM D, YYYY"` or `YYYY-MM-DD`.
    #[serde(default, alias = "start_date")]
    pub start_date: Option<String>,
    /// `"h:mm A"`, `HH:mm:ss` or `HH:mm`.
    #[serde(default, alias = "start_time")]
    pub start_time: Option<String>,
    #[serde(default, alias = "end_date")]
    pub end_date: Option<String>,
    #[serde(default, alias = "end_time")]
    pub end_time: Option<String>,

    /// Week-start index, `Monday = 0`.
    #[serde(default, alias = "week_start", deserialize_with = "lenient::opt_int")]
    pub week_start: Option<i64>,

    #[serde(default, alias = "associated_task")]
    pub associated_task: Option<RecordId>,
    #[serde(default, alias = "associated_habit")]
    pub associated_habit: Option<RecordId>,
}

impl ScheduleRecord {
    /// Record name, or the record id when unnamed.
    pub fn display_name(&self) -> String {
        if !self.name.trim().is_empty() {
            return self.name.clone();
        }
        match &self.id {
            Some(id) => format!("schedule #{id}"),
            None => "unnamed schedule".to_string(),
        }
    }

    pub fn frequency(&self) -> Option<Frequency> {
        self.freq.and_then(Frequency::from_index)
    }
}
