//! Plain-English rendering of a recurrence rule.
//!
//! Only fields the user actually set are described; a clause whose field is
//! empty is left out. Clauses are joined by single spaces, e.g.
//! `Every 2 weeks on Mondays, Wednesdays for 10 times [ Jan 1, 2024 - ]`.

mod ordinal;

pub use ordinal::{ordinal_name, ordinal_suffix};

use chrono::{FixedOffset, NaiveTime, Weekday};

use crate::builder::normalize::{DISPLAY_DATE, DISPLAY_TIME};
use crate::builder::{build_recurrence, RecurrenceConfig};
use crate::error::Result;
use crate::record::{month_name, weekday_name, ScheduleRecord};

/// Description of `record`, or an empty string when it does not build.
pub fn describe(record: &ScheduleRecord, offset: FixedOffset) -> String {
    try_describe(record, offset).unwrap_or_default()
}

pub fn try_describe(record: &ScheduleRecord, offset: FixedOffset) -> Result<String> {
    build_recurrence(record, offset).map(|config| config.describe())
}

impl RecurrenceConfig {
    pub fn describe(&self) -> String {
        let c = &self.constraints;
        let mut clauses = vec![self.interval_clause()];

        if !c.by_weekday.is_empty() {
            clauses.push(weekday_clause(&c.by_weekday, &c.by_set_position));
        }
        if !c.by_week_no.is_empty() {
            clauses.push(format!("on week {}", join(&c.by_week_no)));
        }
        if !c.by_month_day.is_empty() {
            let days: Vec<String> = c.by_month_day.iter().map(|d| ordinal_name(i64::from(*d))).collect();
            clauses.push(format!("on the {} day", days.join(", ")));
        }
        if !c.by_year_day.is_empty() {
            clauses.push(format!("on day {} of the year", join(&c.by_year_day)));
        }
        if !c.by_month.is_empty() {
            let months: Vec<&str> = c.by_month.iter().filter_map(|m| month_name(*m)).collect();
            clauses.push(format!("in {}", months.join(", ")));
        }
        if !c.by_hour.is_empty() {
            clauses.push(format!("at {}", times(&c.by_hour, &c.by_minute).join(", ")));
        }

        clauses.push(match self.count {
            Some(1) => "for 1 time".to_string(),
            Some(n) => format!("for {n} times"),
            None => "indefinitely".to_string(),
        });

        let start = self.start.format(DISPLAY_DATE);
        clauses.push(match self.until_at() {
            Some(until) => format!("[ {start} - until {} ]", until.format(DISPLAY_DATE)),
            None => format!("[ {start} - ]"),
        });

        clauses.join(" ")
    }

    fn interval_clause(&self) -> String {
        match self.interval {
            1 => self.frequency.label().to_string(),
            n => format!("Every {n} {}", self.frequency.plural_unit()),
        }
    }
}

/// `on Mondays, Fridays`, or `on the 1st, last Mondays` with set positions.
fn weekday_clause(days: &[Weekday], set_positions: &[i32]) -> String {
    let plural: Vec<String> = days.iter().map(|d| format!("{}s", weekday_name(*d))).collect();
    if set_positions.is_empty() {
        return format!("on {}", plural.join(", "));
    }
    let positions: Vec<String> = set_positions.iter().map(|p| ordinal_name(i64::from(*p))).collect();
    format!("on the {} {}", positions.join(", "), plural.join(", "))
}

/// Every hour paired with every minute, minute `0` when none are set.
fn times(hours: &[u8], minutes: &[u8]) -> Vec<String> {
    let minutes: &[u8] = if minutes.is_empty() { &[0] } else { minutes };
    hours
        .iter()
        .flat_map(|h| minutes.iter().map(move |m| (*h, *m)))
        .filter_map(|(h, m)| NaiveTime::from_hms_opt(u32::from(h), u32::from(m), 0))
        .map(|t| t.format(DISPLAY_TIME).to_string())
        .collect()
}

fn join<T: ToString>(values: &[T]) -> String {
    values.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}
