//! Expanding a recurrence rule into concrete occurrences.
//!
//! Three modes: everything inside an explicit window, all `count`
//! occurrences of a capped rule, or a short preview of an open-ended one.
//! `until` always ends the sequence, inclusive.


use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, Utc};
use lifeos_core::ScheduleConfig;

use crate::builder::{build_recurrence, RecurrenceConfig};
use crate::error::Result;
use crate::record::ScheduleRecord;

pub use lifeos_core::config::DEFAULT_PREVIEW_COUNT;

/// Caller-supplied context for evaluating and rendering a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleOptions {
    /// Offset occurrences are rendered in.
    pub offset: FixedOffset,
    /// How many occurrences to show for a rule without `count`.
    pub preview_count: usize,
}

impl ScheduleOptions {
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            offset,
            preview_count: DEFAULT_PREVIEW_COUNT,
        }
    }

    pub fn with_preview_count(mut self, preview_count: usize) -> Self {
        self.preview_count = preview_count;
        self
    }

    /// Resolve the configured offset; `local` reads the system offset now.
    pub fn from_config(config: &ScheduleConfig) -> Self {
        Self::new(config.utc_offset.resolve()).with_preview_count(config.preview_count)
    }
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self::new(Utc.fix())
    }
}

/// Closed interval of instants, both ends included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl Window {
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        Self { start, end }
    }

    /// Whole calendar days `from..=to` at `offset`.
    pub fn days(from: NaiveDate, to: NaiveDate, offset: FixedOffset) -> Option<Self> {
        let first = RecurrenceConfig::attach_offset(from.and_time(NaiveTime::MIN), offset)?;
        let last = to.and_hms_opt(23, 59, 59)?;
        let last = RecurrenceConfig::attach_offset(last, offset)?;
        Some(Self::new(first, last))
    }

    pub fn contains(&self, instant: &DateTime<FixedOffset>) -> bool {
        self.start <= *instant && *instant <= self.end
    }

    /// The window as wall-clock bounds in the rule's offset.
    fn wall_clock(&self, offset: FixedOffset) -> (NaiveDateTime, NaiveDateTime) {
        (
            self.start.with_timezone(&offset).naive_local(),
            self.end.with_timezone(&offset).naive_local(),
        )
    }
}

impl RecurrenceConfig {
    /// Engine output as wall-clock values, cut off after `until`.
    fn wall_clock(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        let until = self.until;
        self.rules()
            .into_iter()
            .map(|at| at.naive_utc())
            .take_while(move |wall| until.map_or(true, |u| *wall <= u))
    }

    /// Occurrences in `window`, or every occurrence of a capped rule, or the
    /// first `preview_count` of an open-ended one.
    pub fn occurrences(
        &self,
        window: Option<&Window>,
        preview_count: usize,
    ) -> Vec<DateTime<FixedOffset>> {
        let walls: Vec<NaiveDateTime> = match window {
            Some(window) => {
                let (from, to) = window.wall_clock(self.offset);
                self.wall_clock()
                    .skip_while(|wall| *wall < from)
                    .take_while(|wall| *wall <= to)
                    .collect()
            }
            None if self.count.is_some() => self.wall_clock().collect(),
            None => self.wall_clock().take(preview_count).collect(),
        };
        walls
            .into_iter()
            .filter_map(|wall| Self::attach_offset(wall, self.offset))
            .collect()
    }

    /// First occurrence at or after `instant`, bounded by `count` and `until`.
    pub fn next_after(&self, instant: &DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
        let from = instant.with_timezone(&self.offset).naive_local();
        self.wall_clock()
            .find(|wall| *wall >= from)
            .and_then(|wall| Self::attach_offset(wall, self.offset))
    }
}

/// Occurrences of `record`; empty when the record does not build.
pub fn occurrences(
    record: &ScheduleRecord,
    options: &ScheduleOptions,
    window: Option<&Window>,
) -> Vec<DateTime<FixedOffset>> {
    try_occurrences(record, options, window).unwrap_or_default()
}

pub fn try_occurrences(
    record: &ScheduleRecord,
    options: &ScheduleOptions,
    window: Option<&Window>,
) -> Result<Vec<DateTime<FixedOffset>>> {
    let config = build_recurrence(record, options.offset)?;
    Ok(config.occurrences(window, options.preview_count))
}
