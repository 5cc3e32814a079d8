//! Per-field resolution of a record into checked values.
//!
//! Each resolver owns one invariant so validation can run all of them and
//! report every problem, while the builder stops at the first.

use chrono::{NaiveDateTime, Weekday};
use tracing::warn;

use crate::error::{Result, ScheduleError};
use crate::record::{parse_weekday_code, weekday_from_index, Frequency, ScheduleRecord};

use super::normalize::{compose, non_blank, DEFAULT_END_TIME, DEFAULT_START_TIME};

pub(crate) fn frequency(record: &ScheduleRecord) -> Result<Frequency> {
    let index = record.freq.ok_or(ScheduleError::MissingFrequency)?;
    Frequency::from_index(index).ok_or(ScheduleError::BadFrequency(index))
}

/// Absent or `0` means the default of 1; the backend stores `0` for "unset".
pub(crate) fn interval(record: &ScheduleRecord) -> Result<u16> {
    match record.interval {
        None | Some(0) => Ok(1),
        Some(n) => u16::try_from(n).map_err(|_| ScheduleError::BadInterval(n)),
    }
}

/// `0` means uncapped, not "no occurrences".
pub(crate) fn count(record: &ScheduleRecord) -> Result<Option<u32>> {
    match record.count {
        None | Some(0) => Ok(None),
        Some(n) => u32::try_from(n)
            .map(Some)
            .map_err(|_| ScheduleError::BadCount(n)),
    }
}

/// Wall-clock start; midnight when the time is missing.
pub(crate) fn start(record: &ScheduleRecord) -> Result<NaiveDateTime> {
    let date = non_blank(&record.start_date).ok_or(ScheduleError::MissingStart)?;
    compose(date, non_blank(&record.start_time), DEFAULT_START_TIME).map_err(ScheduleError::BadStart)
}

/// Wall-clock until; one minute before midnight when the time is missing.
/// Ordering against `start` is checked only when a start is known.
pub(crate) fn until(
    record: &ScheduleRecord,
    start: Option<NaiveDateTime>,
) -> Result<Option<NaiveDateTime>> {
    let Some(date) = non_blank(&record.end_date) else {
        return Ok(None);
    };
    let until = compose(date, non_blank(&record.end_time), DEFAULT_END_TIME)
        .map_err(ScheduleError::BadUntil)?;
    match start {
        Some(start) if until < start => Err(ScheduleError::UntilBeforeStart { start, until }),
        _ => Ok(Some(until)),
    }
}

pub(crate) fn week_start(record: &ScheduleRecord) -> Result<Weekday> {
    match record.week_start {
        None => Ok(Weekday::Mon),
        Some(index) => weekday_from_index(index).ok_or(ScheduleError::BadWeekStart(index)),
    }
}

/// Known weekday codes in input order without repeats, plus the codes
/// that did not parse.
pub(crate) fn weekdays(record: &ScheduleRecord) -> (Vec<Weekday>, Vec<String>) {
    let mut days = Vec::new();
    let mut unknown = Vec::new();
    for code in &record.by_week_day {
        match parse_weekday_code(code) {
            Some(day) if !days.contains(&day) => days.push(day),
            Some(_) => {}
            None => unknown.push(code.clone()),
        }
    }
    (days, unknown)
}

/// Accepted range of one by-field.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldSpec {
    pub name: &'static str,
    pub min: i64,
    pub max: i64,
    /// Positional fields count from the end with negatives and have no 0.
    pub zero_allowed: bool,
}

pub(crate) const BY_MONTH_DAY: FieldSpec = FieldSpec { name: "byMonthDay", min: -31, max: 31, zero_allowed: false };
pub(crate) const BY_MONTH: FieldSpec = FieldSpec { name: "byMonth", min: 1, max: 12, zero_allowed: false };
pub(crate) const BY_YEAR_DAY: FieldSpec = FieldSpec { name: "byYearDay", min: -366, max: 366, zero_allowed: false };
pub(crate) const BY_WEEK_NO: FieldSpec = FieldSpec { name: "byWeekNo", min: -53, max: 53, zero_allowed: false };
pub(crate) const BY_HOUR: FieldSpec = FieldSpec { name: "byHour", min: 0, max: 23, zero_allowed: true };
pub(crate) const BY_MINUTE: FieldSpec = FieldSpec { name: "byMinute", min: 0, max: 59, zero_allowed: true };
pub(crate) const BY_SECOND: FieldSpec = FieldSpec { name: "bySecond", min: 0, max: 59, zero_allowed: true };
pub(crate) const BY_SET_POSITION: FieldSpec = FieldSpec { name: "bySetPosition", min: -366, max: 366, zero_allowed: false };

impl FieldSpec {
    pub(crate) fn check(&self, value: i64) -> Result<i64> {
        if value == 0 && !self.zero_allowed {
            return Err(ScheduleError::ZeroConstraint(self.name));
        }
        if value < self.min || value > self.max {
            return Err(ScheduleError::ConstraintOutOfRange {
                field: self.name,
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(value)
    }

    /// Range-check and narrow to the engine's integer width, dropping repeats.
    pub(crate) fn narrow<T>(&self, values: &[i64]) -> Result<Vec<T>>
    where
        T: TryFrom<i64> + PartialEq,
    {
        let mut out = Vec::with_capacity(values.len());
        for &value in values {
            let checked = self.check(value)?;
            let narrowed = T::try_from(checked).map_err(|_| ScheduleError::ConstraintOutOfRange {
                field: self.name,
                value,
                min: self.min,
                max: self.max,
            })?;
            if !out.contains(&narrowed) {
                out.push(narrowed);
            }
        }
        Ok(out)
    }
}

/// The by-field constraints of a rule. An empty list imposes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constraints {
    pub by_weekday: Vec<Weekday>,
    pub by_month_day: Vec<i8>,
    pub by_month: Vec<u8>,
    pub by_year_day: Vec<i16>,
    pub by_week_no: Vec<i8>,
    pub by_hour: Vec<u8>,
    pub by_minute: Vec<u8>,
    pub by_second: Vec<u8>,
    pub by_set_position: Vec<i32>,
}

impl Constraints {
    pub(crate) fn from_record(record: &ScheduleRecord) -> Result<Self> {
        let (by_weekday, unknown) = weekdays(record);
        if !unknown.is_empty() {
            warn!(
                schedule = %record.display_name(),
                codes = ?unknown,
                "ignoring unknown weekday codes"
            );
        }
        Ok(Self {
            by_weekday,
            by_month_day: BY_MONTH_DAY.narrow(&record.by_month_day)?,
            by_month: BY_MONTH.narrow(&record.by_month)?,
            by_year_day: BY_YEAR_DAY.narrow(&record.by_year_day)?,
            by_week_no: BY_WEEK_NO.narrow(&record.by_week_no)?,
            by_hour: BY_HOUR.narrow(&record.by_hour)?,
            by_minute: BY_MINUTE.narrow(&record.by_minute)?,
            by_second: BY_SECOND.narrow(&record.by_second)?,
            by_set_position: BY_SET_POSITION.narrow(&record.by_set_position)?,
        })
    }

    /// Every by-field check, for reporting all failures at once.
    pub(crate) fn errors(record: &ScheduleRecord) -> Vec<ScheduleError> {
        let fields: [(FieldSpec, &[i64]); 8] = [
            (BY_MONTH_DAY, &record.by_month_day),
            (BY_MONTH, &record.by_month),
            (BY_YEAR_DAY, &record.by_year_day),
            (BY_WEEK_NO, &record.by_week_no),
            (BY_HOUR, &record.by_hour),
            (BY_MINUTE, &record.by_minute),
            (BY_SECOND, &record.by_second),
            (BY_SET_POSITION, &record.by_set_position),
        ];
        fields
            .iter()
            .flat_map(|(spec, values)| values.iter().filter_map(|v| spec.check(*v).err()))
            .collect()
    }
}
