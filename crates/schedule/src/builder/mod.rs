//! Turning a [`ScheduleRecord`] into a checked, engine-backed rule.
//!
//! Recurrence expansion is delegated to the `rrule` crate. The engine runs in
//! a UTC frame holding local wall-clock values, so "every day at 7:00 AM"
//! stays at 7:00 AM no matter which offset the results are rendered in.
//! [`RecurrenceConfig::attach_offset`] maps engine output back to the offset
//! the rule was built for.

pub(crate) mod fields;
pub mod normalize;

pub use fields::Constraints;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Weekday};
use rrule::{NWeekday, RRule, RRuleSet, Tz};
use tracing::{debug, warn};

use crate::error::Result;
use crate::record::{Frequency, ScheduleRecord};

/// A validated recurrence rule, ready to expand.
#[derive(Debug, Clone)]
pub struct RecurrenceConfig {
    pub frequency: Frequency,
    pub interval: u16,
    pub constraints: Constraints,
    /// `None` means uncapped.
    pub count: Option<u32>,
    /// First instant, local wall clock.
    pub start: NaiveDateTime,
    /// Last allowed instant, local wall clock.
    pub until: Option<NaiveDateTime>,
    pub week_start: Weekday,
    /// Offset results are rendered in.
    pub offset: FixedOffset,
    rules: RRuleSet,
}

impl RecurrenceConfig {
    pub(crate) fn rules(&self) -> &RRuleSet {
        &self.rules
    }

    /// Start as an instant in the configured offset.
    pub fn start_at(&self) -> Option<DateTime<FixedOffset>> {
        Self::attach_offset(self.start, self.offset)
    }

    pub fn until_at(&self) -> Option<DateTime<FixedOffset>> {
        self.until.and_then(|u| Self::attach_offset(u, self.offset))
    }

    /// Read a wall-clock value as local time at `offset`.
    pub(crate) fn attach_offset(
        wall: NaiveDateTime,
        offset: FixedOffset,
    ) -> Option<DateTime<FixedOffset>> {
        offset.from_local_datetime(&wall).single()
    }
}

/// Validate `record` and build its recurrence rule for rendering at `offset`.
///
/// Fails on the first broken field; [`crate::validation::validate_record`]
/// reports all of them.
pub fn build_recurrence(record: &ScheduleRecord, offset: FixedOffset) -> Result<RecurrenceConfig> {
    let built = assemble(record, offset);
    match &built {
        Ok(config) => debug!(
            schedule = %record.display_name(),
            freq = config.frequency.name(),
            interval = config.interval,
            count = ?config.count,
            start = %config.start,
            "built recurrence"
        ),
        Err(e) => warn!(
            schedule = %record.display_name(),
            field = e.path(),
            error = %e,
            "failed to build recurrence"
        ),
    }
    built
}

pub(crate) fn assemble(record: &ScheduleRecord, offset: FixedOffset) -> Result<RecurrenceConfig> {
    let frequency = fields::frequency(record)?;
    let start = fields::start(record)?;
    let interval = fields::interval(record)?;
    let count = fields::count(record)?;
    let until = fields::until(record, Some(start))?;
    let week_start = fields::week_start(record)?;
    let constraints = Constraints::from_record(record)?;

    let rules = engine_rules(frequency, interval, count, week_start, &constraints, start)?;

    Ok(RecurrenceConfig {
        frequency,
        interval,
        constraints,
        count,
        start,
        until,
        week_start,
        offset,
        rules,
    })
}

/// `until` stays out of the engine rule: RFC 5545 forbids COUNT together
/// with UNTIL, while records may carry both. The evaluator enforces it.
fn engine_rules(
    frequency: Frequency,
    interval: u16,
    count: Option<u32>,
    week_start: Weekday,
    c: &Constraints,
    start: NaiveDateTime,
) -> Result<RRuleSet> {
    let mut rule = RRule::new(frequency.to_engine())
        .interval(interval)
        .week_start(week_start);

    if let Some(count) = count {
        rule = rule.count(count);
    }
    if !c.by_weekday.is_empty() {
        rule = rule.by_weekday(c.by_weekday.iter().map(|d| NWeekday::Every(*d)).collect());
    }
    if !c.by_month_day.is_empty() {
        rule = rule.by_month_day(c.by_month_day.clone());
    }
    if !c.by_month.is_empty() {
        let months: Vec<chrono::Month> = c.by_month.iter().filter_map(|m| engine_month(*m)).collect();
        rule = rule.by_month(&months);
    }
    if !c.by_year_day.is_empty() {
        rule = rule.by_year_day(c.by_year_day.clone());
    }
    if !c.by_week_no.is_empty() {
        rule = rule.by_week_no(c.by_week_no.clone());
    }
    if !c.by_hour.is_empty() {
        rule = rule.by_hour(c.by_hour.clone());
    }
    if !c.by_minute.is_empty() {
        rule = rule.by_minute(c.by_minute.clone());
    }
    if !c.by_second.is_empty() {
        rule = rule.by_second(c.by_second.clone());
    }
    if !c.by_set_position.is_empty() {
        rule = rule.by_set_pos(c.by_set_position.clone());
    }

    Ok(rule.build(engine_instant(start))?)
}

/// Wall-clock value placed in the engine's UTC frame.
fn engine_instant(wall: NaiveDateTime) -> DateTime<Tz> {
    Tz::UTC.from_utc_datetime(&wall)
}

fn engine_month(month: u8) -> Option<chrono::Month> {
    use chrono::Month::*;
    const MONTHS: [chrono::Month; 12] = [
        January, February, March, April, May, June, July, August, September, October,
        November, December,
    ];
    MONTHS.get(usize::from(month).checked_sub(1)?).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScheduleError;
    use chrono::NaiveDate;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn weekly() -> ScheduleRecord {
        ScheduleRecord {
            name: "Gym".to_string(),
            freq: Some(2),
            start_date: Some("Jan 1, 2024".to_string()),
            start_time: Some("7:00 AM".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_fill_unset_fields() {
        let config = build_recurrence(&weekly(), utc()).unwrap();
        assert_eq!(config.frequency, Frequency::Weekly);
        assert_eq!(config.interval, 1);
        assert_eq!(config.count, None);
        assert_eq!(config.until, None);
        assert_eq!(config.week_start, Weekday::Mon);
        assert_eq!(config.constraints, Constraints::default());
        assert_eq!(
            config.start,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(7, 0, 0).unwrap()
        );
    }

    #[test]
    fn zero_interval_and_count_mean_unset() {
        let record = ScheduleRecord {
            interval: Some(0),
            count: Some(0),
            ..weekly()
        };
        let config = build_recurrence(&record, utc()).unwrap();
        assert_eq!(config.interval, 1);
        assert_eq!(config.count, None);
    }

    #[test]
    fn end_without_time_runs_to_end_of_day() {
        let record = ScheduleRecord {
            end_date: Some("Jan 31, 2024".to_string()),
            ..weekly()
        };
        let config = build_recurrence(&record, utc()).unwrap();
        assert_eq!(
            config.until,
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap().and_hms_opt(23, 59, 0)
        );
    }

    #[test]
    fn missing_required_fields_fail() {
        let no_freq = ScheduleRecord {
            freq: None,
            ..weekly()
        };
        assert_eq!(
            build_recurrence(&no_freq, utc()).unwrap_err(),
            ScheduleError::MissingFrequency
        );

        let no_start = ScheduleRecord {
            start_date: Some("   ".to_string()),
            ..weekly()
        };
        assert_eq!(
            build_recurrence(&no_start, utc()).unwrap_err(),
            ScheduleError::MissingStart
        );
    }

    #[test]
    fn out_of_range_values_fail() {
        let cases = [
            ScheduleRecord { freq: Some(9), ..weekly() },
            ScheduleRecord { interval: Some(-2), ..weekly() },
            ScheduleRecord { count: Some(-1), ..weekly() },
            ScheduleRecord { week_start: Some(7), ..weekly() },
            ScheduleRecord { by_month_day: vec![32], ..weekly() },
            ScheduleRecord { by_month: vec![0], ..weekly() },
            ScheduleRecord { by_hour: vec![24], ..weekly() },
            ScheduleRecord { by_set_position: vec![0], ..weekly() },
        ];
        for record in cases {
            assert!(build_recurrence(&record, utc()).is_err(), "{record:?}");
        }
    }

    #[test]
    fn until_before_start_fails() {
        let record = ScheduleRecord {
            end_date: Some("Dec 31, 2023".to_string()),
            ..weekly()
        };
        assert!(matches!(
            build_recurrence(&record, utc()),
            Err(ScheduleError::UntilBeforeStart { .. })
        ));
    }

    #[test]
    fn constraints_keep_order_and_drop_repeats() {
        let record = ScheduleRecord {
            by_week_day: vec!["FR".into(), "MO".into(), "fri".into(), "XX".into()],
            by_hour: vec![17, 9, 17],
            ..weekly()
        };
        let config = build_recurrence(&record, utc()).unwrap();
        assert_eq!(config.constraints.by_weekday, vec![Weekday::Fri, Weekday::Mon]);
        assert_eq!(config.constraints.by_hour, vec![17, 9]);
    }

    #[test]
    fn engine_rejection_degrades_to_empty() {
        let record = ScheduleRecord {
            freq: Some(1),
            by_week_no: vec![3],
            ..weekly()
        };
        assert!(matches!(
            build_recurrence(&record, utc()),
            Err(ScheduleError::Engine(_))
        ));
        assert_eq!(crate::describe::describe(&record, utc()), "");
        assert!(crate::evaluator::occurrences(&record, &Default::default(), None).is_empty());
    }

    #[test]
    fn start_at_uses_configured_offset() {
        let plus_eight = FixedOffset::east_opt(8 * 3600).unwrap();
        let config = build_recurrence(&weekly(), plus_eight).unwrap();
        let start = config.start_at().unwrap();
        assert_eq!(start.to_rfc3339(), "2024-01-01T07:00:00+08:00");
    }
}
