//! Field checks for schedule records.

use crate::builder::fields::{self, Constraints};
use crate::builder::normalize::non_blank;
use crate::record::{parse_weekday_code, weekday_name, ScheduleRecord, WEEKDAY_CODES};

use super::fuzzy::fuzzy_match;
use super::ValidationResult;

pub(super) fn validate_required(record: &ScheduleRecord, result: &mut ValidationResult) {
    if let Err(e) = fields::frequency(record) {
        result.error(e.path(), e.to_string());
    }
    if let Err(e) = fields::start(record) {
        result.error(e.path(), e.to_string());
    }
}

pub(super) fn validate_bounds(record: &ScheduleRecord, result: &mut ValidationResult) {
    if let Err(e) = fields::interval(record) {
        result.error(e.path(), e.to_string());
    }
    if let Err(e) = fields::count(record) {
        result.error(e.path(), e.to_string());
    }
    if let Err(e) = fields::week_start(record) {
        result.error(e.path(), e.to_string());
    }
    // A broken start is already reported; only order against a good one.
    let start = fields::start(record).ok();
    if let Err(e) = fields::until(record, start) {
        result.error(e.path(), e.to_string());
    }
    if non_blank(&record.end_time).is_some() && non_blank(&record.end_date).is_none() {
        result.warn("endTime", "endTime is ignored without an endDate");
    }
}

pub(super) fn validate_weekdays(record: &ScheduleRecord, result: &mut ValidationResult) {
    let mut candidates: Vec<&str> = WEEKDAY_CODES.to_vec();
    candidates.extend(
        WEEKDAY_CODES
            .iter()
            .filter_map(|code| parse_weekday_code(code))
            .map(weekday_name),
    );

    for (i, code) in record.by_week_day.iter().enumerate() {
        if parse_weekday_code(code).is_some() {
            continue;
        }
        let path = format!("byWeekDay[{i}]");
        match fuzzy_match(code, &candidates) {
            Some(s) => result.error_with_suggestion(
                &path,
                format!("Unknown weekday code '{code}'"),
                format!("Did you mean '{s}'?"),
            ),
            None => result.error(
                &path,
                format!("Unknown weekday code '{code}', expected one of {}", WEEKDAY_CODES.join(", ")),
            ),
        }
    }
}

pub(super) fn validate_constraints(record: &ScheduleRecord, result: &mut ValidationResult) {
    for e in Constraints::errors(record) {
        result.error(e.path(), e.to_string());
    }
}

pub(super) fn validate_combinations(record: &ScheduleRecord, result: &mut ValidationResult) {
    let has_selectors = !(record.by_week_day.is_empty()
        && record.by_month_day.is_empty()
        && record.by_month.is_empty()
        && record.by_year_day.is_empty()
        && record.by_week_no.is_empty()
        && record.by_hour.is_empty()
        && record.by_minute.is_empty()
        && record.by_second.is_empty());
    if !record.by_set_position.is_empty() && !has_selectors {
        result.warn(
            "bySetPosition",
            "bySetPosition has no effect without another by-field to select from",
        );
    }

    let capped = matches!(fields::count(record), Ok(Some(_)));
    if capped && non_blank(&record.end_date).is_some() {
        result.warn(
            "count",
            "both count and endDate are set; whichever is reached first ends the schedule",
        );
    }
}
