//! Parsing of the display-formatted date and time strings on a record.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Time used when a start date has no start time.
pub const DEFAULT_START_TIME: &str = "12:00 AM";
/// Time used when an end date has no end time.
pub const DEFAULT_END_TIME: &str = "11:59 PM";

const DATE_FORMATS: &[&str] = &["%b %d, %Y", "%B %d, %Y", "%Y-%m-%d"];
const TIME_FORMATS: &[&str] = &["%I:%M %p", "%I:%M%p", "%H:%M:%S", "%H:%M"];

/// Display format for dates, `MMM D, YYYY`.
pub const DISPLAY_DATE: &str = "%b %-d, %Y";
/// Display format for times, `h:mm A`.
pub const DISPLAY_TIME: &str = "%-I:%M %p";

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
}

/// `Some` when the field holds non-whitespace text.
pub(crate) fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Combine a date with an optional time, substituting `default_time` for a
/// missing or blank time. `Err` carries the offending input.
pub(crate) fn compose(
    date: &str,
    time: Option<&str>,
    default_time: &str,
) -> std::result::Result<NaiveDateTime, String> {
    let time = time.unwrap_or(default_time);
    let day = parse_date(date).ok_or_else(|| date.to_string())?;
    let at = parse_time(time).ok_or_else(|| format!("{date} {time}"))?;
    Ok(day.and_time(at))
}
