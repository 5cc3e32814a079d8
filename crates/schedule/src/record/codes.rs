//! Choice enums stored as integer indices or short codes on the wire.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Recurrence frequency. The wire index follows RFC 5545 order, `Yearly = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    Yearly,
    Monthly,
    Weekly,
    Daily,
    Hourly,
    Minutely,
    Secondly,
}

impl Frequency {
    pub const ALL: [Frequency; 7] = [
        Frequency::Yearly,
        Frequency::Monthly,
        Frequency::Weekly,
        Frequency::Daily,
        Frequency::Hourly,
        Frequency::Minutely,
        Frequency::Secondly,
    ];

    pub fn from_index(index: i64) -> Option<Self> {
        usize::try_from(index).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn index(self) -> i64 {
        self as i64
    }

    /// Choice label shown next to the stored index.
    pub fn name(self) -> &'static str {
        match self {
            Frequency::Yearly => "Yearly",
            Frequency::Monthly => "Monthly",
            Frequency::Weekly => "Weekly",
            Frequency::Daily => "Daily",
            Frequency::Hourly => "Hourly",
            Frequency::Minutely => "Minutely",
            Frequency::Secondly => "Secondly",
        }
    }

    /// Leading phrase of a description when the interval is 1.
    pub fn label(self) -> &'static str {
        match self {
            Frequency::Minutely => "Every minute",
            Frequency::Secondly => "Every second",
            other => other.name(),
        }
    }

    /// Plural unit used in "Every N <unit>".
    pub fn plural_unit(self) -> &'static str {
        match self {
            Frequency::Yearly => "years",
            Frequency::Monthly => "months",
            Frequency::Weekly => "weeks",
            Frequency::Daily => "days",
            Frequency::Hourly => "hours",
            Frequency::Minutely => "minutes",
            Frequency::Secondly => "seconds",
        }
    }

    pub(crate) fn to_engine(self) -> rrule::Frequency {
        match self {
            Frequency::Yearly => rrule::Frequency::Yearly,
            Frequency::Monthly => rrule::Frequency::Monthly,
            Frequency::Weekly => rrule::Frequency::Weekly,
            Frequency::Daily => rrule::Frequency::Daily,
            Frequency::Hourly => rrule::Frequency::Hourly,
            Frequency::Minutely => rrule::Frequency::Minutely,
            Frequency::Secondly => rrule::Frequency::Secondly,
        }
    }
}

/// Canonical two-letter weekday codes, Monday first.
pub const WEEKDAY_CODES: [&str; 7] = ["MO", "TU", "WE", "TH", "FR", "SA", "SU"];

/// Parse a weekday code: `MO`, `Mon`, or `Monday`, case-insensitive.
pub fn parse_weekday_code(code: &str) -> Option<Weekday> {
    let lower = code.trim().to_ascii_lowercase();
    let weekday = match lower.as_str() {
        "mo" | "mon" | "monday" => Weekday::Mon,
        "tu" | "tue" | "tues" | "tuesday" => Weekday::Tue,
        "we" | "wed" | "wednesday" => Weekday::Wed,
        "th" | "thu" | "thur" | "thurs" | "thursday" => Weekday::Thu,
        "fr" | "fri" | "friday" => Weekday::Fri,
        "sa" | "sat" | "saturday" => Weekday::Sat,
        "su" | "sun" | "sunday" => Weekday::Sun,
        _ => return None,
    };
    Some(weekday)
}

/// Week-start index as stored on the wire, `Monday = 0`.
pub fn weekday_from_index(index: i64) -> Option<Weekday> {
    const WEEK: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];
    usize::try_from(index).ok().and_then(|i| WEEK.get(i).copied())
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn month_name(month: u8) -> Option<&'static str> {
    const MONTHS: [&str; 12] = [
        "January", "February", "March", "April", "May", "June", "July", "August",
        "September", "October", "November", "December",
    ];
    MONTHS.get(usize::from(month).checked_sub(1)?).copied()
}
