//! Display projection of a schedule record: the record plus derived labels,
//! upcoming dates and the plain-English definition.

use serde::Serialize;

use crate::builder::normalize::{DISPLAY_DATE, DISPLAY_TIME};
use crate::describe::describe;
use crate::evaluator::{occurrences, ScheduleOptions};
use crate::record::{weekday_from_index, weekday_name, ScheduleRecord};

/// Shown for a choice index that does not map to a label.
pub const UNKNOWN_LABEL: &str = "—";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleView {
    #[serde(flatten)]
    pub record: ScheduleRecord,
    pub freq_name: String,
    pub week_start_name: String,
    /// Upcoming occurrences as `MMM D, YYYY h:mm A`.
    pub colliding_dates: Vec<String>,
    pub definition: String,
}

impl ScheduleView {
    pub fn from_record(record: &ScheduleRecord, options: &ScheduleOptions) -> Self {
        let freq_name = record
            .frequency()
            .map_or(UNKNOWN_LABEL, |f| f.name())
            .to_string();
        let week_start_name = weekday_from_index(record.week_start.unwrap_or(0))
            .map_or(UNKNOWN_LABEL, weekday_name)
            .to_string();

        let format = format!("{DISPLAY_DATE} {DISPLAY_TIME}");
        let colliding_dates = occurrences(record, options, None)
            .iter()
            .map(|at| at.format(&format).to_string())
            .collect();

        Self {
            record: record.clone(),
            freq_name,
            week_start_name,
            colliding_dates,
            definition: describe(record, options.offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn options() -> ScheduleOptions {
        ScheduleOptions::new(FixedOffset::east_opt(-5 * 3600).unwrap()).with_preview_count(3)
    }

    #[test]
    fn view_derives_labels_dates_and_definition() {
        let record = ScheduleRecord {
            name: "Water plants".to_string(),
            freq: Some(3),
            interval: Some(2),
            start_date: Some("Mar 30, 2024".to_string()),
            start_time: Some("6:15 PM".to_string()),
            week_start: Some(6),
            ..Default::default()
        };
        let view = ScheduleView::from_record(&record, &options());

        assert_eq!(view.freq_name, "Daily");
        assert_eq!(view.week_start_name, "Sunday");
        assert_eq!(
            view.colliding_dates,
            vec!["Mar 30, 2024 6:15 PM", "Apr 1, 2024 6:15 PM", "Apr 3, 2024 6:15 PM"]
        );
        assert_eq!(view.definition, "Every 2 days indefinitely [ Mar 30, 2024 - ]");
    }

    #[test]
    fn view_of_broken_record_degrades() {
        let record = ScheduleRecord {
            freq: Some(11),
            week_start: Some(-1),
            ..Default::default()
        };
        let view = ScheduleView::from_record(&record, &options());
        assert_eq!(view.freq_name, UNKNOWN_LABEL);
        assert_eq!(view.week_start_name, UNKNOWN_LABEL);
        assert!(view.colliding_dates.is_empty());
        assert!(view.definition.is_empty());
    }

    #[test]
    fn view_serializes_flat_camel_case() {
        let record = ScheduleRecord {
            name: "Gym".to_string(),
            freq: Some(2),
            start_date: Some("Jan 1, 2024".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(ScheduleView::from_record(&record, &options())).unwrap();
        assert_eq!(json["name"], "Gym");
        assert_eq!(json["freqName"], "Weekly");
        assert_eq!(json["weekStartName"], "Monday");
        assert_eq!(json["collidingDates"].as_array().unwrap().len(), 3);
        assert!(json["definition"].as_str().unwrap().starts_with("Weekly"));
    }
}
