//! Whole-record validation with structured errors and suggestions.
//!
//! Unlike [`crate::build_recurrence`], which stops at the first broken
//! field, [`validate_record`] runs every check and reports all of them.
//! Errors block saving; warnings are advisory.

mod fuzzy;
mod record_checks;

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::builder;
use crate::record::ScheduleRecord;

// ── Result types ────────────────────────────────────────────────────

/// Overall validation outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

/// A blocking validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Wire field the error concerns, e.g. `"byWeekDay[1]"`.
    pub path: String,
    pub message: String,
    /// Optional "Did you mean …?" suggestion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// A non-blocking advisory warning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationResult {
    pub(crate) fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(ValidationError {
            path: path.into(),
            message: message.into(),
            suggestion: None,
        });
    }

    pub(crate) fn error_with_suggestion(
        &mut self,
        path: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) {
        self.valid = false;
        self.errors.push(ValidationError {
            path: path.into(),
            message: message.into(),
            suggestion: Some(suggestion.into()),
        });
    }

    pub(crate) fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationWarning {
            path: path.into(),
            message: message.into(),
        });
    }

    /// Errors on `path`, for assertions and targeted display.
    pub fn errors_at<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a ValidationError> + 'a {
        self.errors.iter().filter(move |e| e.path == path)
    }
}

// ── Public API ──────────────────────────────────────────────────────

/// Validate a parsed [`ScheduleRecord`].
pub fn validate_record(record: &ScheduleRecord) -> ValidationResult {
    let mut result = ValidationResult::new();
    record_checks::validate_required(record, &mut result);
    record_checks::validate_bounds(record, &mut result);
    record_checks::validate_weekdays(record, &mut result);
    record_checks::validate_constraints(record, &mut result);
    record_checks::validate_combinations(record, &mut result);

    // Field checks passed; let the engine have the last word on combinations.
    if result.valid {
        if let Err(e) = builder::assemble(record, engine_offset()) {
            result.error("rule", e.to_string());
        }
    }
    result
}

/// Parse raw YAML (or JSON) and validate. Parse errors are reported as errors.
pub fn validate_yaml(yaml: &str) -> ValidationResult {
    match serde_yaml::from_str::<ScheduleRecord>(yaml) {
        Ok(record) => validate_record(&record),
        Err(e) => {
            let mut result = ValidationResult::new();
            result.error("", format!("YAML parse error: {e}"));
            result
        }
    }
}

/// Offset does not affect validity; rules are checked in UTC.
fn engine_offset() -> FixedOffset {
    Utc.fix()
}
