use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use serde_json::{json, Value};
use tracing::info;

use lifeos_schedule::builder::normalize::{DISPLAY_DATE, DISPLAY_TIME};
use lifeos_schedule::{
    try_describe, try_occurrences, validate_record, LoadedSchedule, ScheduleLoader,
    ScheduleOptions, ScheduleView, ValidationResult, Window,
};

use crate::cli::{Command, OccurrencesArgs, OutputFormat, ReportArgs, SourceArgs};
use crate::config::Settings;
use crate::terminal::Terminal;

/// Records read from a source, plus how many files could not be parsed.
struct Loaded {
    schedules: Vec<LoadedSchedule>,
    failed_files: usize,
}

pub fn run(command: &Command, settings: &Settings, terminal: &Terminal) -> Result<ExitCode> {
    match command {
        Command::Describe(args) => describe(args, settings, terminal),
        Command::Occurrences(args) => occurrences(args, settings, terminal),
        Command::Validate(args) => validate(args, settings, terminal),
        Command::View(args) => view(args, settings, terminal),
    }
}

fn load(source: &SourceArgs, settings: &Settings) -> Result<Loaded> {
    let root = settings.source(source.path.as_deref());
    let mut loader = ScheduleLoader::new(&root);
    let results = loader
        .load_all()
        .with_context(|| format!("failed to read schedules from {}", root.display()))?;

    // Per-file failures are already logged by the loader.
    let failed_files = results
        .iter()
        .filter(|r| r.is_failed())
        .count();
    info!(
        source = %loader.root().display(),
        files = results.len(),
        schedules = loader.schedules().len(),
        failed_files,
        "loaded schedule records"
    );
    let schedules = loader.into_schedules();
    Ok(Loaded {
        schedules,
        failed_files,
    })
}

fn source_label(path: &Path) -> String {
    path.display().to_string()
}

fn display_instant(at: &DateTime<FixedOffset>) -> String {
    at.format(&format!("{DISPLAY_DATE} {DISPLAY_TIME}")).to_string()
}

// ── describe ────────────────────────────────────────────────────────

fn describe(args: &SourceArgs, settings: &Settings, terminal: &Terminal) -> Result<ExitCode> {
    let loaded = load(args, settings)?;
    for s in &loaded.schedules {
        terminal.print_header(&s.record.display_name(), &source_label(&s.path))?;
        match try_describe(&s.record, settings.options.offset) {
            Ok(text) => terminal.print_line(&text)?,
            Err(e) => terminal.print_error(&e.to_string())?,
        }
    }
    if loaded.schedules.is_empty() {
        terminal.print_info("no schedules found")?;
    }
    Ok(ExitCode::SUCCESS)
}

// ── occurrences ─────────────────────────────────────────────────────

fn occurrences(args: &OccurrencesArgs, settings: &Settings, terminal: &Terminal) -> Result<ExitCode> {
    let window = match (args.from, args.to) {
        (Some(from), Some(to)) => Some(
            Window::days(from, to, settings.options.offset)
                .context("window does not fit the supported date range")?,
        ),
        _ => None,
    };
    let loaded = load(&args.source, settings)?;

    match args.format {
        OutputFormat::Json => {
            terminal.print_json(&occurrence_report(&loaded.schedules, &settings.options, window.as_ref()))?;
        }
        OutputFormat::Text => {
            for s in &loaded.schedules {
                terminal.print_header(&s.record.display_name(), &source_label(&s.path))?;
                match try_occurrences(&s.record, &settings.options, window.as_ref()) {
                    Ok(dates) if dates.is_empty() => terminal.print_note("no occurrences")?,
                    Ok(dates) => {
                        for at in &dates {
                            terminal.print_line(&display_instant(at))?;
                        }
                    }
                    Err(e) => terminal.print_error(&e.to_string())?,
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn occurrence_report(
    schedules: &[LoadedSchedule],
    options: &ScheduleOptions,
    window: Option<&Window>,
) -> Value {
    let entries: Vec<Value> = schedules
        .iter()
        .map(|s| {
            let mut entry = json!({
                "name": s.record.display_name(),
                "source": source_label(&s.path),
            });
            match try_occurrences(&s.record, options, window) {
                Ok(dates) => {
                    let dates: Vec<String> = dates.iter().map(DateTime::to_rfc3339).collect();
                    entry["occurrences"] = json!(dates);
                }
                Err(e) => {
                    entry["occurrences"] = json!([]);
                    entry["error"] = json!(e.to_string());
                }
            }
            entry
        })
        .collect();
    Value::Array(entries)
}

// ── validate ────────────────────────────────────────────────────────

fn validate(args: &ReportArgs, settings: &Settings, terminal: &Terminal) -> Result<ExitCode> {
    let loaded = load(&args.source, settings)?;
    let results: Vec<(&LoadedSchedule, ValidationResult)> = loaded
        .schedules
        .iter()
        .map(|s| (s, validate_record(&s.record)))
        .collect();

    match args.format {
        OutputFormat::Json => {
            let entries: Vec<Value> = results
                .iter()
                .map(|(s, result)| {
                    json!({
                        "name": s.record.display_name(),
                        "source": source_label(&s.path),
                        "result": result,
                    })
                })
                .collect();
            terminal.print_json(&Value::Array(entries))?;
        }
        OutputFormat::Text => {
            for (s, result) in &results {
                terminal.print_header(&s.record.display_name(), &source_label(&s.path))?;
                print_validation(result, terminal)?;
            }
        }
    }

    let invalid = results.iter().filter(|(_, r)| !r.valid).count();
    if invalid > 0 || loaded.failed_files > 0 {
        info!(invalid, failed_files = loaded.failed_files, "validation failed");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_validation(result: &ValidationResult, terminal: &Terminal) -> Result<()> {
    for e in &result.errors {
        let location = if e.path.is_empty() { String::new() } else { format!("{}: ", e.path) };
        match &e.suggestion {
            Some(suggestion) => terminal.print_error(&format!("{location}{} ({suggestion})", e.message))?,
            None => terminal.print_error(&format!("{location}{}", e.message))?,
        }
    }
    for w in &result.warnings {
        terminal.print_warning(&format!("{}: {}", w.path, w.message))?;
    }
    if result.valid {
        terminal.print_ok("valid")?;
    }
    Ok(())
}

// ── view ────────────────────────────────────────────────────────────

fn view(args: &SourceArgs, settings: &Settings, terminal: &Terminal) -> Result<ExitCode> {
    let loaded = load(args, settings)?;
    let views = loaded
        .schedules
        .iter()
        .map(|s| ScheduleView::from_record(&s.record, &settings.options))
        .map(serde_json::to_value)
        .collect::<std::result::Result<Vec<_>, _>>()
        .context("failed to serialize schedule views")?;
    terminal.print_json(&Value::Array(views))?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use lifeos_schedule::ScheduleRecord;
    use std::path::PathBuf;

    fn schedule(name: &str, freq: i64) -> LoadedSchedule {
        LoadedSchedule {
            path: PathBuf::from("inline.yml"),
            record: ScheduleRecord {
                name: name.to_string(),
                freq: Some(freq),
                count: Some(2),
                start_date: Some("Jan 1, 2024".to_string()),
                start_time: Some("8:00 AM".to_string()),
                ..Default::default()
            },
        }
    }

    #[test]
    fn occurrence_report_lists_dates_and_errors() {
        let options = ScheduleOptions::new(FixedOffset::east_opt(3600).unwrap());
        let report = occurrence_report(&[schedule("Walk", 3), schedule("Broken", 42)], &options, None);

        assert_eq!(report[0]["name"], "Walk");
        assert_eq!(
            report[0]["occurrences"],
            json!(["2024-01-01T08:00:00+01:00", "2024-01-02T08:00:00+01:00"])
        );
        assert!(report[0].get("error").is_none());

        assert_eq!(report[1]["occurrences"], json!([]));
        assert!(report[1]["error"].as_str().unwrap().contains("42"));
    }

    #[test]
    fn occurrence_report_respects_window() {
        let offset = FixedOffset::east_opt(0).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let window = Window::days(day, day, offset).unwrap();
        let report = occurrence_report(&[schedule("Walk", 3)], &ScheduleOptions::new(offset), Some(&window));
        assert_eq!(report[0]["occurrences"], json!(["2024-01-02T08:00:00+00:00"]));
    }

    #[test]
    fn display_instant_uses_ui_format() {
        let at = FixedOffset::east_opt(0)
            .unwrap()
            .from_local_datetime(
                &NaiveDate::from_ymd_opt(2024, 3, 9)
                    .unwrap()
                    .and_hms_opt(18, 5, 0)
                    .unwrap(),
            )
            .unwrap();
        assert_eq!(display_instant(&at), "Mar 9, 2024 6:05 PM");
    }
}
