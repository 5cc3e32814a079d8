//! Tests for the schedule loader module.

use std::fs;

use tempfile::TempDir;

use super::*;

const GYM_YAML: &str = r#"
id: 1
name: Gym
freq: 2
byWeekDay: [MO, WE, FR]
byHour: [7]
startDate: Jan 1, 2024
"#;

const PAGE_JSON: &str = r#"{
  "results": [
    {"id": 2, "name": "Rent", "freq": 1, "byMonthDay": ["1"], "startDate": "Jan 1, 2024"},
    {"id": 3, "name": "Review", "freq": 2, "interval": "2", "startDate": "2024-01-05"}
  ],
  "count": 2,
  "next": null,
  "previous": null,
  "currentPage": 1,
  "totalPages": 1,
  "ids": [2, 3]
}"#;

fn temp_loader() -> (TempDir, ScheduleLoader) {
    let dir = TempDir::new().expect("create tempdir");
    let loader = ScheduleLoader::new(dir.path());
    (dir, loader)
}

fn loaded(results: &[LoadResult]) -> usize {
    results
        .iter()
        .filter(|r| matches!(r.status, LoadStatus::Loaded { .. }))
        .count()
}

#[test]
fn parse_single_record() {
    let records = ScheduleLoader::parse_str(GYM_YAML, FileFormat::Yaml).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Gym");
    assert_eq!(records[0].by_week_day, vec!["MO", "WE", "FR"]);
}

#[test]
fn parse_list_of_records() {
    let yaml = "- {name: A, freq: 3, startDate: 2024-01-01}\n- {name: B, freq: 0, startDate: 2024-06-01}\n";
    let records = ScheduleLoader::parse_str(yaml, FileFormat::Yaml).unwrap();
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[test]
fn parse_paginated_page() {
    let records = ScheduleLoader::parse_str(PAGE_JSON, FileFormat::Json).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].by_month_day, vec![1]);
    assert_eq!(records[1].interval, Some(2));
}

#[test]
fn parse_envelope_around_page_and_record() {
    let wrapped = format!(r#"{{"ok": true, "data": {PAGE_JSON}, "details": ""}}"#);
    let records = ScheduleLoader::parse_str(&wrapped, FileFormat::Json).unwrap();
    assert_eq!(records.len(), 2);

    let single = r#"{"ok": true, "data": {"name": "Solo", "freq": 3, "startDate": "Mar 1, 2024"}}"#;
    let records = ScheduleLoader::parse_str(single, FileFormat::Json).unwrap();
    assert_eq!(records[0].name, "Solo");
}

#[test]
fn failed_envelope_is_an_error() {
    let body = r#"{"ok": false, "data": null, "details": "Network Error"}"#;
    let err = ScheduleLoader::parse_str(body, FileFormat::Json).unwrap_err();
    assert!(matches!(err, LoadError::Envelope(_)));
    assert!(err.to_string().contains("Network Error"));
}

#[test]
fn scalar_document_is_rejected() {
    let err = ScheduleLoader::parse_str("42", FileFormat::Json).unwrap_err();
    assert!(matches!(err, LoadError::Record(_)));
}

#[test]
fn load_all_skips_dotfiles_and_other_extensions() {
    let (dir, mut loader) = temp_loader();

    fs::write(dir.path().join("gym.yml"), GYM_YAML).unwrap();
    fs::write(dir.path().join(".hidden.yml"), GYM_YAML).unwrap();
    fs::write(dir.path().join("readme.txt"), "not a schedule").unwrap();

    let results = loader.load_all().unwrap();
    let skipped = results
        .iter()
        .filter(|r| matches!(r.status, LoadStatus::Skipped { .. }))
        .count();

    assert_eq!(loaded(&results), 1);
    assert_eq!(skipped, 2);
    assert_eq!(loader.schedules().len(), 1);
    assert_eq!(loader.schedules()[0].record.name, "Gym");
}

#[test]
fn load_all_recurses_in_path_order() {
    let (dir, mut loader) = temp_loader();
    let nested = dir.path().join("b-nested");
    fs::create_dir_all(&nested).unwrap();

    fs::write(dir.path().join("a.json"), PAGE_JSON).unwrap();
    fs::write(nested.join("gym.yaml"), GYM_YAML).unwrap();

    let results = loader.load_all().unwrap();
    assert_eq!(loaded(&results), 2);

    let names: Vec<&str> = loader
        .schedules()
        .iter()
        .map(|s| s.record.name.as_str())
        .collect();
    assert_eq!(names, vec!["Rent", "Review", "Gym"]);
    assert!(loader.schedules()[2].path.ends_with("b-nested/gym.yaml"));
}

#[test]
fn bad_file_is_reported_not_fatal() {
    let (dir, mut loader) = temp_loader();
    fs::write(dir.path().join("bad.json"), "{ not json").unwrap();
    fs::write(dir.path().join("bad-field.yml"), "byHour: [nine]\n").unwrap();
    fs::write(dir.path().join("gym.yml"), GYM_YAML).unwrap();

    let results = loader.load_all().unwrap();
    let failed: Vec<&LoadResult> = results.iter().filter(|r| r.is_failed()).collect();
    assert_eq!(failed.len(), 2);
    assert_eq!(loaded(&results), 1);
    assert_eq!(loader.schedules().len(), 1);
}

#[test]
fn load_all_accepts_a_single_file_root() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("one.yml");
    fs::write(&path, GYM_YAML).unwrap();

    let mut loader = ScheduleLoader::new(&path);
    let results = loader.load_all().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(loader.into_schedules().len(), 1);
}

#[test]
fn missing_root_is_an_error() {
    let dir = TempDir::new().unwrap();
    let mut loader = ScheduleLoader::new(dir.path().join("nope"));
    assert!(matches!(loader.load_all(), Err(LoadError::Io(_))));
}

#[test]
fn reload_replaces_previous_schedules() {
    let (dir, mut loader) = temp_loader();
    fs::write(dir.path().join("gym.yml"), GYM_YAML).unwrap();
    loader.load_all().unwrap();
    loader.load_all().unwrap();
    assert_eq!(loader.schedules().len(), 1);
}
