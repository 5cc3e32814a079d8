//! Core [`ScheduleLoader`] struct: filesystem-backed schedule loading.

use std::fs;
use std::path::{Path, PathBuf};

use lifeos_core::{ApiResult, Page};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use crate::record::ScheduleRecord;

use super::error::{LoadError, LoadResult, LoadStatus, Result};

/// Serialization format of a schedule file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(FileFormat::Json),
            Some("yml" | "yaml") => Some(FileFormat::Yaml),
            _ => None,
        }
    }
}

/// A record together with the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedSchedule {
    pub path: PathBuf,
    pub record: ScheduleRecord,
}

/// Filesystem-backed schedule loader.
///
/// The root may be a single file or a directory, which is scanned
/// recursively in path order. Records keep file order, then the order
/// inside each file.
pub struct ScheduleLoader {
    root: PathBuf,
    schedules: Vec<LoadedSchedule>,
}

impl ScheduleLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            schedules: Vec::new(),
        }
    }

    /// Load every schedule file under the root, replacing anything loaded
    /// before.
    ///
    /// Dotfiles and unsupported extensions are skipped. Parse errors are
    /// reported per-file but do not abort the scan. A missing root is an
    /// error.
    pub fn load_all(&mut self) -> Result<Vec<LoadResult>> {
        self.schedules.clear();
        let mut results = Vec::new();
        let root = self.root.clone();
        if fs::metadata(&root)?.is_dir() {
            self.scan_dir_recursive(&root, &mut results)?;
        } else {
            self.load_entry(root, &mut results);
        }
        Ok(results)
    }

    /// Recursively scan a directory for schedule files.
    fn scan_dir_recursive(&mut self, dir: &Path, results: &mut Vec<LoadResult>) -> Result<()> {
        let entries = match fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                warn!(path = %dir.display(), error = %e, "failed to read directory");
                return Ok(());
            }
        };

        let mut paths = Vec::new();
        for entry in entries {
            paths.push(entry?.path());
        }
        paths.sort();

        for path in paths {
            // Skip dotfiles/dotdirs
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.starts_with('.') {
                    if path.is_file() {
                        results.push(LoadResult {
                            path,
                            status: LoadStatus::Skipped {
                                reason: "dotfile".to_string(),
                            },
                        });
                    }
                    continue;
                }
            }

            if path.is_dir() {
                self.scan_dir_recursive(&path, results)?;
                continue;
            }

            self.load_entry(path, results);
        }

        Ok(())
    }

    fn load_entry(&mut self, path: PathBuf, results: &mut Vec<LoadResult>) {
        if FileFormat::from_path(&path).is_none() {
            results.push(LoadResult {
                path,
                status: LoadStatus::Skipped {
                    reason: "not a JSON or YAML file".to_string(),
                },
            });
            return;
        }

        match Self::load_file(&path) {
            Ok(records) => {
                info!(path = %path.display(), records = records.len(), "loaded schedules");
                let count = records.len();
                self.schedules.extend(records.into_iter().map(|record| LoadedSchedule {
                    path: path.clone(),
                    record,
                }));
                results.push(LoadResult {
                    path,
                    status: LoadStatus::Loaded { records: count },
                });
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load schedule file");
                results.push(LoadResult {
                    path,
                    status: LoadStatus::Failed {
                        error: e.to_string(),
                    },
                });
            }
        }
    }

    /// Parse a single schedule file. The format follows the extension;
    /// anything but `.json` is read as YAML.
    pub fn load_file(path: &Path) -> Result<Vec<ScheduleRecord>> {
        let contents = fs::read_to_string(path)?;
        let format = FileFormat::from_path(path).unwrap_or(FileFormat::Yaml);
        Self::parse_str(&contents, format)
    }

    /// Parse schedule records from text in the given format.
    pub fn parse_str(contents: &str, format: FileFormat) -> Result<Vec<ScheduleRecord>> {
        let value: Value = match format {
            FileFormat::Json => serde_json::from_str(contents)?,
            FileFormat::Yaml => serde_yaml::from_str(contents)?,
        };
        records_from_value(value)
    }

    /// Get the root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Schedules read by the last [`load_all`](Self::load_all).
    pub fn schedules(&self) -> &[LoadedSchedule] {
        &self.schedules
    }

    pub fn into_schedules(self) -> Vec<LoadedSchedule> {
        self.schedules
    }
}

/// Unwrap the accepted document shapes down to records: envelope, page,
/// list, single record. An empty document holds no records.
fn records_from_value(value: Value) -> Result<Vec<ScheduleRecord>> {
    match Shape::of(&value) {
        Shape::Empty => Ok(Vec::new()),
        Shape::List => decode(value),
        Shape::Envelope => {
            let envelope: ApiResult<Value> = decode(value)?;
            if !envelope.ok {
                return Err(LoadError::Envelope(envelope.details.to_string()));
            }
            match envelope.into_data() {
                Some(data) => records_from_value(data),
                None => Ok(Vec::new()),
            }
        }
        Shape::Page => {
            let page: Page<ScheduleRecord> = decode(value)?;
            Ok(page.results)
        }
        Shape::Record => Ok(vec![decode(value)?]),
        Shape::Scalar => Err(LoadError::Record(format!(
            "expected a record, list, page or envelope, got {value}"
        ))),
    }
}

enum Shape {
    Empty,
    List,
    Envelope,
    Page,
    Record,
    Scalar,
}

impl Shape {
    fn of(value: &Value) -> Self {
        match value {
            Value::Null => Shape::Empty,
            Value::Array(_) => Shape::List,
            Value::Object(map) if map.contains_key("ok") => Shape::Envelope,
            Value::Object(map) if map.contains_key("results") => Shape::Page,
            Value::Object(_) => Shape::Record,
            _ => Shape::Scalar,
        }
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| LoadError::Record(e.to_string()))
}
