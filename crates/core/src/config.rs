use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{FixedOffset, Local, Offset};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub schedule: ScheduleConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `LIFEOS_PROFILE` env var. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("LIFEOS_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            schedule: ScheduleConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  schedule:    offset={}, preview_count={}, data_dir={}",
            self.schedule.utc_offset,
            self.schedule.preview_count,
            self.schedule.data_dir.display()
        );
    }
}

// ── Schedule ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Offset used to interpret schedule wall-clock times.
    pub utc_offset: OffsetSetting,
    /// Number of occurrences previewed for schedules without a count.
    pub preview_count: usize,
    /// Default root for schedule record files.
    pub data_dir: PathBuf,
}

pub const DEFAULT_PREVIEW_COUNT: usize = 5;

impl ScheduleConfig {
    fn from_env_profiled(p: &str) -> Self {
        let utc_offset = match profiled_env_opt(p, "SCHEDULE_UTC_OFFSET") {
            Some(raw) => raw.parse().unwrap_or_else(|e: CoreError| {
                tracing::warn!(error = %e, "falling back to local offset");
                OffsetSetting::Local
            }),
            None => OffsetSetting::Local,
        };
        Self {
            utc_offset,
            preview_count: profiled_env_usize(p, "SCHEDULE_PREVIEW_COUNT", DEFAULT_PREVIEW_COUNT),
            data_dir: PathBuf::from(profiled_env_or(p, "SCHEDULE_DATA_DIR", "data/schedules")),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            utc_offset: OffsetSetting::Local,
            preview_count: DEFAULT_PREVIEW_COUNT,
            data_dir: PathBuf::from("data/schedules"),
        }
    }
}

// ── UTC offset ────────────────────────────────────────────────

/// How schedule wall-clock times map to instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OffsetSetting {
    /// The host's current local offset, read when resolved.
    Local,
    Fixed(FixedOffset),
}

impl OffsetSetting {
    /// Resolve to a concrete offset. `Local` reads the system clock.
    pub fn resolve(&self) -> FixedOffset {
        match self {
            OffsetSetting::Local => Local::now().offset().fix(),
            OffsetSetting::Fixed(offset) => *offset,
        }
    }
}

impl FromStr for OffsetSetting {
    type Err = CoreError;

    /// Accepts `local`, `Z`/`UTC`, `+HH:MM`, `+HHMM`, and `+HH`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let invalid = || CoreError::InvalidOffset(s.to_string());

        match raw.to_ascii_lowercase().as_str() {
            "local" => return Ok(OffsetSetting::Local),
            "z" | "utc" | "gmt" => {
                return FixedOffset::east_opt(0).map(OffsetSetting::Fixed).ok_or_else(invalid)
            }
            _ => {}
        }

        let (sign, rest) = match raw.chars().next() {
            Some('+') => (1, &raw[1..]),
            Some('-') => (-1, &raw[1..]),
            _ => return Err(invalid()),
        };
        let digits: String = rest.chars().filter(|c| *c != ':').collect();
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let (hours, minutes) = match digits.len() {
            2 => (digits.parse::<i32>().map_err(|_| invalid())?, 0),
            4 => (
                digits[..2].parse::<i32>().map_err(|_| invalid())?,
                digits[2..].parse::<i32>().map_err(|_| invalid())?,
            ),
            _ => return Err(invalid()),
        };
        if hours > 23 || minutes > 59 {
            return Err(invalid());
        }

        FixedOffset::east_opt(sign * (hours * 3_600 + minutes * 60))
            .map(OffsetSetting::Fixed)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for OffsetSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OffsetSetting::Local => write!(f, "local"),
            OffsetSetting::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

impl TryFrom<String> for OffsetSetting {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OffsetSetting> for String {
    fn from(value: OffsetSetting) -> Self {
        value.to_string()
    }
}
