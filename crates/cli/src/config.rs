use std::path::{Path, PathBuf};

use lifeos_core::{Config, ScheduleConfig};
use lifeos_schedule::ScheduleOptions;
use tracing::debug;

use crate::cli::CliArgs;

/// Effective settings: environment configuration with command-line
/// overrides applied.
#[derive(Debug, Clone)]
pub struct Settings {
    pub options: ScheduleOptions,
    /// Fallback source when no path is given.
    pub data_dir: PathBuf,
}

impl Settings {
    /// Read the environment (call `load_dotenv()` first) and apply `args`.
    pub fn load(args: &CliArgs) -> Self {
        let config = match args.profile.as_deref() {
            Some(profile) => Config::for_profile(profile),
            None => Config::from_env(),
        };
        config.log_summary();
        Self::from_config(config.schedule, args)
    }

    pub fn from_config(mut schedule: ScheduleConfig, args: &CliArgs) -> Self {
        if let Some(offset) = args.offset {
            schedule.utc_offset = offset;
        }
        if let Some(preview_count) = args.preview_count {
            schedule.preview_count = preview_count;
        }
        let options = ScheduleOptions::from_config(&schedule);
        debug!(
            offset = %options.offset,
            preview_count = options.preview_count,
            data_dir = %schedule.data_dir.display(),
            "resolved schedule settings"
        );
        Self {
            options,
            data_dir: schedule.data_dir,
        }
    }

    /// The path to read records from.
    pub fn source(&self, path: Option<&Path>) -> PathBuf {
        path.map_or_else(|| self.data_dir.clone(), Path::to_path_buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use lifeos_core::OffsetSetting;

    fn args(extra: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(["lifeos-schedule"].iter().chain(extra).copied()).unwrap()
    }

    fn fixed(raw: &str) -> OffsetSetting {
        raw.parse().unwrap()
    }

    #[test]
    fn config_values_apply_without_overrides() {
        let schedule = ScheduleConfig {
            utc_offset: fixed("+08:00"),
            preview_count: 7,
            data_dir: PathBuf::from("/srv/schedules"),
        };
        let settings = Settings::from_config(schedule, &args(&["describe"]));
        assert_eq!(settings.options.offset.local_minus_utc(), 8 * 3600);
        assert_eq!(settings.options.preview_count, 7);
        assert_eq!(settings.source(None), PathBuf::from("/srv/schedules"));
    }

    #[test]
    fn command_line_overrides_config() {
        let schedule = ScheduleConfig {
            utc_offset: fixed("+08:00"),
            ..ScheduleConfig::default()
        };
        let settings = Settings::from_config(
            schedule,
            &args(&["--offset", "-03:30", "--preview-count", "2", "describe", "one.yml"]),
        );
        assert_eq!(settings.options.offset.local_minus_utc(), -(3 * 3600 + 30 * 60));
        assert_eq!(settings.options.preview_count, 2);
        assert_eq!(
            settings.source(Some(Path::new("one.yml"))),
            PathBuf::from("one.yml")
        );
    }
}
