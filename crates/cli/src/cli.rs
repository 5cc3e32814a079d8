use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use lifeos_core::OffsetSetting;
use lifeos_schedule::builder::normalize::parse_date;

/// Describe, evaluate and validate lifeos schedule records.
///
/// Records are read from a JSON/YAML file or a directory of them: single
/// records, lists, paginated API pages, or API result envelopes.
#[derive(Parser, Debug)]
#[command(name = "lifeos-schedule", version, about)]
pub struct CliArgs {
    /// Configuration profile; keys are looked up as `{PROFILE}_{KEY}` first
    #[arg(long, global = true, env = "LIFEOS_PROFILE")]
    pub profile: Option<String>,

    /// UTC offset for wall-clock times: `local`, `Z`, or `+HH:MM` (overrides SCHEDULE_UTC_OFFSET)
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub offset: Option<OffsetSetting>,

    /// Occurrences previewed for schedules without a count (overrides SCHEDULE_PREVIEW_COUNT)
    #[arg(long, global = true)]
    pub preview_count: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the plain-English definition of each schedule
    Describe(SourceArgs),
    /// List the occurrences of each schedule
    Occurrences(OccurrencesArgs),
    /// Report every problem in each schedule; exits non-zero if any is invalid
    Validate(ReportArgs),
    /// Print the derived view of each schedule as JSON
    View(SourceArgs),
}

#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Schedule file or directory (default: SCHEDULE_DATA_DIR)
    pub path: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct OccurrencesArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// First day of the window, `YYYY-MM-DD` or `MMM D, YYYY`
    #[arg(long, requires = "to", value_parser = parse_day)]
    pub from: Option<NaiveDate>,

    /// Last day of the window, inclusive
    #[arg(long, requires = "from", value_parser = parse_day)]
    pub to: Option<NaiveDate>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

fn parse_day(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw).ok_or_else(|| format!("invalid date '{raw}', expected YYYY-MM-DD or MMM D, YYYY"))
}
