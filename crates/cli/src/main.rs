mod cli;
mod commands;
mod config;
mod terminal;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use crate::cli::CliArgs;
use crate::config::Settings;
use crate::terminal::Terminal;

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    lifeos_core::config::load_dotenv();
    let args = CliArgs::parse();
    let settings = Settings::load(&args);
    let terminal = Terminal::new();

    debug!(command = ?args.command, "running command");
    commands::run(&args.command, &settings, &terminal)
}
