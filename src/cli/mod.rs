//! CLI module
//!
//! Provides the command-line interface:
//! - serve: open the store and run the HTTP service
//! - init: create the survey table
//! - stats: print the cohort statistics once

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run_command, serve, stats};
pub use errors::{CliError, CliResult};

use tracing::info;

use crate::config::ServiceConfig;
use crate::observability::{init_logging, Event};

/// Parses arguments, loads configuration and runs the selected command.
pub async fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    dotenv::dotenv().ok();
    let config = ServiceConfig::from_env()?;
    init_logging(config.log_format);
    info!(event = Event::ConfigLoaded.as_str(), config = ?config, "configuration loaded");

    run_command(cli.command, config).await
}
