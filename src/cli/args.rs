//! CLI argument definitions using clap
//!
//! Commands:
//! - admission-survey serve [--port N] [--database URL]
//! - admission-survey init [--database URL]
//! - admission-survey stats [--database URL]

use clap::{Parser, Subcommand};

/// Admission survey collector with cutoff statistics
#[derive(Parser, Debug)]
#[command(name = "admission-survey")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Start the HTTP service
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(long)]
        port: Option<u16>,

        /// SQLite database URL (overrides DATABASE_URL)
        #[arg(long)]
        database: Option<String>,
    },

    /// Create the survey table if it does not exist, then exit
    Init {
        /// SQLite database URL (overrides DATABASE_URL)
        #[arg(long)]
        database: Option<String>,
    },

    /// Print the current cohort statistics as JSON and exit
    Stats {
        /// SQLite database URL (overrides DATABASE_URL)
        #[arg(long)]
        database: Option<String>,
    },
}

impl Command {
    /// Database URL override carried by the command, if any
    pub fn database_override(&self) -> Option<&str> {
        match self {
            Command::Serve { database, .. }
            | Command::Init { database }
            | Command::Stats { database } => database.as_deref(),
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
