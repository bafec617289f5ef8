//! CLI-specific error types
//!
//! All CLI errors are fatal: `main` prints them and exits non-zero.

use thiserror::Error;

use crate::config::ConfigError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl CliError {
    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(_) => "SURVEY_CLI_CONFIG_ERROR",
            CliError::Store(_) => "SURVEY_CLI_STORE_ERROR",
            CliError::Io(_) => "SURVEY_CLI_IO_ERROR",
            CliError::Serialize(_) => "SURVEY_CLI_SERIALIZE_ERROR",
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
