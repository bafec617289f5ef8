//! # Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer faults. None of these are recoverable by the caller.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Driver, connection or constraint failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The id list could not be encoded for binding
    #[error("encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    /// A row read back with a value outside its declared set
    #[error("corrupt row {id}: column '{column}' holds '{value}'")]
    CorruptRow {
        id: i64,
        column: &'static str,
        value: String,
    },
}
