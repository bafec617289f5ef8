//! # Record Store
//!
//! Durable table of survey rows. Append-only from the public surface,
//! bulk-deletable by id from the admin surface. No update operation exists.

mod errors;
mod sqlite;

pub use errors::{StoreError, StoreResult};
pub use sqlite::SurveyStore;
