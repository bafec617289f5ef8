//! admission-survey - collects admission survey responses and publishes
//! cutoff statistics for one major.
//!
//! Submissions pass a CAPTCHA check and field validation before landing in a
//! SQLite table. The statistics endpoint scans that table and aggregates the
//! cohort; an admin surface behind a shared secret lists and deletes rows.

pub mod auth;
pub mod cli;
pub mod config;
pub mod http_server;
pub mod observability;
pub mod stats;
pub mod store;
pub mod survey;
