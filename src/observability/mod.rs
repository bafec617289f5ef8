//! Observability for the survey service
//!
//! - Structured logging through `tracing`
//! - Typed event names for lifecycle and audit lines
//!
//! # Usage
//!
//! ```ignore
//! use admission_survey::observability::{init_logging, Event, LogFormat};
//!
//! init_logging(LogFormat::Json);
//! tracing::info!(event = Event::ServerStart.as_str(), port = 5000, "listening");
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{init_logging, LogFormat};
