//! Observable events
//!
//! Every lifecycle or audit log line carries one of these names in its
//! `event` field.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration resolved from the environment
    ConfigLoaded,
    /// Store opened and schema ensured
    SchemaReady,
    /// Listener bound, serving requests
    ServerStart,
    /// Shutdown signal received
    Shutdown,

    // Public surface
    SubmissionAccepted,
    SubmissionRejected,

    // Admin surface
    /// Missing or wrong admin credential
    AdminDenied,
    RecordsListed,
    RecordsDeleted,

    /// Storage fault surfaced as a server error
    StoreFailure,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemaReady => "SCHEMA_READY",
            Event::ServerStart => "SERVER_START",
            Event::Shutdown => "SHUTDOWN",
            Event::SubmissionAccepted => "SUBMISSION_ACCEPTED",
            Event::SubmissionRejected => "SUBMISSION_REJECTED",
            Event::AdminDenied => "ADMIN_DENIED",
            Event::RecordsListed => "RECORDS_LISTED",
            Event::RecordsDeleted => "RECORDS_DELETED",
            Event::StoreFailure => "STORE_FAILURE",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_screaming_snake_case() {
        for event in [
            Event::ConfigLoaded,
            Event::SchemaReady,
            Event::ServerStart,
            Event::Shutdown,
            Event::SubmissionAccepted,
            Event::SubmissionRejected,
            Event::AdminDenied,
            Event::RecordsListed,
            Event::RecordsDeleted,
            Event::StoreFailure,
        ] {
            let name = event.as_str();
            assert!(name.chars().all(|c| c.is_ascii_uppercase() || c == '_'));
            assert_eq!(event.to_string(), name);
        }
    }
}
