//! # Cohort Statistics
//!
//! Admission cutoff and distribution breakdowns over one major's responses.
//!
//! The cutoff is the lowest GPA among respondents who did not rank the
//! program as their first choice. First-choice respondents are split into
//! above/below that cutoff; when no cutoff exists they fall in neither bucket.

mod aggregator;

pub use aggregator::{Aggregator, CohortStats, GenderCounts, PieBreakdown, GPA_BIN_BOUNDS};
