//! # Survey
//!
//! Record types for admission survey responses and the submission
//! validator that guards the store.

mod errors;
mod types;
mod validator;

pub use errors::{SubmissionError, SubmissionResult};
pub use types::{
    Gender, Major, NewSurvey, Program, RawSubmission, SurveyRecord, SurveySample, UnknownLiteral,
};
pub use validator::{
    is_truthy, validate_submission, GPA_MAX, GPA_MIN, NAME_MAX_CHARS, NAME_MIN_CHARS,
};
