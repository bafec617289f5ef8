//! # Submission Errors
//!
//! Rejection reasons for public submissions. The display strings are the
//! exact response bodies returned to the client.

use thiserror::Error;

/// Result type for submission validation
pub type SubmissionResult<T> = Result<T, SubmissionError>;

/// Why a submission was not admitted to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// External CAPTCHA service did not confirm the token
    #[error("CAPTCHA failed")]
    CaptchaFailed,

    #[error("Invalid name")]
    InvalidName,

    /// Not a finite number, or outside [4.0, 12.0]
    #[error("Invalid GPA")]
    InvalidGpa,

    #[error("Invalid major")]
    InvalidMajor,

    #[error("Invalid program")]
    InvalidProgram,

    #[error("Invalid gender")]
    InvalidGender,
}

impl SubmissionError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        400
    }

    /// Short machine-readable name used in log lines
    pub fn kind(&self) -> &'static str {
        match self {
            SubmissionError::CaptchaFailed => "captcha_failed",
            SubmissionError::InvalidName => "invalid_name",
            SubmissionError::InvalidGpa => "invalid_gpa",
            SubmissionError::InvalidMajor => "invalid_major",
            SubmissionError::InvalidProgram => "invalid_program",
            SubmissionError::InvalidGender => "invalid_gender",
        }
    }
}
