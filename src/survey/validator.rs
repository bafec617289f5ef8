//! Submission validator
//!
//! Checks run in a fixed order and stop at the first failure:
//! name, gpa, major, program, gender. `first_choice` is coerced and
//! never fails. The CAPTCHA step is the caller's job and runs before this.

use std::str::FromStr;

use serde_json::Value;

use super::errors::{SubmissionError, SubmissionResult};
use super::types::{Gender, Major, NewSurvey, Program, RawSubmission};

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 40;
pub const GPA_MIN: f64 = 4.0;
pub const GPA_MAX: f64 = 12.0;

/// Validates a raw submission into a record ready for the store.
pub fn validate_submission(raw: &RawSubmission) -> SubmissionResult<NewSurvey> {
    let name = validate_name(raw.name.as_ref())?;
    let gpa = validate_gpa(raw.gpa.as_ref())?;
    let first_choice = raw.first_choice.as_ref().map(is_truthy).unwrap_or(false);
    let major = parse_literal::<Major>(raw.major.as_ref(), SubmissionError::InvalidMajor)?;
    let program = parse_literal::<Program>(raw.program.as_ref(), SubmissionError::InvalidProgram)?;
    let gender = parse_literal::<Gender>(raw.gender.as_ref(), SubmissionError::InvalidGender)?;

    Ok(NewSurvey {
        name,
        gpa,
        first_choice,
        major,
        program,
        gender,
    })
}

fn validate_name(value: Option<&Value>) -> SubmissionResult<String> {
    let name = value
        .and_then(Value::as_str)
        .map(str::trim)
        .ok_or(SubmissionError::InvalidName)?;

    let len = name.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len) {
        return Err(SubmissionError::InvalidName);
    }
    Ok(name.to_string())
}

fn validate_gpa(value: Option<&Value>) -> SubmissionResult<f64> {
    let gpa = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or(SubmissionError::InvalidGpa)?;

    if !gpa.is_finite() || !(GPA_MIN..=GPA_MAX).contains(&gpa) {
        return Err(SubmissionError::InvalidGpa);
    }
    Ok(gpa)
}

fn parse_literal<T: FromStr>(value: Option<&Value>, err: SubmissionError) -> SubmissionResult<T> {
    value
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<T>().ok())
        .ok_or(err)
}

/// JSON truthiness: null, false, zero, and empty strings/arrays/objects are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
