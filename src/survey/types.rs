//! Survey record types
//!
//! Three enumerated fields with fixed lowercase literals, plus the record
//! shapes used at each stage: raw request body, validated record, persisted
//! record and the aggregation sample.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declared major of the respondent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Major {
    Computer,
    Electrical,
    Other,
}

impl Major {
    pub const ALL: [Major; 3] = [Major::Computer, Major::Electrical, Major::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Major::Computer => "computer",
            Major::Electrical => "electrical",
            Major::Other => "other",
        }
    }
}

/// Program track the respondent was admitted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Program {
    Regular,
    Management,
    Society,
}

impl Program {
    pub const ALL: [Program; 3] = [Program::Regular, Program::Management, Program::Society];

    pub fn as_str(&self) -> &'static str {
        match self {
            Program::Regular => "regular",
            Program::Management => "management",
            Program::Society => "society",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

/// Error returned when a literal is not part of an enumerated set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLiteral(pub String);

impl fmt::Display for UnknownLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown literal '{}'", self.0)
    }
}

impl std::error::Error for UnknownLiteral {}

macro_rules! literal_enum {
    ($ty:ident) => {
        impl FromStr for $ty {
            type Err = UnknownLiteral;

            /// Exact, case-sensitive match against `as_str()`.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::ALL
                    .into_iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| UnknownLiteral(s.to_string()))
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

literal_enum!(Major);
literal_enum!(Program);
literal_enum!(Gender);

/// Untyped submission body as received from the public form.
///
/// Every field is kept as an arbitrary JSON value so the validator can apply
/// its own coercion rules.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSubmission {
    #[serde(default)]
    pub captcha: Option<Value>,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub gpa: Option<Value>,
    #[serde(default)]
    pub first_choice: Option<Value>,
    #[serde(default)]
    pub major: Option<Value>,
    #[serde(default)]
    pub program: Option<Value>,
    #[serde(default)]
    pub gender: Option<Value>,
}

impl RawSubmission {
    /// Build from any JSON value. Non-object bodies become an empty submission.
    ///
    /// Arrays are rejected here explicitly: serde would otherwise map their
    /// elements onto the fields by position.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    /// CAPTCHA token, or an empty string when absent or not a string.
    pub fn captcha_token(&self) -> &str {
        self.captcha.as_ref().and_then(Value::as_str).unwrap_or("")
    }
}

/// A validated record that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSurvey {
    pub name: String,
    pub gpa: f64,
    pub first_choice: bool,
    pub major: Major,
    pub program: Program,
    pub gender: Gender,
}

/// A persisted survey row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyRecord {
    pub id: i64,
    pub name: String,
    pub gpa: f64,
    pub first_choice: bool,
    pub major: Major,
    pub program: Program,
    pub gender: Gender,
}

/// Aggregation input: one row without identity.
///
/// `major` and `gender` stay as stored strings; the aggregator ignores
/// values it does not recognise.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveySample {
    pub gpa: f64,
    pub first_choice: bool,
    pub major: String,
    pub program: String,
    pub gender: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_literals_are_case_sensitive() {
        assert_eq!("computer".parse::<Major>(), Ok(Major::Computer));
        assert!("Computer".parse::<Major>().is_err());
        assert!("MALE".parse::<Gender>().is_err());
        assert_eq!("society".parse::<Program>(), Ok(Program::Society));
    }

    #[test]
    fn test_raw_submission_from_non_object() {
        let raw = RawSubmission::from_value(json!([1, 2, 3]));
        assert!(raw.name.is_none());
        assert_eq!(raw.captcha_token(), "");

        for body in [json!("text"), json!(42), json!(null), json!(true)] {
            let raw = RawSubmission::from_value(body);
            assert!(raw.captcha.is_none());
            assert!(raw.gpa.is_none());
        }
    }

    #[test]
    fn test_positional_array_is_not_a_submission() {
        let raw = RawSubmission::from_value(json!([
            "tok",
            "Alan Turing",
            8.0,
            true,
            "computer",
            "regular",
            "male"
        ]));
        assert_eq!(raw.captcha_token(), "");
        assert!(raw.name.is_none());
        assert!(raw.major.is_none());
    }

    #[test]
    fn test_captcha_token_ignores_non_strings() {
        let raw = RawSubmission::from_value(json!({"captcha": 42}));
        assert_eq!(raw.captcha_token(), "");

        let raw = RawSubmission::from_value(json!({"captcha": "tok"}));
        assert_eq!(raw.captcha_token(), "tok");
    }

    #[test]
    fn test_record_serialization_uses_lowercase_literals() {
        let record = SurveyRecord {
            id: 7,
            name: "Ada".to_string(),
            gpa: 9.5,
            first_choice: true,
            major: Major::Electrical,
            program: Program::Management,
            gender: Gender::Female,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 7,
                "name": "Ada",
                "gpa": 9.5,
                "first_choice": true,
                "major": "electrical",
                "program": "management",
                "gender": "female"
            })
        );
    }
}
