//! # Auth Module
//!
//! Gatekeeping for the two non-public concerns of the service: the admin
//! shared secret and the CAPTCHA check that precedes every submission.

pub mod admin;
pub mod captcha;

pub use admin::{constant_time_str_eq, AdminGate, ADMIN_KEY_HEADER};
pub use captcha::{CaptchaVerifier, FixedCaptchaVerifier, RecaptchaVerifier, DEFAULT_VERIFY_TIMEOUT, DEFAULT_VERIFY_URL};
