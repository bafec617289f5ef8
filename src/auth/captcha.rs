//! # CAPTCHA Verification
//!
//! The verification service is an external collaborator. Only the call
//! contract is implemented here: post the token with the server secret and
//! read back `success`. Every failure mode is a rejection.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

pub const DEFAULT_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Upper bound on a single siteverify round trip
pub const DEFAULT_VERIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Verifies a client-supplied CAPTCHA token.
#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    /// Returns `true` only when the token is confirmed valid.
    async fn verify(&self, token: &str) -> bool;
}

#[derive(Debug, Deserialize)]
struct SiteVerifyResponse {
    #[serde(default)]
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

/// reCAPTCHA `siteverify` client.
pub struct RecaptchaVerifier {
    client: reqwest::Client,
    secret: Option<String>,
    verify_url: String,
}

impl RecaptchaVerifier {
    pub fn new(secret: Option<String>, verify_url: impl Into<String>) -> Self {
        Self::with_timeout(secret, verify_url, DEFAULT_VERIFY_TIMEOUT)
    }

    pub fn with_timeout(secret: Option<String>, verify_url: impl Into<String>, timeout: Duration) -> Self {
        let client = match reqwest::Client::builder().timeout(timeout).build() {
            Ok(client) => client,
            Err(e) => {
                warn!(error = %e, "captcha http client setup failed, falling back to a client without timeout");
                reqwest::Client::new()
            }
        };

        Self {
            client,
            secret: secret.filter(|s| !s.is_empty()),
            verify_url: verify_url.into(),
        }
    }

    async fn site_verify(&self, secret: &str, token: &str) -> Result<SiteVerifyResponse, reqwest::Error> {
        self.client
            .post(&self.verify_url)
            .form(&[("secret", secret), ("response", token)])
            .send()
            .await?
            .error_for_status()?
            .json::<SiteVerifyResponse>()
            .await
    }
}

#[async_trait]
impl CaptchaVerifier for RecaptchaVerifier {
    async fn verify(&self, token: &str) -> bool {
        let Some(secret) = self.secret.as_deref() else {
            warn!("captcha secret not configured, rejecting submission");
            return false;
        };
        if token.is_empty() {
            debug!("empty captcha token");
            return false;
        }

        match self.site_verify(secret, token).await {
            Ok(response) => {
                if !response.success {
                    debug!(error_codes = ?response.error_codes, "captcha rejected");
                }
                response.success
            }
            Err(e) => {
                warn!(error = %e, "captcha verification request failed");
                false
            }
        }
    }
}

/// Verifier with a fixed answer, for tests and local development.
#[derive(Debug, Clone, Copy)]
pub struct FixedCaptchaVerifier(pub bool);

#[async_trait]
impl CaptchaVerifier for FixedCaptchaVerifier {
    async fn verify(&self, _token: &str) -> bool {
        self.0
    }
}
