//! # Admin Gate
//!
//! Stateless shared-secret check in front of the admin routes.
//! The credential is read from the `X-Admin-Key` header, falling back to the
//! `admin_key` query parameter. Comparison is constant time.

use axum::http::HeaderMap;
use subtle::ConstantTimeEq;

pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Constant-time comparison of two strings
pub fn constant_time_str_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Equality check against the configured admin secret.
#[derive(Clone)]
pub struct AdminGate {
    secret: Option<String>,
}

impl std::fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGate")
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl AdminGate {
    /// An empty secret is treated as not configured.
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    /// A gate that rejects every request.
    pub fn locked() -> Self {
        Self { secret: None }
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Checks a single credential.
    pub fn check(&self, credential: Option<&str>) -> bool {
        match (&self.secret, credential) {
            (Some(secret), Some(given)) => constant_time_str_eq(secret, given),
            _ => false,
        }
    }

    /// Picks the credential from the request: header first, then query.
    /// An empty or non-UTF-8 header counts as absent.
    pub fn credential<'a>(headers: &'a HeaderMap, query_key: Option<&'a str>) -> Option<&'a str> {
        headers
            .get(ADMIN_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|s| !s.is_empty())
            .or(query_key)
    }

    /// Authorizes a request given its headers and optional `admin_key` query value.
    pub fn authorize(&self, headers: &HeaderMap, query_key: Option<&str>) -> bool {
        self.check(Self::credential(headers, query_key))
    }
}
