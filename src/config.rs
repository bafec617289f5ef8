//! Service configuration
//!
//! Everything is read from the environment (a `.env` file is loaded first by
//! the binary). Unset variables fall back to defaults; malformed values are
//! reported as [`ConfigError`] rather than silently replaced.
//!
//! | Variable               | Default                                           |
//! |------------------------|---------------------------------------------------|
//! | `HOST`                 | `0.0.0.0`                                         |
//! | `PORT`                 | `5000`                                            |
//! | `DATABASE_URL`         | `sqlite://database.db`                            |
//! | `CORS_ORIGINS`         | empty (any origin)                                |
//! | `RECAPTCHA_SECRET_KEY` | unset (every submission fails CAPTCHA)            |
//! | `RECAPTCHA_VERIFY_URL` | `https://www.google.com/recaptcha/api/siteverify` |
//! | `CAPTCHA_BYPASS`       | `false`                                           |
//! | `ADMIN_KEY`            | unset (admin routes always 401)                   |
//! | `LOG_FORMAT`           | `pretty`                                          |

use std::env;

use thiserror::Error;

use crate::auth::DEFAULT_VERIFY_URL;
use crate::observability::LogFormat;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://database.db";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Listener settings
#[derive(Debug, Clone, PartialEq)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,
}

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// CAPTCHA collaborator settings
#[derive(Clone, PartialEq)]
pub struct CaptchaConfig {
    pub secret: Option<String>,
    pub verify_url: String,
    /// Accept every token without calling the verification service
    pub bypass: bool,
}

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self {
            secret: None,
            verify_url: DEFAULT_VERIFY_URL.to_string(),
            bypass: false,
        }
    }
}

impl std::fmt::Debug for CaptchaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptchaConfig")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("verify_url", &self.verify_url)
            .field("bypass", &self.bypass)
            .finish()
    }
}

/// Full service configuration
#[derive(Clone, PartialEq)]
pub struct ServiceConfig {
    pub http: HttpServerConfig,
    pub database_url: String,
    pub captcha: CaptchaConfig,
    pub admin_key: Option<String>,
    pub log_format: LogFormat,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            http: HttpServerConfig::default(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            captcha: CaptchaConfig::default(),
            admin_key: None,
            log_format: LogFormat::default(),
        }
    }
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("http", &self.http)
            .field("database_url", &self.database_url)
            .field("captcha", &self.captcha)
            .field("admin_key", &self.admin_key.as_ref().map(|_| "<redacted>"))
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl ServiceConfig {
    /// Reads the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let port = match var("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                key: "PORT",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => defaults.http.port,
        };

        let cors_origins = var("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let bypass = match var("CAPTCHA_BYPASS") {
            Some(raw) => parse_flag("CAPTCHA_BYPASS", &raw)?,
            None => false,
        };

        let log_format = match var("LOG_FORMAT") {
            Some(raw) => raw.parse::<LogFormat>().map_err(|reason| ConfigError::InvalidValue {
                key: "LOG_FORMAT",
                value: raw.clone(),
                reason,
            })?,
            None => defaults.log_format,
        };

        Ok(Self {
            http: HttpServerConfig {
                host: var("HOST").unwrap_or(defaults.http.host),
                port,
                cors_origins,
            },
            database_url: var("DATABASE_URL").unwrap_or(defaults.database_url),
            captcha: CaptchaConfig {
                secret: var("RECAPTCHA_SECRET_KEY"),
                verify_url: var("RECAPTCHA_VERIFY_URL").unwrap_or(defaults.captcha.verify_url),
                bypass,
            },
            admin_key: var("ADMIN_KEY"),
            log_format,
        })
    }
}

fn parse_flag(key: &'static str, raw: &str) -> ConfigResult<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_empty() {
        let config = ServiceConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.http.socket_addr(), "0.0.0.0:5000");
        assert_eq!(config.database_url, "sqlite://database.db");
        assert_eq!(config.captcha.verify_url, DEFAULT_VERIFY_URL);
        assert!(config.admin_key.is_none());
    }

    #[test]
    fn test_reads_all_variables() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DATABASE_URL", "sqlite://survey.db"),
            ("CORS_ORIGINS", "https://a.example, https://b.example,"),
            ("RECAPTCHA_SECRET_KEY", "cap"),
            ("RECAPTCHA_VERIFY_URL", "http://localhost:1/verify"),
            ("CAPTCHA_BYPASS", "yes"),
            ("ADMIN_KEY", "adm"),
            ("LOG_FORMAT", "json"),
        ]))
        .unwrap();

        assert_eq!(config.http.socket_addr(), "127.0.0.1:8080");
        assert_eq!(
            config.http.cors_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(config.database_url, "sqlite://survey.db");
        assert_eq!(config.captcha.secret.as_deref(), Some("cap"));
        assert_eq!(config.captcha.verify_url, "http://localhost:1/verify");
        assert!(config.captcha.bypass);
        assert_eq!(config.admin_key.as_deref(), Some("adm"));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_with_port_keeps_default_host() {
        let http = HttpServerConfig::with_port(8081);
        assert_eq!(http.socket_addr(), format!("{}:8081", DEFAULT_HOST));
        assert!(http.cors_origins.is_empty());
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let err = ServiceConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "PORT", .. }));
    }

    #[test]
    fn test_invalid_flag_is_an_error() {
        assert!(ServiceConfig::from_lookup(lookup(&[("CAPTCHA_BYPASS", "maybe")])).is_err());
    }

    #[test]
    fn test_blank_secret_is_unset() {
        let config = ServiceConfig::from_lookup(lookup(&[("ADMIN_KEY", "   ")])).unwrap();
        assert!(config.admin_key.is_none());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("ADMIN_KEY", "adm-secret"),
            ("RECAPTCHA_SECRET_KEY", "cap-secret"),
        ]))
        .unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("adm-secret"));
        assert!(!debug.contains("cap-secret"));
    }
}
