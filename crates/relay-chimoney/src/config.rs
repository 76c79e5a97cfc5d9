//! # Chimoney Configuration
//!
//! Configuration management for the Chimoney integration.
//! The API key is only ever read from the environment.

use relay_core::RelayError;
use std::env;
use std::fmt;
use std::time::Duration;

/// Canonical production API root
pub const PRODUCTION_BASE_URL: &str = "https://api.chimoney.io/v0.2";

/// Sandbox API root
pub const SANDBOX_BASE_URL: &str = "https://api-v2-sandbox.chimoney.io/v0.2";

/// Header carrying the API key on every outbound call
pub const API_KEY_HEADER: &str = "X-API-KEY";

pub const ENV_API_KEY: &str = "CHIMONEY_API_KEY";
pub const ENV_BASE_URL: &str = "CHIMONEY_BASE_URL";
pub const ENV_SANDBOX: &str = "CHIMONEY_SANDBOX";
pub const ENV_TIMEOUT_SECS: &str = "CHIMONEY_TIMEOUT_SECS";

/// Chimoney API configuration
#[derive(Clone)]
pub struct ChimoneyConfig {
    /// API key sent as `X-API-KEY`
    pub api_key: String,

    /// API base URL, without trailing slash
    pub api_base_url: String,

    /// Outbound request timeout; `None` waits as long as the provider takes
    pub timeout: Option<Duration>,
}

impl ChimoneyConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `CHIMONEY_API_KEY`
    ///
    /// Optional:
    /// - `CHIMONEY_BASE_URL` (defaults to production)
    /// - `CHIMONEY_SANDBOX` (`true` selects the sandbox host when no base URL is set)
    /// - `CHIMONEY_TIMEOUT_SECS` (unset means no client-side timeout)
    pub fn from_env() -> Result<Self, RelayError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// `from_env` is this with `std::env::var`; the API layer layers its
    /// TOML defaults underneath the environment through the same entry point.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RelayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(ENV_API_KEY)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| RelayError::Configuration(format!("{} not set", ENV_API_KEY)))?;

        let sandbox = match lookup(ENV_SANDBOX) {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                RelayError::Configuration(format!("{} must be true or false", ENV_SANDBOX))
            })?,
            None => false,
        };

        let api_base_url = match lookup(ENV_BASE_URL).filter(|url| !url.trim().is_empty()) {
            Some(url) => url,
            None if sandbox => SANDBOX_BASE_URL.to_string(),
            None => PRODUCTION_BASE_URL.to_string(),
        };

        if !api_base_url.starts_with("https://") && !api_base_url.starts_with("http://") {
            return Err(RelayError::Configuration(format!(
                "{} must start with http:// or https://",
                ENV_BASE_URL
            )));
        }

        let mut config = Self::new(api_key).with_api_base_url(api_base_url);

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                RelayError::Configuration(format!(
                    "{} must be a whole number of seconds",
                    ENV_TIMEOUT_SECS
                ))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Create config with explicit values (for testing)
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base_url: PRODUCTION_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Builder: set custom API base URL (sandbox, mocks)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder: set the outbound timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn is_sandbox(&self) -> bool {
        self.api_base_url == SANDBOX_BASE_URL
    }

    /// Full URL for a provider path
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}

impl fmt::Debug for ChimoneyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChimoneyConfig")
            .field("api_key", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ChimoneyConfig::from_lookup(lookup_from(&[(ENV_API_KEY, "key_123")])).unwrap();

        assert_eq!(config.api_key, "key_123");
        assert_eq!(config.api_base_url, PRODUCTION_BASE_URL);
        assert_eq!(config.timeout, None);
        assert!(!config.is_sandbox());
    }

    #[test]
    fn test_timeout_only_when_configured() {
        let config = ChimoneyConfig::from_lookup(lookup_from(&[
            (ENV_API_KEY, "key"),
            (ENV_TIMEOUT_SECS, " 12 "),
        ]))
        .unwrap();
        assert_eq!(config.timeout, Some(Duration::from_secs(12)));

        assert_eq!(ChimoneyConfig::new("key").timeout, None);
    }

    #[test]
    fn test_missing_key() {
        let result = ChimoneyConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(RelayError::Configuration(_))));

        let blank = ChimoneyConfig::from_lookup(lookup_from(&[(ENV_API_KEY, "   ")]));
        assert!(blank.is_err());
    }

    #[test]
    fn test_sandbox_flag() {
        let config = ChimoneyConfig::from_lookup(lookup_from(&[
            (ENV_API_KEY, "key"),
            (ENV_SANDBOX, "true"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, SANDBOX_BASE_URL);
        assert!(config.is_sandbox());

        let bad = ChimoneyConfig::from_lookup(lookup_from(&[
            (ENV_API_KEY, "key"),
            (ENV_SANDBOX, "maybe"),
        ]));
        assert!(bad.is_err());
    }

    #[test]
    fn test_explicit_base_url_wins() {
        let config = ChimoneyConfig::from_lookup(lookup_from(&[
            (ENV_API_KEY, "key"),
            (ENV_SANDBOX, "true"),
            (ENV_BASE_URL, "http://localhost:9999/v0.2/"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "http://localhost:9999/v0.2");
        assert_eq!(
            config.endpoint("/payment/verify"),
            "http://localhost:9999/v0.2/payment/verify"
        );
    }

    #[test]
    fn test_invalid_values() {
        let bad_url = ChimoneyConfig::from_lookup(lookup_from(&[
            (ENV_API_KEY, "key"),
            (ENV_BASE_URL, "ftp://api.chimoney.io"),
        ]));
        assert!(bad_url.is_err());

        let bad_timeout = ChimoneyConfig::from_lookup(lookup_from(&[
            (ENV_API_KEY, "key"),
            (ENV_TIMEOUT_SECS, "soon"),
        ]));
        assert!(bad_timeout.is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ChimoneyConfig::new("super-secret");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
