//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MARKETPLACE_API_URL` - Base URL of the marketplace REST API
//!
//! ## Optional
//! - `MARKETPLACE_API_TOKEN` - Bearer token sent with every API request
//! - `MARKETPLACE_API_TIMEOUT_SECS` - Per-request timeout (default: 30)
//! - `CART_PAGE_SIZE` - Items per cart/staging page (default: 8)
//! - `REWARD_RATE` - Coins earned per unit of order value (default: 0.05)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::num::NonZeroUsize;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::pagination::DEFAULT_PAGE_SIZE;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REWARD_RATE: &str = "0.05";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Marketplace REST API configuration
    pub api: MarketplaceApiConfig,
    /// Items per page in the cart and staging views
    pub page_size: NonZeroUsize,
    /// Reward coins per unit of submitted order value
    pub reward_rate: Decimal,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Marketplace REST API configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct MarketplaceApiConfig {
    /// Base URL; always ends with `/` so endpoint paths join beneath it
    pub base_url: Url,
    /// Bearer token for authenticated requests
    pub token: Option<SecretString>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for MarketplaceApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketplaceApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl MarketplaceApiConfig {
    /// Build an API configuration for `base_url` with the default timeout and
    /// no token.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the URL does not parse or
    /// cannot serve as a base (e.g. `mailto:`).
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("MARKETPLACE_API_URL", base_url)?,
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        let base_url = vars.required("MARKETPLACE_API_URL")?;
        let mut api = MarketplaceApiConfig::new(&base_url)?;
        api.token = vars.optional("MARKETPLACE_API_TOKEN").map(SecretString::from);
        api.timeout = Duration::from_secs(
            vars.parsed_or("MARKETPLACE_API_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
        );

        let page_size = vars.parsed_or("CART_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;

        let reward_rate_raw = vars.or_default("REWARD_RATE", DEFAULT_REWARD_RATE);
        let reward_rate = Decimal::from_str(reward_rate_raw.trim())
            .map_err(|e| ConfigError::InvalidEnvVar("REWARD_RATE".to_string(), e.to_string()))?;
        if reward_rate.is_sign_negative() {
            return Err(ConfigError::InvalidEnvVar(
                "REWARD_RATE".to_string(),
                "must not be negative".to_string(),
            ));
        }

        Ok(Self {
            api,
            page_size,
            reward_rate,
            sentry_dsn: vars.optional("SENTRY_DSN"),
            sentry_environment: vars.optional("SENTRY_ENVIRONMENT"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get a required variable; empty values count as missing.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get an optional variable, ignoring empty values.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parsed_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }
}

/// Parse a base URL, forcing a trailing slash so relative joins keep the path.
fn parse_base_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "URL cannot be used as a base".to_string(),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("MARKETPLACE_API_URL", "https://api.quikmart.test/api")]).unwrap();

        assert_eq!(config.api.base_url.as_str(), "https://api.quikmart.test/api/");
        assert!(config.api.token.is_none());
        assert_eq!(config.api.timeout, Duration::from_secs(30));
        assert_eq!(config.page_size.get(), 8);
        assert_eq!(config.reward_rate, Decimal::new(5, 2));
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_missing_api_url() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "MARKETPLACE_API_URL"));
    }

    #[test]
    fn test_invalid_api_url() {
        let err = load(&[("MARKETPLACE_API_URL", "not a url")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = load(&[
            ("MARKETPLACE_API_URL", "http://localhost:5000/"),
            ("CART_PAGE_SIZE", "0"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "CART_PAGE_SIZE"));
    }

    #[test]
    fn test_negative_reward_rate_rejected() {
        let err = load(&[
            ("MARKETPLACE_API_URL", "http://localhost:5000/"),
            ("REWARD_RATE", "-0.1"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "REWARD_RATE"));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("MARKETPLACE_API_URL", "http://localhost:5000"),
            ("MARKETPLACE_API_TOKEN", "tok_9f8e7d"),
            ("MARKETPLACE_API_TIMEOUT_SECS", "5"),
            ("CART_PAGE_SIZE", "12"),
            ("REWARD_RATE", "0.1"),
            ("SENTRY_DSN", "https://key@sentry.test/1"),
        ])
        .unwrap();

        assert_eq!(config.api.base_url.as_str(), "http://localhost:5000/");
        assert!(config.api.token.is_some());
        assert_eq!(config.api.timeout, Duration::from_secs(5));
        assert_eq!(config.page_size.get(), 12);
        assert_eq!(config.reward_rate, Decimal::new(1, 1));
        assert_eq!(config.sentry_dsn.as_deref(), Some("https://key@sentry.test/1"));
    }

    #[test]
    fn test_api_config_debug_redacts_token() {
        let mut api = MarketplaceApiConfig::new("http://localhost:5000").unwrap();
        api.token = Some(SecretString::from("super_secret_token"));

        let debug_output = format!("{api:?}");
        assert!(debug_output.contains("localhost:5000"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_token"));
    }
}
