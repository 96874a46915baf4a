//! Client configuration: upstream endpoint, identifying header, retry policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// National Weather Service API base URL.
pub const NWS_BASE_URL: &str = "https://api.weather.gov";

/// Descriptive User-Agent sent with every request, per NWS policy:
/// `{product}/{version} (+{contact-url})`. Constant for the process.
pub const NWS_USER_AGENT: &str = "wxvane/0.1 (+https://github.com/wxvane/wxvane)";

/// Default retry policy, tunable per call.
pub const DEFAULT_MAX_RETRIES: u32 = 2;
pub const DEFAULT_BASE_DELAY_MS: u64 = 500;
pub const DEFAULT_MAX_DELAY_MS: u64 = 4000;
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("{field}: {message}")]
    Invalid { field: &'static str, message: String },
}

impl ConfigError {
    fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}

/// Per-call retry configuration for the resilient fetcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Additional attempts after the first; 0 means a single attempt.
    pub max_retries: u32,
    /// Delay before the first retry (doubles each attempt, pre-jitter).
    pub base_delay: Duration,
    /// Cap applied to the computed backoff delay.
    pub max_delay: Duration,
    /// Budget for a single attempt; hitting it fails the whole call.
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl RetryPolicy {
    /// Create a policy with custom settings, all in milliseconds.
    pub fn new(max_retries: u32, base_delay_ms: u64, max_delay_ms: u64, timeout_ms: u64) -> Self {
        Self {
            max_retries,
            base_delay: Duration::from_millis(base_delay_ms),
            max_delay: Duration::from_millis(max_delay_ms),
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// Check the policy invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_delay.is_zero() {
            return Err(ConfigError::invalid("base_delay", "must be greater than zero"));
        }
        if self.max_delay < self.base_delay {
            return Err(ConfigError::invalid(
                "max_delay",
                "must be greater than or equal to base_delay",
            ));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::invalid("timeout", "must be greater than zero"));
        }
        Ok(())
    }
}

/// Configuration for the NWS client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NwsConfig {
    pub base_url: String,
    pub user_agent: String,
    #[serde(default)]
    pub retry: RetryPolicy,
}

impl Default for NwsConfig {
    fn default() -> Self {
        Self {
            base_url: NWS_BASE_URL.to_string(),
            user_agent: NWS_USER_AGENT.to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

impl NwsConfig {
    /// Use a different upstream endpoint (e.g. a local mock server).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if Url::parse(&self.base_url).is_err() {
            return Err(ConfigError::invalid("base_url", "not a valid URL"));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::invalid("user_agent", "must not be empty"));
        }
        self.retry.validate()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 2);
        assert_eq!(policy.base_delay, Duration::from_millis(500));
        assert_eq!(policy.max_delay, Duration::from_millis(4000));
        assert_eq!(policy.timeout, Duration::from_millis(15_000));
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_policy_invariants() {
        assert!(RetryPolicy::new(3, 0, 4000, 15_000).validate().is_err());
        assert!(RetryPolicy::new(3, 500, 400, 15_000).validate().is_err());
        assert!(RetryPolicy::new(3, 500, 4000, 0).validate().is_err());
        assert!(RetryPolicy::new(0, 500, 500, 1).validate().is_ok());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(NwsConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_rejects_bad_base_url() {
        let config = NwsConfig::with_base_url("not a url");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_rejects_empty_user_agent() {
        let config = NwsConfig {
            user_agent: "  ".to_string(),
            ..NwsConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
