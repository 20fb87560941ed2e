//! Client and retry configuration.

use std::env;
use std::time::Duration;

use reqwest::Url;

use crate::error::{AipolabsError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.aipolabs.xyz/v1";
pub const API_KEY_ENV_VAR: &str = "AIPOLABS_API_KEY";
pub const BASE_URL_ENV_VAR: &str = "AIPOLABS_BASE_URL";

/// Immutable client configuration, fixed at construction time.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: Url,
}

impl ClientConfig {
    /// Build a config from explicit values, falling back to the
    /// `AIPOLABS_API_KEY` / `AIPOLABS_BASE_URL` environment variables.
    ///
    /// A missing API key is a hard failure; a missing base URL falls back
    /// to the production endpoint.
    pub fn new(api_key: Option<String>, base_url: Option<String>) -> Result<Self> {
        let api_key = api_key
            .or_else(|| env::var(API_KEY_ENV_VAR).ok())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                AipolabsError::ApiKeyNotFound(format!(
                    "pass api_key to the client or set {API_KEY_ENV_VAR}"
                ))
            })?;

        let base_url = base_url
            .or_else(|| env::var(BASE_URL_ENV_VAR).ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&base_url)
            .map_err(|e| AipolabsError::validation(format!("invalid base url: {e}")))?;

        Ok(Self {
            api_key,
            base_url: enforce_trailing_slash(base_url),
        })
    }
}

/// `Url::join` treats the last path segment as a file unless the base ends
/// with a slash, so the slash is enforced once here.
fn enforce_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Knobs for the bounded exponential-backoff retry policy applied to every
/// outbound request.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Base wait multiplied by 2^(retry - 1).
    pub multiplier: Duration,
    pub min_wait: Duration,
    pub max_wait: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            multiplier: Duration::from_secs(1),
            min_wait: Duration::from_secs(1),
            max_wait: Duration::from_secs(10),
        }
    }
}

impl RetryConfig {
    /// Backoff before retry number `retry` (1-based), clamped to
    /// `[min_wait, max_wait]`.
    pub fn backoff(&self, retry: u32) -> Duration {
        let exp = retry.saturating_sub(1).min(32);
        let wait = self.multiplier.saturating_mul(2u32.saturating_pow(exp));
        wait.clamp(self.min_wait, self.max_wait)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_enforced() {
        let config =
            ClientConfig::new(Some("key".into()), Some("https://api.example.com/v1".into()))
                .unwrap();
        assert_eq!(config.base_url.as_str(), "https://api.example.com/v1/");

        let config =
            ClientConfig::new(Some("key".into()), Some("https://api.example.com/v1/".into()))
                .unwrap();
        assert_eq!(config.base_url.as_str(), "https://api.example.com/v1/");
    }

    #[test]
    fn test_missing_api_key_is_construction_failure() {
        // Explicit empty string counts as missing too.
        let err = ClientConfig::new(Some(String::new()), Some("https://x.test".into()));
        assert!(matches!(err, Err(AipolabsError::ApiKeyNotFound(_))));
    }

    #[test]
    fn test_backoff_is_exponential_and_clamped() {
        let retry = RetryConfig {
            max_attempts: 5,
            multiplier: Duration::from_millis(100),
            min_wait: Duration::from_millis(150),
            max_wait: Duration::from_millis(500),
        };
        assert_eq!(retry.backoff(1), Duration::from_millis(150)); // floor
        assert_eq!(retry.backoff(2), Duration::from_millis(200));
        assert_eq!(retry.backoff(3), Duration::from_millis(400));
        assert_eq!(retry.backoff(4), Duration::from_millis(500)); // ceiling
        assert_eq!(retry.backoff(10), Duration::from_millis(500));
    }
}
