//! Client configuration types.

use std::time::Duration;

/// Remote search endpoint configuration.
///
/// Credentials here are deployment configuration handed in by the hosting
/// environment, not secrets managed by this crate.
#[derive(Debug, Clone)]
pub struct SearchEndpoint {
    /// Full URL of the search endpoint (one POST per page goes here).
    pub url: String,
    /// Application identifier sent in the `X-Algolia-Application-Id` header.
    pub app_id: String,
    /// API key sent in the `X-Algolia-API-Key` header.
    pub api_key: String,
    /// Per-request timeout; expiry surfaces as a network error.
    pub timeout: Duration,
}

impl Default for SearchEndpoint {
    fn default() -> Self {
        Self {
            url: "https://ov0mci6x2j-dsn.algolia.net/1/indexes/prod_PUBLIC_STORE/query"
                .to_string(),
            app_id: "OV0MCI6X2J".to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Retry and backoff policy for transient fetch failures.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Attempts per offset before the run aborts with `ExhaustedRetries`.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Ceiling for the exponential delay, before jitter.
    pub max_delay: Duration,
    /// Jitter applied to each delay, as a fraction of the delay (0.2 = ±20%).
    pub jitter_ratio: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            jitter_ratio: 0.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_config_defaults() {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.base_delay, Duration::from_millis(500));
        assert_eq!(config.max_delay, Duration::from_secs(30));
        assert!((config.jitter_ratio - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn endpoint_defaults() {
        let endpoint = SearchEndpoint::default();
        assert!(endpoint.url.starts_with("https://"));
        assert_eq!(endpoint.timeout, Duration::from_secs(30));
        assert!(endpoint.api_key.is_empty());
    }
}
