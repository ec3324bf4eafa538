//! Configuration for the booking API client.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;
use std::time::Duration;

/// Default API root; the Android emulator's alias for the host machine
pub const DEFAULT_BASE_URL: &str = "http://10.0.2.2:8899/api/v1";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root including the `/api/v1` prefix, without trailing slash
    pub base_url: String,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connection establishment timeout in seconds
    pub connect_timeout_secs: u64,
    /// Bearer token to start with, if any
    pub token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 30,
            token: None,
        }
    }
}

impl ClientConfig {
    /// Creates a configuration for `base_url` with default timeouts
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// - `EVENTAPP_API_URL` (default [`DEFAULT_BASE_URL`])
    /// - `EVENTAPP_TIMEOUT_SECS` (default 30)
    /// - `EVENTAPP_CONNECT_TIMEOUT_SECS` (default 30)
    /// - `EVENTAPP_TOKEN` (optional)
    ///
    /// Missing or unparsable values fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("EVENTAPP_API_URL")
                .map(|url| normalize_base_url(&url))
                .unwrap_or(defaults.base_url),
            timeout_secs: env::var("EVENTAPP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            connect_timeout_secs: env::var("EVENTAPP_CONNECT_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.connect_timeout_secs),
            token: env::var("EVENTAPP_TOKEN").ok().filter(|t| !t.is_empty()),
        }
    }

    /// Request timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Connect timeout
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.connect_timeout(), Duration::from_secs(30));
        assert_eq!(config.token, None);
    }

    #[test]
    fn test_trailing_slash_removed() {
        let config = ClientConfig::new("http://localhost:8899/api/v1/");
        assert_eq!(config.base_url, "http://localhost:8899/api/v1");
    }
}
