//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `KLOUD_API_URL` - Base URL of the shop API (default: `http://127.0.0.1:5000`)

use thiserror::Error;
use url::Url;

/// Default shop API address (the backend's development host).
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the remote shop API
    pub api_url: Url,
}

impl ClientConfig {
    /// Create a configuration pointing at the given API base URL.
    #[must_use]
    pub const fn new(api_url: Url) -> Self {
        Self { api_url }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `KLOUD_API_URL` is set but not a valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = get_env_or_default("KLOUD_API_URL", DEFAULT_API_URL)
            .parse::<Url>()
            .map_err(|e| ConfigError::InvalidEnvVar("KLOUD_API_URL".to_string(), e.to_string()))?;

        Ok(Self { api_url })
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_url_parses() {
        let url = DEFAULT_API_URL.parse::<Url>().unwrap();
        assert_eq!(url.host_str(), Some("127.0.0.1"));
        assert_eq!(url.port(), Some(5000));
    }

    #[test]
    fn test_get_env_or_default_falls_back() {
        let value = get_env_or_default("KLOUD_TEST_UNSET_VARIABLE", "fallback");
        assert_eq!(value, "fallback");
    }
}
