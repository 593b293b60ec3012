//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STARFRUIT_API_BASE_URL` - Base URL of the authentication backend
//!
//! ## Optional
//! - `STARFRUIT_COOKIE_SECURE` - Whether the token cookie carries the `Secure`
//!   attribute (default: true; set to `false` for plain-HTTP development)

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client application configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the authentication backend.
    pub api_base_url: Url,
    /// Whether the token cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = get_required_env("STARFRUIT_API_BASE_URL")?
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STARFRUIT_API_BASE_URL".to_string(), e.to_string())
            })?;
        let cookie_secure = get_env_or_default("STARFRUIT_COOKIE_SECURE", "true")
            .parse::<bool>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STARFRUIT_COOKIE_SECURE".to_string(), e.to_string())
            })?;

        Ok(Self {
            api_base_url,
            cookie_secure,
        })
    }

    /// Build a configuration directly, bypassing the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `api_base_url` is not a valid URL.
    pub fn new(api_base_url: &str, cookie_secure: bool) -> Result<Self, ConfigError> {
        let api_base_url = api_base_url.parse::<Url>().map_err(|e| {
            ConfigError::InvalidEnvVar("api_base_url".to_string(), e.to_string())
        })?;

        Ok(Self {
            api_base_url,
            cookie_secure,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
