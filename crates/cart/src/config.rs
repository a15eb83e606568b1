//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOEBOX_API_URL` - Base URL of the store API (products and stock)
//!
//! ## Optional
//! - `SHOEBOX_CART_PATH` - Path of the cart snapshot file
//!   (default: shoebox-cart.json)
//! - `SHOEBOX_HTTP_TIMEOUT_SECS` - Per-request timeout for API lookups
//!   (default: 10)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_CART_PATH: &str = "shoebox-cart.json";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart session configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Base URL of the store API
    pub api_url: Url,
    /// Path of the cart snapshot file
    pub cart_path: PathBuf,
    /// Per-request timeout for API lookups
    pub http_timeout: Duration,
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// `from_env` delegates here; tests pass a closure over a map.
    pub(crate) fn from_lookup(
        get: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_url = get("SHOEBOX_API_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("SHOEBOX_API_URL".to_string()))?;
        let api_url = api_url.parse::<Url>().map_err(|e| {
            ConfigError::InvalidEnvVar("SHOEBOX_API_URL".to_string(), e.to_string())
        })?;

        let cart_path = get("SHOEBOX_CART_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_CART_PATH), PathBuf::from);

        let http_timeout = match get("SHOEBOX_HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "SHOEBOX_HTTP_TIMEOUT_SECS".to_string(),
                        e.to_string(),
                    )
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        Ok(Self {
            api_url,
            cart_path,
            http_timeout,
        })
    }
}
