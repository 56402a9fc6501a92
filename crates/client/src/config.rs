//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `COFFEE_API_BASE_URL` - Backend base URL (default: `http://localhost:5000/api`)
//! - `COFFEE_DATA_DIR` - Directory holding the stored credential (default: `.coffee-society`)
//! - `COFFEE_REQUEST_TIMEOUT_SECS` - Per-request timeout (default: 15)
//! - `COFFEE_CAFE_CACHE_TTL_SECS` - How long the cafe list is cached (default: 60)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default backend URL used during local development.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

const DEFAULT_DATA_DIR: &str = ".coffee-society";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
const DEFAULT_CAFE_CACHE_TTL_SECS: u64 = 60;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, always ending in `/`
    pub api_base_url: Url,
    /// Directory where the credential file lives
    pub data_dir: PathBuf,
    /// Timeout applied to every backend request
    pub request_timeout: Duration,
    /// Time-to-live of the cached cafe list
    pub cafe_cache_ttl: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: normalize_base_url(DEFAULT_API_BASE_URL)
                .expect("default base URL is valid"),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            cafe_cache_ttl: Duration::from_secs(DEFAULT_CAFE_CACHE_TTL_SECS),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set but cannot be
    /// parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = normalize_base_url(&get_env_or_default(
            "COFFEE_API_BASE_URL",
            DEFAULT_API_BASE_URL,
        ))
        .map_err(|e| ConfigError::InvalidEnvVar("COFFEE_API_BASE_URL".to_string(), e))?;

        let data_dir = PathBuf::from(get_env_or_default("COFFEE_DATA_DIR", DEFAULT_DATA_DIR));

        let request_timeout = Duration::from_secs(get_seconds(
            "COFFEE_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?);
        let cafe_cache_ttl = Duration::from_secs(get_seconds(
            "COFFEE_CAFE_CACHE_TTL_SECS",
            DEFAULT_CAFE_CACHE_TTL_SECS,
        )?);

        Ok(Self {
            api_base_url,
            data_dir,
            request_timeout,
            cafe_cache_ttl,
        })
    }

    /// Replace the backend base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `base_url` is not an absolute
    /// http(s) URL.
    pub fn with_api_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.api_base_url = normalize_base_url(base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("COFFEE_API_BASE_URL".to_string(), e))?;
        Ok(self)
    }

    /// Build an endpoint URL below the base URL.
    ///
    /// `path` is relative, e.g. `auth/login` or `cafes/{id}/baristas`.
    ///
    /// # Errors
    ///
    /// Returns an error if the joined URL is invalid.
    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.api_base_url.join(path.trim_start_matches('/'))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a whole number of seconds, rejecting zero.
fn get_seconds(key: &str, default: u64) -> Result<u64, ConfigError> {
    let Ok(raw) = std::env::var(key) else {
        return Ok(default);
    };
    let secs = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if secs == 0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(secs)
}

/// Parse a base URL and make sure relative joins stay below it.
fn normalize_base_url(raw: &str) -> Result<Url, String> {
    let mut url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
