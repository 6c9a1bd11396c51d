//! Sync configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `GATED_STORE_URL` - Base URL of the remote row store
//!   (e.g., https://abc123.supabase.co)
//! - `GATED_STORE_API_KEY` - Anonymous API key for the row store
//!
//! ## Optional
//! - `GATED_SETTINGS_PATH` - Path of the local settings file (default:
//!   `gated-settings.json` in the current directory)
//!
//! The carrier-tracking webhook URL is deliberately *not* an environment
//! variable: the user configures it at runtime and it persists in the local
//! settings file (see [`crate::settings`]).

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Top-level sync configuration.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Remote row store configuration
    pub store: StoreConfig,
    /// Location of the local settings file
    pub settings_path: PathBuf,
}

/// Remote row store configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct StoreConfig {
    /// Base URL of the store (no trailing slash)
    pub base_url: String,
    /// Anonymous API key, sent as both `apikey` and bearer token
    pub api_key: SecretString,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl SyncConfig {
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

        let store = StoreConfig::from_env()?;
        let settings_path = get_env_or_default("GATED_SETTINGS_PATH", "gated-settings.json").into();

        Ok(Self {
            store,
            settings_path,
        })
    }
}

impl StoreConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_required_env("GATED_STORE_URL")?;
        let base_url = base_url.trim_end_matches('/').to_owned();
        url::Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("GATED_STORE_URL".to_owned(), e.to_string())
        })?;

        Ok(Self {
            base_url,
            api_key: SecretString::from(get_required_env("GATED_STORE_API_KEY")?),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}
