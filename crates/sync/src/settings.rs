//! Local settings file.
//!
//! The carrier-tracking webhook endpoint is user-configured at runtime and
//! persists across launches in a small JSON file under the single key
//! `gated_tracking_webhook`. An absent file, absent key, or empty value all
//! mean the same thing: tracking requests degrade to simulated data.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reading or writing the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client-local settings, persisted as JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Endpoint the tracking pipeline POSTs `{carrier, trackingNumber}` to.
    #[serde(
        rename = "gated_tracking_webhook",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub tracking_webhook: Option<String>,
}

impl Settings {
    /// Load settings from `path`. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the file exists but cannot be read or
    /// parsed.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist settings to `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` on I/O failure.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Set (or clear) the tracking webhook endpoint.
    ///
    /// A non-empty value without a scheme gets `https://` prepended; an
    /// empty or whitespace value clears the key.
    pub fn set_tracking_webhook(&mut self, raw: &str) {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            self.tracking_webhook = None;
            return;
        }
        self.tracking_webhook = Some(normalize_endpoint(trimmed));
    }

    /// The configured webhook endpoint, if any non-empty value is set.
    #[must_use]
    pub fn tracking_webhook(&self) -> Option<&str> {
        self.tracking_webhook
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Prepend `https://` when the user omitted the scheme.
fn normalize_endpoint(raw: &str) -> String {
    let lower = raw.to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        raw.to_owned()
    } else {
        format!("https://{raw}")
    }
}

/// Default settings location relative to the working directory.
#[must_use]
pub fn default_settings_path() -> PathBuf {
    PathBuf::from("gated-settings.json")
}
