//! Configuration loading for the inbox preview
//!
//! Settings are resolved in this order (later wins):
//! 1. Built-in defaults
//! 2. JSON file (~/.config/inbox-preview/preview.json)
//! 3. Environment variables

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::gmail::GmailClient;

/// Settings filename in the config directory
const SETTINGS_FILE: &str = "preview.json";

/// Environment variable overriding the Gmail API base URL
pub const ENV_API_BASE_URL: &str = "INBOX_PREVIEW_API_BASE_URL";

/// Environment variable overriding the credentials file location
pub const ENV_CREDENTIALS: &str = "INBOX_PREVIEW_CREDENTIALS";

/// Runtime settings for the inbox preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewConfig {
    /// Gmail API base URL, up to and including `/users/me`
    pub api_base_url: String,
    /// Credentials file; `None` means the default in the config directory
    pub credentials_path: Option<PathBuf>,
}

/// On-disk settings format; every field is optional
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    api_base_url: Option<String>,
    credentials_path: Option<PathBuf>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            api_base_url: GmailClient::DEFAULT_BASE_URL.to_string(),
            credentials_path: None,
        }
    }
}

impl PreviewConfig {
    /// Load defaults, then the settings file if present, then env overrides
    pub fn load() -> Result<Self> {
        let mut config = if config::config_exists(SETTINGS_FILE) {
            let file: SettingsFile = config::load_json(SETTINGS_FILE)?;
            Self::from_settings(file)
        } else {
            Self::default()
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load settings from a specific JSON file (env overrides still apply)
    pub fn from_file(path: &Path) -> Result<Self> {
        let file: SettingsFile = config::load_json_file(path)?;
        let mut config = Self::from_settings(file);
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let file: SettingsFile =
            serde_json::from_str(json).context("Failed to parse preview settings JSON")?;
        Ok(Self::from_settings(file))
    }

    fn from_settings(file: SettingsFile) -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: file
                .api_base_url
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.api_base_url),
            credentials_path: file.credentials_path,
        }
    }

    /// Apply overrides from a variable lookup (the process environment in practice)
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_API_BASE_URL).filter(|v| !v.is_empty()) {
            self.api_base_url = url;
        }
        if let Some(path) = lookup(ENV_CREDENTIALS).filter(|v| !v.is_empty()) {
            self.credentials_path = Some(PathBuf::from(path));
        }
    }

    /// Get the default settings file path (~/.config/inbox-preview/preview.json)
    pub fn default_settings_path() -> Option<PathBuf> {
        config::config_path(SETTINGS_FILE)
    }
}
