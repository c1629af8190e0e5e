//! Settings storage
//!
//! Manages persistence of user preferences. The backend address can also
//! come from the environment, which wins over the settings file.

use crate::storage::{get_data_dir, StorageError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the model server address
pub const BACKEND_URL_ENV: &str = "OLLAMA_HOST";

/// Default model server address
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:11434";

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Base URL of the model server
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// UI theme: "dark" or "light"
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_theme() -> String {
    "dark".to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            theme: default_theme(),
        }
    }
}

impl AppSettings {
    /// Validate settings values
    ///
    /// Normalizes the backend URL (no trailing slash, never empty) and
    /// falls back to the dark theme on unknown values.
    pub fn validate(&mut self) {
        let trimmed = self.backend_url.trim().trim_end_matches('/');
        self.backend_url = if trimmed.is_empty() {
            DEFAULT_BACKEND_URL.to_string()
        } else {
            trimmed.to_string()
        };

        if self.theme != "dark" && self.theme != "light" {
            self.theme = "dark".to_string();
        }
    }

    /// Backend URL after applying the environment override.
    pub fn resolved_backend_url(&self) -> String {
        std::env::var(BACKEND_URL_ENV)
            .ok()
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| self.backend_url.clone())
    }
}

/// Get the settings file path
fn get_settings_path() -> Result<PathBuf, StorageError> {
    Ok(get_data_dir()?.join("settings.json"))
}

/// Load settings from disk
///
/// Returns default settings if the file doesn't exist or is corrupted.
pub fn load_settings() -> AppSettings {
    match get_settings_path().and_then(|path| load_settings_from(&path)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            AppSettings::default()
        }
    }
}

fn load_settings_from(path: &Path) -> Result<AppSettings, StorageError> {
    if !path.exists() {
        tracing::info!("Settings file not found, using defaults");
        return Ok(AppSettings::default());
    }

    let json = fs::read_to_string(path)?;
    let mut settings: AppSettings = serde_json::from_str(&json)?;
    settings.validate();

    tracing::debug!("Loaded settings from disk");
    Ok(settings)
}

/// Save settings to disk
pub fn save_settings(settings: &AppSettings) -> Result<(), StorageError> {
    let path = get_settings_path()?;
    save_settings_to(&path, settings)
}

fn save_settings_to(path: &Path, settings: &AppSettings) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;

    tracing::debug!("Saved settings to disk");
    Ok(())
}
