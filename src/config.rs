//! Configuration loading and management
//!
//! Handles parsing of the `config.toml` settings file in the data
//! directory. A missing or unreadable file degrades to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Locale code for rendered views ("en", "tr", ...)
    #[serde(default = "default_language")]
    pub language: String,

    /// Date display format
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Clock format: "12" or "24"
    #[serde(default = "default_time_format")]
    pub time_format: String,

    /// Whether command outcomes print notification lines
    #[serde(default = "default_notifications")]
    pub notifications: bool,

    /// Persist after every mutation (kept for document compatibility;
    /// commands always persist)
    #[serde(default = "default_auto_save")]
    pub auto_save: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: default_language(),
            date_format: default_date_format(),
            time_format: default_time_format(),
            notifications: default_notifications(),
            auto_save: default_auto_save(),
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_date_format() -> String {
    "mm/dd/yyyy".to_string()
}

fn default_time_format() -> String {
    "12".to_string()
}

fn default_notifications() -> bool {
    true
}

fn default_auto_save() -> bool {
    true
}

impl Config {
    /// Load configuration from a file, falling back to defaults when the
    /// file is missing or invalid.
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(_) => return Self::default(),
        };

        match toml::from_str(&raw) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "invalid config, using defaults");
                Self::default()
            }
        }
    }

    /// Write configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }
}
