//! Locale resources for rendered views.
//!
//! Translations are TOML resources keyed by locale code, not inline
//! literals; the built-in tables ship with the binary and a custom table
//! can be loaded from a file. The renderer receives a `Translations`
//! reference and never looks at the locale code itself.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::Priority;

const EN: &str = include_str!("../locales/en.toml");
const TR: &str = include_str!("../locales/tr.toml");

pub const DEFAULT_LOCALE: &str = "en";

/// Display strings for one locale.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Translations {
    pub dashboard: String,
    pub welcome_back: String,
    pub total_tasks: String,
    pub completed: String,
    pub pending: String,
    pub projects: String,
    pub todays_tasks: String,
    pub recent_projects: String,
    pub no_tasks_today: String,
    pub no_projects: String,
    pub no_tasks_project: String,
    pub today: String,
    pub calendar: String,
    pub all_tasks: String,
    pub due_date: String,
    pub low: String,
    pub medium: String,
    pub high: String,
    pub chart_completion_trend: String,
}

impl Translations {
    /// Load a built-in locale by code. Unknown codes are an error so a
    /// typo in the config is visible instead of silently English.
    pub fn builtin(code: &str) -> Result<Self> {
        let raw = match code.trim().to_ascii_lowercase().as_str() {
            "en" => EN,
            "tr" => TR,
            other => return Err(Error::UnknownLocale(other.to_string())),
        };
        Ok(toml::from_str(raw)?)
    }

    /// Load the locale for a code, falling back to English for unknown
    /// codes.
    pub fn for_code_or_default(code: &str) -> Result<Self> {
        match Self::builtin(code) {
            Ok(translations) => Ok(translations),
            Err(Error::UnknownLocale(_)) => Self::builtin(DEFAULT_LOCALE),
            Err(err) => Err(err),
        }
    }

    /// Load a custom translation table from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    pub fn priority_label(&self, priority: Priority) -> &str {
        match priority {
            Priority::Low => &self.low,
            Priority::Medium => &self.medium,
            Priority::High => &self.high,
        }
    }
}
