//! Import and export of user data.
//!
//! The import format is a JSON document whose top level must carry `tasks`
//! and `projects` arrays; anything else is rejected before the store is
//! touched. Exports add backup metadata (date, display name, email) on top
//! of the same shape, so an exported file can be imported back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Project, Task};
use crate::session::UserProfile;

/// Tasks and projects carried by an import file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferDocument {
    pub tasks: Vec<Task>,
    pub projects: Vec<Project>,
}

impl TransferDocument {
    /// Parse and validate an import file.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)
            .map_err(|err| Error::ImportFormat(format!("not valid JSON: {err}")))?;

        let object = value
            .as_object()
            .ok_or_else(|| Error::ImportFormat("top level must be a JSON object".to_string()))?;

        for field in ["tasks", "projects"] {
            match object.get(field) {
                Some(entry) if entry.is_array() => {}
                Some(_) => {
                    return Err(Error::ImportFormat(format!("`{field}` must be an array")));
                }
                None => {
                    return Err(Error::ImportFormat(format!("missing `{field}` array")));
                }
            }
        }

        serde_json::from_value(value)
            .map_err(|err| Error::ImportFormat(format!("unreadable entry: {err}")))
    }
}

/// The downloadable backup document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub tasks: Vec<Task>,
    pub projects: Vec<Project>,
    pub export_date: DateTime<Utc>,
    pub exported_by: String,
    pub user_email: String,
}

impl ExportDocument {
    pub fn new(tasks: Vec<Task>, projects: Vec<Project>, profile: &UserProfile) -> Self {
        Self {
            tasks,
            projects,
            export_date: Utc::now(),
            exported_by: if profile.name.is_empty() {
                "User".to_string()
            } else {
                profile.name.clone()
            },
            user_email: profile.email.clone(),
        }
    }

    /// Default backup file name: `taskly-backup-<name>-<date>.json`.
    pub fn default_file_name(&self) -> String {
        let name = if self.exported_by.is_empty() {
            "user"
        } else {
            self.exported_by.as_str()
        };
        let name: String = name
            .chars()
            .map(|ch| if ch.is_whitespace() { '-' } else { ch })
            .collect();
        format!(
            "taskly-backup-{}-{}.json",
            name.to_lowercase(),
            self.export_date.date_naive()
        )
    }
}
