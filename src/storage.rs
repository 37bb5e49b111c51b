//! Storage layer for taskly
//!
//! All state lives under one data directory, one JSON document per user:
//!
//! ```text
//! <data-dir>/
//!   users/
//!     user-<id>.json          # per-user document (tasks, projects, counters)
//!     user-<id>.json.corrupt  # preserved copy of an unreadable document
//!   current-user.json         # session profile (logged-in user)
//!   config.toml               # settings (language, formats)
//! ```
//!
//! Writes go through a temp file + rename so a reader never observes a
//! partially written document.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{Error, Result};
use crate::model::UserDocument;

const USERS_DIR: &str = "users";
const CURRENT_USER_FILE: &str = "current-user.json";
const CONFIG_FILE: &str = "config.toml";
const CORRUPT_SUFFIX: &str = "corrupt";

/// Storage manager rooted at a data directory.
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Open storage at the platform data directory for taskly.
    pub fn open_default() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "taskly").ok_or_else(|| {
            Error::StorageFailure("could not determine a data directory".to_string())
        })?;
        Ok(Self::new(dirs.data_dir().to_path_buf()))
    }

    // =========================================================================
    // Path accessors
    // =========================================================================

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn users_dir(&self) -> PathBuf {
        self.root.join(USERS_DIR)
    }

    pub fn user_document_path(&self, user_id: &str) -> PathBuf {
        self.users_dir().join(format!("user-{user_id}.json"))
    }

    pub fn current_user_path(&self) -> PathBuf {
        self.root.join(CURRENT_USER_FILE)
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    // =========================================================================
    // Per-user documents
    // =========================================================================

    /// Whether a document has ever been persisted for this user.
    pub fn document_exists(&self, user_id: &str) -> bool {
        self.user_document_path(user_id).exists()
    }

    /// Load the document for a user.
    ///
    /// Never fails: a missing document yields the empty default, and an
    /// unreadable one is preserved next to the original (`.corrupt`) before
    /// the default is returned.
    pub fn load_document(&self, user_id: &str) -> UserDocument {
        let path = self.user_document_path(user_id);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return UserDocument::default();
            }
            Err(err) => {
                tracing::warn!(user = user_id, error = %err, "failed to read user document");
                return UserDocument::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(doc) => doc,
            Err(err) => {
                tracing::warn!(
                    user = user_id,
                    error = %err,
                    "user document is malformed, starting from an empty document"
                );
                self.preserve_corrupt(&path);
                UserDocument::default()
            }
        }
    }

    /// Persist the full document for a user, replacing any prior value.
    pub fn save_document(&self, user_id: &str, doc: &UserDocument) -> Result<()> {
        let path = self.user_document_path(user_id);
        self.write_json(&path, doc)
            .map_err(|err| Error::StorageFailure(format!("could not save user document: {err}")))
    }

    fn preserve_corrupt(&self, path: &Path) {
        let backup = path.with_extension(format!(
            "{}.{CORRUPT_SUFFIX}",
            path.extension().and_then(|ext| ext.to_str()).unwrap_or("json")
        ));
        if let Err(err) = fs::rename(path, &backup) {
            tracing::warn!(error = %err, "could not preserve corrupt document");
        } else {
            tracing::warn!(backup = %backup.display(), "corrupt document preserved");
        }
    }

    // =========================================================================
    // File I/O helpers (atomic writes for safety)
    // =========================================================================

    /// Write JSON data atomically (write to temp, then rename).
    pub fn write_json<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        self.write_atomic(path, json.as_bytes())
    }

    /// Read JSON data from a file.
    pub fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = fs::read_to_string(path)?;
        let data: T = serde_json::from_str(&content)?;
        Ok(data)
    }

    /// Write data atomically using temp file + rename.
    ///
    /// The document is either fully written or not at all; readers never see
    /// a partial write.
    pub fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("tmp");

        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;

        fs::rename(&temp_path, path)?;

        Ok(())
    }
}
