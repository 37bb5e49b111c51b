//! Error types for taskly
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad input, missing entity, not logged in)
//! - 4: Operation failed (storage, serialization)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the taskly CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for taskly operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Task not found: {0}")]
    TaskNotFound(u64),

    #[error("Project not found: {0}")]
    ProjectNotFound(u64),

    #[error("No tasks selected")]
    NoSelection,

    #[error("Invalid import file: {0}")]
    ImportFormat(String),

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Unknown view: {0}")]
    UnknownView(String),

    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    // Operation failures (exit code 4)
    #[error("Storage failure: {0}")]
    StorageFailure(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Export failed: could not write {0}")]
    ExportWrite(PathBuf),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidInput(_)
            | Error::TaskNotFound(_)
            | Error::ProjectNotFound(_)
            | Error::NoSelection
            | Error::ImportFormat(_)
            | Error::NotLoggedIn
            | Error::UnknownView(_)
            | Error::UnknownLocale(_) => exit_codes::USER_ERROR,

            Error::StorageFailure(_)
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::ExportWrite(_) => exit_codes::OPERATION_FAILED,
        }
    }
}

/// Result type alias for taskly operations
pub type Result<T> = std::result::Result<T, Error>;
