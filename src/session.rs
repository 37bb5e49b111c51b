//! Session and user identity management.
//!
//! User resolution order:
//! 1) CLI --user (explicit id)
//! 2) TASKLY_USER environment variable (handled by clap)
//! 3) Persisted profile in `current-user.json`
//!
//! The core trusts whatever this module reports; commands that need a user
//! fail with `NotLoggedIn` when nothing resolves.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::storage::Storage;

/// The logged-in user as supplied by the session collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Resolve the active user from an explicit id or the persisted profile.
pub fn resolve_user(storage: &Storage, explicit: Option<&str>) -> Result<UserProfile> {
    if let Some(id) = non_empty(explicit) {
        validate_id(id)?;
        // An explicit id wins; reuse the persisted profile when it matches
        // so export metadata keeps the display name.
        if let Some(profile) = current_user(storage)? {
            if profile.id == id {
                return Ok(profile);
            }
        }
        return Ok(UserProfile {
            id: id.to_string(),
            name: "User".to_string(),
            email: String::new(),
        });
    }

    current_user(storage)?.ok_or(Error::NotLoggedIn)
}

/// Load the persisted profile, if any.
pub fn current_user(storage: &Storage) -> Result<Option<UserProfile>> {
    let path = storage.current_user_path();
    if !path.exists() {
        return Ok(None);
    }
    let profile: UserProfile = storage.read_json(&path)?;
    Ok(Some(profile))
}

/// Persist a profile as the logged-in user, generating an id when none is
/// given.
pub fn login(storage: &Storage, id: Option<&str>, name: &str, email: &str) -> Result<UserProfile> {
    let name = non_empty(Some(name))
        .ok_or_else(|| Error::InvalidInput("user name cannot be empty".to_string()))?;

    let id = match non_empty(id) {
        Some(id) => {
            validate_id(id)?;
            id.to_string()
        }
        None => Utc::now().timestamp_millis().to_string(),
    };

    let profile = UserProfile {
        id,
        name: name.to_string(),
        email: email.trim().to_string(),
    };
    storage.write_json(&storage.current_user_path(), &profile)?;
    Ok(profile)
}

/// Clear the persisted profile. Logging out when nobody is logged in is a
/// no-op.
pub fn logout(storage: &Storage) -> Result<()> {
    let path = storage.current_user_path();
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}

/// The id names a file under the data dir, so it must not be able to
/// traverse out of it.
fn validate_id(id: &str) -> Result<()> {
    if id.contains(['/', '\\']) || id.contains("..") {
        return Err(Error::InvalidInput(format!(
            "user id may not contain path separators: {id}"
        )));
    }
    Ok(())
}

fn non_empty(input: Option<&str>) -> Option<&str> {
    input.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage() -> (TempDir, Storage) {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path().join("data"));
        (temp, storage)
    }

    #[test]
    fn resolve_without_login_fails() {
        let (_temp, storage) = storage();
        assert!(matches!(
            resolve_user(&storage, None),
            Err(Error::NotLoggedIn)
        ));
    }

    #[test]
    fn login_then_resolve_returns_profile() {
        let (_temp, storage) = storage();
        let profile = login(&storage, Some("u1"), "Alice", "alice@example.com").unwrap();
        assert_eq!(profile.id, "u1");

        let resolved = resolve_user(&storage, None).unwrap();
        assert_eq!(resolved, profile);
    }

    #[test]
    fn explicit_id_overrides_persisted_profile() {
        let (_temp, storage) = storage();
        login(&storage, Some("u1"), "Alice", "").unwrap();

        let resolved = resolve_user(&storage, Some("u2")).unwrap();
        assert_eq!(resolved.id, "u2");
        assert_eq!(resolved.name, "User");
    }

    #[test]
    fn explicit_id_matching_profile_keeps_display_name() {
        let (_temp, storage) = storage();
        login(&storage, Some("u1"), "Alice", "alice@example.com").unwrap();

        let resolved = resolve_user(&storage, Some("u1")).unwrap();
        assert_eq!(resolved.name, "Alice");
    }

    #[test]
    fn logout_clears_profile() {
        let (_temp, storage) = storage();
        login(&storage, Some("u1"), "Alice", "").unwrap();
        logout(&storage).unwrap();
        assert!(current_user(&storage).unwrap().is_none());

        // Logging out twice is fine.
        logout(&storage).unwrap();
    }

    #[test]
    fn path_like_user_ids_are_rejected() {
        let (_temp, storage) = storage();
        assert!(matches!(
            resolve_user(&storage, Some("../../escape")),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            login(&storage, Some("a/b"), "Alice", ""),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            login(&storage, Some("a\\b"), "Alice", ""),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn empty_name_is_rejected() {
        let (_temp, storage) = storage();
        assert!(matches!(
            login(&storage, None, "   ", ""),
            Err(Error::InvalidInput(_))
        ));
    }
}
