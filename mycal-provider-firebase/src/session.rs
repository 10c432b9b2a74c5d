//! The signed-in user and refresh token kept between runs.
//!
//! Only identity data lives here; calendar events are never written.

use std::path::{Path, PathBuf};

use mycal_core::identity::{Identity, SignInMethod};
use serde::{Deserialize, Serialize};

use crate::error::{FirebaseError, FirebaseResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub method: SignInMethod,
    pub refresh_token: String,
}

impl StoredSession {
    pub fn identity(&self) -> Identity {
        Identity {
            uid: self.uid.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            method: self.method,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SessionFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> FirebaseResult<Option<StoredSession>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            FirebaseError::Session(format!("Failed to read {}: {e}", self.path.display()))
        })?;

        let session = toml::from_str(&contents).map_err(|e| {
            FirebaseError::Session(format!("Failed to parse {}: {e}", self.path.display()))
        })?;

        Ok(Some(session))
    }

    pub fn save(&self, session: &StoredSession) -> FirebaseResult<()> {
        let contents = toml::to_string_pretty(session)
            .map_err(|e| FirebaseError::Session(format!("Failed to serialize session: {e}")))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&self.path, contents)?;

        // Set to owner-only (0600) since file contains a refresh token:
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    pub fn clear(&self) -> FirebaseResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> StoredSession {
        StoredSession {
            uid: "uid-1".into(),
            email: Some("ada@example.com".into()),
            display_name: None,
            method: SignInMethod::Password,
            refresh_token: "refresh".into(),
        }
    }

    #[test]
    fn missing_file_is_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let file = SessionFile::new(dir.path().join("session.toml"));
        assert_eq!(file.load().unwrap(), None);
    }

    #[test]
    fn save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let file = SessionFile::new(dir.path().join("nested").join("session.toml"));

        file.save(&stored()).unwrap();
        assert_eq!(file.load().unwrap(), Some(stored()));

        file.clear().unwrap();
        assert_eq!(file.load().unwrap(), None);
        file.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let file = SessionFile::new(dir.path().join("session.toml"));
        file.save(&stored()).unwrap();

        let mode = std::fs::metadata(file.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn garbage_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, "not = [valid").unwrap();
        assert!(matches!(SessionFile::new(path).load(), Err(FirebaseError::Session(_))));
    }
}
