//! Persistence of the identity session between runs
//!
//! The session is written atomically (temp file, then rename) so a crash
//! mid-write never leaves a truncated `session.json`.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use super::identity::AuthSession;
use crate::config::paths::TrackerPaths;
use crate::error::TrackerError;

/// Reads and writes `session.json`
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(paths: &TrackerPaths) -> Self {
        Self {
            path: paths.session_file(),
        }
    }

    /// Load the saved session, if any
    ///
    /// A file that no longer parses is treated as no session.
    pub fn load(&self) -> Result<Option<AuthSession>, TrackerError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let file = File::open(&self.path).map_err(|e| {
            TrackerError::Io(format!("Failed to open {}: {}", self.path.display(), e))
        })?;

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable session file");
                Ok(None)
            }
        }
    }

    /// Write the session atomically
    pub fn save(&self, session: &AuthSession) -> Result<(), TrackerError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                TrackerError::Io(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let file = File::create(&temp_path)
            .map_err(|e| TrackerError::Io(format!("Failed to create temp file: {}", e)))?;
        restrict_permissions(&file);

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, session)?;
        writer
            .flush()
            .map_err(|e| TrackerError::Io(format!("Failed to flush session: {}", e)))?;

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            TrackerError::Io(format!("Failed to rename temp file: {}", e))
        })?;

        Ok(())
    }

    /// Remove the saved session
    pub fn clear(&self) -> Result<(), TrackerError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TrackerError::Io(format!(
                "Failed to remove session file: {}",
                e
            ))),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(file: &File) {
    use std::os::unix::fs::PermissionsExt;
    let _ = file.set_permissions(fs::Permissions::from_mode(0o600));
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &File) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::identity::User;
    use chrono::Utc;
    use tempfile::TempDir;

    fn session() -> AuthSession {
        AuthSession {
            user: User {
                uid: "u1".into(),
                email: Some("a@b.co".into()),
                display_name: None,
                is_anonymous: false,
            },
            id_token: "id".into(),
            refresh_token: "refresh".into(),
            expires_at: Utc::now(),
        }
    }

    #[test]
    fn test_save_load_clear() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = SessionStore::new(&paths);

        assert!(store.load().unwrap().is_none());

        let saved = session();
        store.save(&saved).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.user, saved.user);
        assert_eq!(loaded.refresh_token.expose(), "refresh");

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.session_file(), "{not json").unwrap();

        let store = SessionStore::new(&paths);
        assert!(store.load().unwrap().is_none());
    }
}
