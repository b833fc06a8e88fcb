//! Client-side token storage.
//!
//! The token lives in a small JSON file, by default
//! `~/.student-admin/session.json`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::ClientError;

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    token: String,
    saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.student-admin/session.json`
    pub fn default_path() -> Result<PathBuf, ClientError> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| ClientError::Storage("Unable to determine home directory".to_string()))?;

        let mut path = PathBuf::from(home);
        path.push(".student-admin");
        path.push("session.json");

        Ok(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored token, or `None` when logged out.
    pub fn load(&self) -> Result<Option<String>, ClientError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            ClientError::Storage(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        let session: SessionFile = serde_json::from_str(&contents).map_err(|e| {
            ClientError::Storage(format!("Failed to parse {}: {}", self.path.display(), e))
        })?;

        Ok(Some(session.token))
    }

    pub fn save(&self, token: &str) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ClientError::Storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let contents = serde_json::to_string_pretty(&SessionFile {
            token: token.to_string(),
            saved_at: Utc::now(),
        })
        .map_err(|e| ClientError::Storage(format!("Failed to serialize session: {}", e)))?;

        std::fs::write(&self.path, contents).map_err(|e| {
            ClientError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600)).map_err(
                |e| ClientError::Storage(format!("Failed to restrict permissions: {}", e)),
            )?;
        }

        Ok(())
    }

    /// Forget the token. Clearing an empty store is not an error.
    pub fn clear(&self) -> Result<(), ClientError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).map_err(|e| {
                ClientError::Storage(format!("Failed to remove {}: {}", self.path.display(), e))
            })?;
        }
        Ok(())
    }
}
