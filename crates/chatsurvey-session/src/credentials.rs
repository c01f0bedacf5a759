//! Stored admin session
//!
//! `login` writes the session here and `logout` removes it. Admin commands
//! read it back and pass it to every call.

use crate::storage::StorageResult;
use chatsurvey_core::AdminSession;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// JSON file holding the current admin session
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> StorageResult<Option<AdminSession>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).await?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// The stored session, unless it is missing or expired
    ///
    /// An expired session is removed from disk.
    pub async fn active(&self) -> StorageResult<Option<AdminSession>> {
        let session = self.load().await?;
        if !AdminSession::should_logout(session.as_ref()) {
            return Ok(session);
        }
        if session.is_some() {
            debug!("Dropping expired session at {:?}", self.path);
            self.clear().await?;
        }
        Ok(None)
    }

    pub async fn save(&self, session: &AdminSession) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(session)?).await?;
        debug!("Stored session for {} at {:?}", session.username, self.path);
        Ok(())
    }

    /// Remove the stored session; returns whether there was one
    pub async fn clear(&self) -> StorageResult<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path).await?;
        Ok(true)
    }
}
