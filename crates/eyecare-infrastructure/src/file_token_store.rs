//! File-backed token store.
//!
//! Keeps the bearer token and cached profile in `session.json` next to the
//! configuration.
//!
//! # Design
//!
//! - **Atomic**: writes go through [`AtomicFile`] (tmp + fsync + rename)
//! - **Private**: the file is written with mode 0600 on Unix
//! - **Async-safe**: file I/O runs inside `tokio::task::spawn_blocking`

use async_trait::async_trait;
use eyecare_core::error::{EyecareError, Result};
use eyecare_core::session::{PersistedSession, TokenStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task;

use crate::paths::EyecarePaths;
use crate::storage::{AtomicFile, FileFormat};

const SESSION_FILE_MODE: u32 = 0o600;

pub struct FileTokenStore {
    file: Arc<AtomicFile<PersistedSession>>,
}

impl FileTokenStore {
    /// Uses the default location, `~/.config/eyecare/session.json`.
    pub fn new() -> Result<Self> {
        Self::from_paths(&EyecarePaths::default())
    }

    pub fn from_paths(paths: &EyecarePaths) -> Result<Self> {
        Ok(Self::with_path(paths.session_file()?))
    }

    /// Creates a store at an explicit path (useful for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicFile::new(path, FileFormat::Json).with_mode(SESSION_FILE_MODE)),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<PersistedSession>> {
        let file = self.file.clone();
        let loaded = task::spawn_blocking(move || file.load())
            .await
            .map_err(|e| EyecareError::io(format!("Failed to spawn blocking task: {}", e)))?;

        match loaded {
            Ok(Some(session)) if session.token.trim().is_empty() => Ok(None),
            Ok(session) => Ok(session),
            Err(e) => {
                tracing::warn!(path = %self.path().display(), "Persisted session unreadable: {}", e);
                Err(e.into())
            }
        }
    }

    async fn save(&self, session: &PersistedSession) -> Result<()> {
        let file = self.file.clone();
        let session = session.clone();
        task::spawn_blocking(move || file.save(&session))
            .await
            .map_err(|e| EyecareError::io(format!("Failed to spawn blocking task: {}", e)))??;
        tracing::debug!(path = %self.path().display(), "Session persisted");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let file = self.file.clone();
        task::spawn_blocking(move || file.remove())
            .await
            .map_err(|e| EyecareError::io(format!("Failed to spawn blocking task: {}", e)))??;
        Ok(())
    }
}
