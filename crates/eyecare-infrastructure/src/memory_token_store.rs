//! In-memory token store, for tests and `--ephemeral` runs.

use async_trait::async_trait;
use eyecare_core::error::Result;
use eyecare_core::session::{PersistedSession, TokenStore};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    entry: Mutex<Option<PersistedSession>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with a session already persisted.
    pub fn with_session(session: PersistedSession) -> Self {
        Self {
            entry: Mutex::new(Some(session)),
        }
    }

    /// Synchronous peek used by assertions.
    pub fn snapshot(&self) -> Option<PersistedSession> {
        self.entry.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn load(&self) -> Result<Option<PersistedSession>> {
        Ok(self.snapshot())
    }

    async fn save(&self, session: &PersistedSession) -> Result<()> {
        *self.entry.lock().unwrap_or_else(|e| e.into_inner()) = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.entry.lock().unwrap_or_else(|e| e.into_inner()).take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_roundtrip_and_clear() {
        let store = InMemoryTokenStore::new();
        let session = PersistedSession {
            token: "abc".to_string(),
            profile: None,
        };
        store.save(&session).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(session));
        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert!(store.snapshot().is_none());
    }
}
