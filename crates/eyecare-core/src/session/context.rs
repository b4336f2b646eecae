//! The shared session cell.
//!
//! One [`SessionWriter`] exists per process and is owned by the Auth Session
//! Store; everything else gets a cloneable [`SessionReader`].

use std::sync::{Arc, RwLock};

use super::capabilities::Capabilities;
use super::model::Session;

#[derive(Debug, Default)]
struct SessionState {
    session: Option<Session>,
    capabilities: Capabilities,
}

/// Creates a linked writer/reader pair over an empty session.
pub fn session_channel() -> (SessionWriter, SessionReader) {
    let state = Arc::new(RwLock::new(SessionState::default()));
    (
        SessionWriter {
            state: state.clone(),
        },
        SessionReader { state },
    )
}

/// Exclusive write handle. Deliberately not `Clone`.
#[derive(Debug)]
pub struct SessionWriter {
    state: Arc<RwLock<SessionState>>,
}

impl SessionWriter {
    pub fn set(&self, session: Session) {
        let capabilities = Capabilities::for_role(session.role);
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.session = Some(session);
        state.capabilities = capabilities;
    }

    pub fn clear(&self) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.session = None;
        state.capabilities = Capabilities::anonymous();
    }

    pub fn reader(&self) -> SessionReader {
        SessionReader {
            state: self.state.clone(),
        }
    }
}

/// Read-only view of the current session.
#[derive(Debug, Clone)]
pub struct SessionReader {
    state: Arc<RwLock<SessionState>>,
}

impl SessionReader {
    pub fn current(&self) -> Option<Session> {
        self.state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .session
            .clone()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .capabilities
    }

    pub fn is_authenticated(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .session
            .is_some()
    }
}
