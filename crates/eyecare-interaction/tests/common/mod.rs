#![allow(dead_code)]

use async_trait::async_trait;
use eyecare_core::session::{PersistedSession, UserProfile, UserRole};
use eyecare_infrastructure::{ClientConfig, InMemoryTokenStore};
use eyecare_interaction::{
    ApiRequest, EyecareClient, HttpTransport, RawResponse, TransportError,
};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replays queued responses in order and records every request it sees.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: Value) -> &Self {
        let body = if body.is_null() {
            String::new()
        } else {
            body.to_string()
        };
        self.respond_raw(status, body)
    }

    pub fn respond_raw(&self, status: u16, body: impl Into<String>) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(RawResponse::new(status, body)));
        self
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(TransportError::new(message)));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("no scripted response left")))
    }
}

pub const BASE: &str = "http://localhost:8000/api/";

pub fn config() -> ClientConfig {
    ClientConfig::default()
}

pub fn profile(id: u64, username: &str, role: UserRole) -> UserProfile {
    UserProfile {
        id,
        username: username.to_string(),
        email: format!("{username}@example.com"),
        first_name: String::new(),
        last_name: String::new(),
        role,
        specialization: None,
    }
}

pub fn persisted(id: u64, username: &str, role: UserRole, token: &str) -> PersistedSession {
    PersistedSession {
        token: token.to_string(),
        profile: Some(profile(id, username, role)),
    }
}

pub fn user_json(id: u64, username: &str, user_type: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{username}@example.com"),
        "first_name": "",
        "last_name": "",
        "user_type": user_type
    })
}

pub fn consultation_json(id: u64, specialist: u64, status: &str) -> Value {
    json!({
        "id": id,
        "user": 12,
        "specialist": specialist,
        "scan": 41,
        "description": "Blurry vision in the left eye",
        "scheduled_date": null,
        "status": status,
        "created_at": "2024-05-02T09:30:00Z"
    })
}

pub fn scan_json(id: u64, is_reviewed: bool, review: Value) -> Value {
    json!({
        "id": id,
        "image": "/media/eye_scans/left.jpg",
        "condition_detected": "cataract",
        "confidence_score": 0.91,
        "recommendations": "See an ophthalmologist.",
        "is_reviewed": is_reviewed,
        "scanreview": review,
        "created_at": "2024-05-01T10:00:00Z"
    })
}

/// A client signed in as `session` (or anonymous) over `transport`.
pub async fn client_with(
    transport: &Arc<ScriptedTransport>,
    session: Option<PersistedSession>,
) -> (EyecareClient, Arc<InMemoryTokenStore>) {
    let tokens = Arc::new(match session {
        Some(session) => InMemoryTokenStore::with_session(session),
        None => InMemoryTokenStore::new(),
    });
    let client = EyecareClient::with_transport(&config(), transport.clone(), tokens.clone()).await;
    (client, tokens)
}
