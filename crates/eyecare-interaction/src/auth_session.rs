//! The Auth Session Store.
//!
//! Sole owner of the [`SessionWriter`] and the only caller of the mutating
//! [`TokenStore`] methods. Everything else observes the session through a
//! [`SessionReader`].

use async_trait::async_trait;
use eyecare_core::request::{HttpMethod, RequestError};
use eyecare_core::session::{
    AuthError, Capabilities, Credentials, PersistedSession, RegistrationProfile, Session,
    SessionReader, SessionWriter, TokenStore, UserProfile, session_channel,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::resource_client::{ResourceClient, SessionExpiry, decode};
use crate::routes::ApiRoutes;
use crate::transport::HttpTransport;

/// Body of a successful login or registration.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    user: UserProfile,
    #[serde(default)]
    access: Option<String>,
    #[serde(default)]
    token: Option<String>,
}

impl TokenResponse {
    fn into_parts(self) -> Result<(UserProfile, String), RequestError> {
        match self.access.or(self.token) {
            Some(token) if !token.trim().is_empty() => Ok((self.user, token)),
            _ => Err(RequestError::malformed("response carried no access token")),
        }
    }
}

/// Writer plus durable storage, shared with the expiry hook.
struct SessionCell {
    writer: SessionWriter,
    tokens: Arc<dyn TokenStore>,
}

impl SessionCell {
    async fn drop_session(&self) -> Result<(), AuthError> {
        self.writer.clear();
        self.tokens
            .clear()
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))
    }
}

#[async_trait]
impl SessionExpiry for SessionCell {
    async fn session_rejected(&self) {
        tracing::info!("Server rejected the session token; signing out");
        if let Err(e) = self.drop_session().await {
            tracing::warn!("Failed to clear persisted session after expiry: {}", e);
        }
    }
}

pub struct AuthSessionStore {
    cell: Arc<SessionCell>,
    reader: SessionReader,
    client: ResourceClient,
    routes: ApiRoutes,
}

impl AuthSessionStore {
    /// Creates the store and restores any persisted session.
    pub async fn open(
        transport: Arc<dyn HttpTransport>,
        tokens: Arc<dyn TokenStore>,
        base_url: impl Into<String>,
        routes: ApiRoutes,
    ) -> Self {
        let (writer, reader) = session_channel();
        let client = ResourceClient::new(transport, reader.clone(), base_url);
        let store = Self {
            cell: Arc::new(SessionCell { writer, tokens }),
            reader,
            client,
            routes,
        };
        store.restore().await;
        store
    }

    /// A Resource Client bound to this session; a 401 to any request that
    /// carried the token signs the user out.
    pub fn resource_client(&self) -> ResourceClient {
        let expiry: Arc<dyn SessionExpiry> = self.cell.clone();
        self.client.clone().with_expiry(expiry)
    }

    pub fn reader(&self) -> SessionReader {
        self.reader.clone()
    }

    pub fn current_session(&self) -> Option<Session> {
        self.reader.current()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.reader.capabilities()
    }

    /// Exchanges credentials for a token and persists it.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let body = serde_json::to_value(credentials)
            .map_err(|e| RequestError::malformed(e.to_string()))?;
        let endpoint = self.routes.login();

        let response = self
            .client
            .request(&endpoint, HttpMethod::Post, Some(body))
            .await
            .map_err(|err| match err {
                RequestError::Unauthenticated
                | RequestError::ValidationFailed { status: 400, .. }
                | RequestError::Rejected { status: 400, .. } => AuthError::InvalidCredentials,
                RequestError::ConnectivityFailure { message } => {
                    AuthError::NetworkUnavailable(message)
                }
                other => AuthError::Request(other),
            });

        let response = match response {
            Ok(response) => response,
            Err(err) => {
                tracing::info!(username = %credentials.username, "Login failed: {}", err);
                return Err(err);
            }
        };
        self.establish(response, &endpoint.path).await
    }

    /// Creates an account and signs it in.
    pub async fn register(&self, profile: &RegistrationProfile) -> Result<Session, AuthError> {
        profile.validate()?;

        let body =
            serde_json::to_value(profile).map_err(|e| RequestError::malformed(e.to_string()))?;
        let endpoint = self.routes.register();

        let response = self
            .client
            .request(&endpoint, HttpMethod::Post, Some(body))
            .await
            .map_err(|err| match err {
                RequestError::ValidationFailed { message, .. }
                | RequestError::Rejected { message, .. } => AuthError::Rejected(message),
                RequestError::ConnectivityFailure { message } => {
                    AuthError::NetworkUnavailable(message)
                }
                other => AuthError::Request(other),
            })?;
        self.establish(response, &endpoint.path).await
    }

    /// Clears the persisted token and the in-memory session. Idempotent.
    pub async fn logout(&self) -> Result<(), AuthError> {
        let was_signed_in = self.reader.is_authenticated();
        self.cell.drop_session().await?;
        if was_signed_in {
            tracing::info!("Signed out");
        }
        Ok(())
    }

    /// Drops a session the server no longer accepts.
    pub async fn expire(&self) {
        self.cell.session_rejected().await;
    }

    async fn establish(&self, response: Value, path: &str) -> Result<Session, AuthError> {
        let (profile, token) = decode::<TokenResponse>(response, path)?.into_parts()?;

        self.cell
            .tokens
            .save(&PersistedSession {
                token: token.clone(),
                profile: Some(profile.clone()),
            })
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        let session = Session::new(&profile, token);
        self.cell.writer.set(session.clone());
        tracing::info!(username = %session.username, role = %session.role, "Signed in");
        Ok(session)
    }

    async fn restore(&self) {
        let persisted = match self.cell.tokens.load().await {
            Ok(persisted) => persisted,
            Err(e) => {
                tracing::warn!("Ignoring unreadable persisted session: {}", e);
                return;
            }
        };

        match persisted {
            Some(PersistedSession {
                token,
                profile: Some(profile),
            }) => {
                let session = Session::new(&profile, token);
                tracing::debug!(username = %session.username, "Restored persisted session");
                self.cell.writer.set(session);
            }
            Some(PersistedSession { profile: None, .. }) => {
                tracing::warn!("Persisted session has no profile; discarding it");
                if let Err(e) = self.cell.tokens.clear().await {
                    tracing::warn!("Failed to discard persisted session: {}", e);
                }
            }
            None => {}
        }
    }
}
