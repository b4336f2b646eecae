//! The Resource Client: one choke point for every backend call.
//!
//! It attaches the bearer token, rejects protected calls locally when nobody
//! is signed in, classifies every failure into [`RequestError`] and
//! normalizes collection responses. It never retries.

use async_trait::async_trait;
use eyecare_core::request::{
    Endpoint, HttpMethod, RequestError, classify_status, normalize_list, normalize_records,
};
use eyecare_core::session::{Capabilities, Session, SessionReader};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::transport::{ApiRequest, FilePart, HttpTransport, RequestBody};

/// Notified when the server answers 401 to a request that carried a token.
#[async_trait]
pub trait SessionExpiry: Send + Sync {
    async fn session_rejected(&self);
}

#[derive(Clone)]
pub struct ResourceClient {
    transport: Arc<dyn HttpTransport>,
    session: SessionReader,
    base_url: String,
    expiry: Option<Arc<dyn SessionExpiry>>,
}

impl ResourceClient {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        session: SessionReader,
        base_url: impl Into<String>,
    ) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            transport,
            session,
            base_url,
            expiry: None,
        }
    }

    pub fn with_expiry(mut self, expiry: Arc<dyn SessionExpiry>) -> Self {
        self.expiry = Some(expiry);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn current_session(&self) -> Option<Session> {
        self.session.current()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.session.capabilities()
    }

    pub fn url_for(&self, endpoint: &Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path.trim_start_matches('/'))
    }

    /// Sends one request and returns the decoded JSON body.
    ///
    /// # Returns
    ///
    /// - `Ok(Value)`: 2xx; `Value::Null` when the body is empty
    /// - `Err(RequestError)`: Every other outcome, already classified
    pub async fn request(
        &self,
        endpoint: &Endpoint,
        method: HttpMethod,
        body: Option<Value>,
    ) -> Result<Value, RequestError> {
        let body = body.map(RequestBody::Json).unwrap_or(RequestBody::None);
        self.send(endpoint, method, body).await
    }

    /// Sends a multipart upload with a single file part.
    pub async fn upload(&self, endpoint: &Endpoint, file: FilePart) -> Result<Value, RequestError> {
        self.send(endpoint, HttpMethod::Post, RequestBody::Multipart(file))
            .await
    }

    /// GETs a collection and normalizes its shape.
    pub async fn fetch_list(
        &self,
        endpoint: &Endpoint,
        resource_name: &str,
    ) -> Result<Vec<Value>, RequestError> {
        let body = self.request(endpoint, HttpMethod::Get, None).await?;
        Ok(normalize_list(body, resource_name))
    }

    /// GETs a collection and decodes every item.
    pub async fn fetch_records<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        resource_name: &str,
    ) -> Result<Vec<T>, RequestError> {
        let body = self.request(endpoint, HttpMethod::Get, None).await?;
        normalize_records(body, resource_name)
    }

    /// Sends a request and decodes the body as one record.
    pub async fn fetch_record<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        method: HttpMethod,
        body: Option<Value>,
    ) -> Result<T, RequestError> {
        let value = self.request(endpoint, method, body).await?;
        decode(value, &endpoint.path)
    }

    async fn send(
        &self,
        endpoint: &Endpoint,
        method: HttpMethod,
        body: RequestBody,
    ) -> Result<Value, RequestError> {
        let session = self.session.current();
        if endpoint.requires_session() && session.is_none() {
            tracing::debug!(%method, path = %endpoint.path, "Rejected locally: no session");
            return Err(RequestError::Unauthenticated);
        }

        let authorization = session
            .as_ref()
            .filter(|_| endpoint.sends_token())
            .map(Session::bearer_header);
        let sent_token = authorization.is_some();
        let request = ApiRequest {
            method,
            url: self.url_for(endpoint),
            authorization,
            body,
        };

        tracing::debug!(%method, path = %endpoint.path, "Sending request");
        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(%method, path = %endpoint.path, "No response: {}", err);
                return Err(RequestError::connectivity(err.message));
            }
        };

        if response.is_success() {
            tracing::debug!(%method, path = %endpoint.path, status = response.status, "Request succeeded");
            if response.body.trim().is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&response.body).map_err(|e| {
                RequestError::malformed(format!("{} returned invalid JSON: {e}", endpoint.path))
            });
        }

        let error = classify_status(response.status, &endpoint.path, &response.body);
        tracing::warn!(
            %method,
            path = %endpoint.path,
            status = response.status,
            "Request failed: {}",
            error
        );

        if error.is_unauthenticated()
            && sent_token
            && let Some(expiry) = &self.expiry
        {
            expiry.session_rejected().await;
        }
        Err(error)
    }
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value, path: &str) -> Result<T, RequestError> {
    serde_json::from_value(value)
        .map_err(|e| RequestError::malformed(format!("{path} returned an unexpected record: {e}")))
}
