//! Login and registration inputs.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use super::model::UserRole;
use crate::request::RequestError;

/// Failures of login, registration and logout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("network unavailable: {0}")]
    NetworkUnavailable(String),

    /// Local check, raised before any network call.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// The backend refused the registration with field errors.
    #[error("registration rejected: {0}")]
    Rejected(String),

    /// The token could not be persisted or cleared.
    #[error("session storage failed: {0}")]
    Storage(String),

    #[error(transparent)]
    Request(#[from] RequestError),
}

impl AuthError {
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidCredentials => "Invalid username or password.".to_string(),
            Self::NetworkUnavailable(_) => {
                "No response from server. Please check your connection.".to_string()
            }
            Self::PasswordMismatch => "Passwords do not match.".to_string(),
            Self::Rejected(message) => message.clone(),
            Self::Storage(_) => "Your session could not be saved on this device.".to_string(),
            Self::Request(err) => err.user_message(),
        }
    }
}

/// Username/password pair sent to the login endpoint.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Fields of the registration form.
#[derive(Clone, Serialize)]
pub struct RegistrationProfile {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password2: String,
    #[serde(rename = "user_type")]
    pub role: UserRole,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
}

impl RegistrationProfile {
    /// Checks that can fail without asking the server.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.password != self.password2 {
            return Err(AuthError::PasswordMismatch);
        }
        Ok(())
    }
}

impl fmt::Debug for RegistrationProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationProfile")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("specialization", &self.specialization)
            .finish_non_exhaustive()
    }
}
