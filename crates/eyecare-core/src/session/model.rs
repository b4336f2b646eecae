//! Session domain model.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumString};

/// The closed set of account roles agreed with the backend.
///
/// The backend calls patients `"user"`; `"patient"` is accepted too.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum UserRole {
    #[serde(rename = "user", alias = "patient")]
    #[strum(to_string = "patient", serialize = "user")]
    Patient,
    #[serde(rename = "specialist")]
    #[strum(serialize = "specialist")]
    Specialist,
    #[serde(rename = "admin")]
    #[strum(serialize = "admin")]
    Admin,
}

/// The user profile returned alongside a token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(rename = "user_type")]
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
}

impl UserProfile {
    /// Full name when known, otherwise the username.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// The authenticated identity plus bearer token held by the client.
#[derive(Clone, PartialEq)]
pub struct Session {
    pub user_id: u64,
    pub username: String,
    pub display_name: String,
    pub role: UserRole,
    pub token: String,
}

impl Session {
    pub fn new(profile: &UserProfile, token: impl Into<String>) -> Self {
        Self {
            user_id: profile.id,
            username: profile.username.clone(),
            display_name: profile.display_name(),
            role: profile.role,
            token: token.into(),
        }
    }

    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

// Tokens must never reach logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .field("display_name", &self.display_name)
            .field("role", &self.role)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// What survives a restart: exactly one token plus the cached profile.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
}

impl fmt::Debug for PersistedSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistedSession")
            .field("token", &"<redacted>")
            .field("profile", &self.profile)
            .finish()
    }
}
