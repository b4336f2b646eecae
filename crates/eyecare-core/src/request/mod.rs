//! Transport-agnostic request vocabulary.
//!
//! The Resource Client (in `eyecare-interaction`) speaks in these terms so that
//! classification and normalization stay pure and testable here.
//!
//! # Module Structure
//!
//! - `error`: the closed failure taxonomy and status classification
//! - `normalize`: list-response shape normalization

mod error;
mod normalize;

pub use error::{Affordance, RequestError, classify_status, flatten_messages};
pub use normalize::{normalize_list, normalize_records};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// HTTP verbs used against the EyeCare API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// Whether an endpoint needs a signed-in session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Reachable anonymously; the bearer token is still attached when present.
    Public,
    /// Rejected locally with `Unauthenticated` when no session exists.
    Authenticated,
    /// Never carries the bearer token (sign-in and registration).
    Anonymous,
}

/// A resolved API endpoint: a path relative to the configured base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub path: String,
    pub access: Access,
}

impl Endpoint {
    pub fn public(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            access: Access::Public,
        }
    }

    pub fn authenticated(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            access: Access::Authenticated,
        }
    }

    pub fn anonymous(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            access: Access::Anonymous,
        }
    }

    pub fn requires_session(&self) -> bool {
        self.access == Access::Authenticated
    }

    pub fn sends_token(&self) -> bool {
        self.access != Access::Anonymous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_method_display_is_uppercase() {
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::from_str("DELETE").unwrap(), HttpMethod::Delete);
    }

    #[test]
    fn test_endpoint_access() {
        assert!(Endpoint::authenticated("scans/").requires_session());
        assert!(!Endpoint::public("articles/").requires_session());
        assert!(Endpoint::public("articles/").sends_token());
        assert!(!Endpoint::anonymous("auth/login/").requires_session());
        assert!(!Endpoint::anonymous("auth/login/").sends_token());
    }
}
