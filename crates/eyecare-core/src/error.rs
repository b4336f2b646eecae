//! Error types shared by the EyeCare client crates.
//!
//! Network failures have their own taxonomy in [`crate::request::RequestError`];
//! this module covers everything local to the machine (paths, files, formats).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for local (non-network) failures.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum EyecareError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Token storage error
    #[error("Storage error: {0}")]
    Storage(String),
}

impl EyecareError {
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl From<std::io::Error> for EyecareError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for EyecareError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for EyecareError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for EyecareError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, EyecareError>`.
pub type Result<T> = std::result::Result<T, EyecareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion_keeps_kind() {
        let err: EyecareError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(err.to_string().contains("PermissionDenied"));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err: EyecareError = parse.into();
        match err {
            EyecareError::Serialization { format, .. } => assert_eq!(format, "JSON"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_type_checks() {
        assert!(EyecareError::config("missing url").is_config());
        assert!(!EyecareError::storage("locked").is_config());
    }
}
