use eyecare_core::{RequestError, WorkflowError};
use thiserror::Error;

/// Failure of a resource service call.
///
/// `Workflow` and `File` mean nothing was sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error(transparent)]
    Request(#[from] RequestError),

    /// A local file could not be read for upload.
    #[error("cannot read {path}: {message}")]
    File { path: String, message: String },
}

impl ServiceError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Workflow(err) => err.user_message(),
            Self::Request(err) => err.user_message(),
            Self::File { path, .. } => format!("Could not read the file '{path}'."),
        }
    }

    pub fn as_request(&self) -> Option<&RequestError> {
        match self {
            Self::Request(err) => Some(err),
            _ => None,
        }
    }
}
