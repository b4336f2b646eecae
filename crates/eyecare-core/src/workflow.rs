//! Local workflow rejections.
//!
//! These are raised before any request is built; a `WorkflowError` always
//! means the network was not touched.

use thiserror::Error;

use crate::consultation::{ConsultationAction, ConsultationStatus};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// The action is not reachable from the current status.
    #[error("cannot {action} a consultation that is {from}")]
    IllegalTransition {
        from: ConsultationStatus,
        action: ConsultationAction,
    },

    /// The current session lacks the capability for this action.
    #[error("not permitted: {0}")]
    NotPermitted(String),

    /// A form field failed local validation.
    #[error("{0}")]
    Invalid(String),

    /// The scan already carries a specialist review.
    #[error("scan {0} has already been reviewed")]
    AlreadyReviewed(u64),
}

impl WorkflowError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    pub fn not_permitted(message: impl Into<String>) -> Self {
        Self::NotPermitted(message.into())
    }

    /// Banner text for the form that triggered the check.
    pub fn user_message(&self) -> String {
        match self {
            Self::IllegalTransition { from, action } => format!(
                "This consultation is {} and can no longer be {}.",
                from.label().to_lowercase(),
                action.past_tense()
            ),
            Self::NotPermitted(message) | Self::Invalid(message) => message.clone(),
            Self::AlreadyReviewed(_) => "This scan has already been reviewed.".to_string(),
        }
    }
}
