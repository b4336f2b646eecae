//! Contact form messages.

use serde::{Deserialize, Serialize};

use crate::workflow::WorkflowError;

const MIN_SUBJECT_CHARS: usize = 5;
const MIN_MESSAGE_CHARS: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    /// Returns the trimmed message, or the first problem found.
    pub fn validate(&self) -> Result<ContactMessage, WorkflowError> {
        let trimmed = ContactMessage {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        };

        if trimmed.name.is_empty() {
            return Err(WorkflowError::invalid("Please enter your name."));
        }
        if trimmed.email.is_empty() || !trimmed.email.contains('@') {
            return Err(WorkflowError::invalid("Please enter a valid email address."));
        }
        if trimmed.subject.chars().count() < MIN_SUBJECT_CHARS {
            return Err(WorkflowError::invalid(
                "Subject must be at least 5 characters long.",
            ));
        }
        if trimmed.message.chars().count() < MIN_MESSAGE_CHARS {
            return Err(WorkflowError::invalid(
                "Message must be at least 10 characters long.",
            ));
        }
        Ok(trimmed)
    }
}
