use serde::Serialize;

use super::model::ScanRecord;
use crate::session::Capabilities;
use crate::workflow::WorkflowError;

const MIN_REVIEW_FIELD_CHARS: usize = 10;

/// A specialist's review as typed into the form, before submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanReviewDraft {
    pub diagnosis: String,
    pub recommendations: String,
}

impl ScanReviewDraft {
    pub fn new(diagnosis: impl Into<String>, recommendations: impl Into<String>) -> Self {
        Self {
            diagnosis: diagnosis.into(),
            recommendations: recommendations.into(),
        }
    }

    /// Checks the draft and the target scan without touching the network.
    pub fn validate_for(
        &self,
        scan: &ScanRecord,
        capabilities: &Capabilities,
    ) -> Result<(), WorkflowError> {
        if !capabilities.can_review_scans {
            return Err(WorkflowError::not_permitted(
                "Only specialists can review scans.",
            ));
        }
        if scan.is_reviewed {
            return Err(WorkflowError::AlreadyReviewed(scan.id));
        }
        if self.diagnosis.trim().chars().count() < MIN_REVIEW_FIELD_CHARS {
            return Err(WorkflowError::invalid(
                "Diagnosis must be at least 10 characters long.",
            ));
        }
        if self.recommendations.trim().chars().count() < MIN_REVIEW_FIELD_CHARS {
            return Err(WorkflowError::invalid(
                "Recommendations must be at least 10 characters long.",
            ));
        }
        Ok(())
    }

    /// The body sent to the review action, trimmed.
    pub fn to_payload(&self) -> Self {
        Self {
            diagnosis: self.diagnosis.trim().to_string(),
            recommendations: self.recommendations.trim().to_string(),
        }
    }
}
