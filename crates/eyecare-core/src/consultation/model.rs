//! Consultation domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Lifecycle state of a consultation. The backend is authoritative.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConsultationStatus {
    Pending,
    Approved,
    Completed,
    Cancelled,
}

impl ConsultationStatus {
    /// The label shown on status chips.
    pub fn label(&self) -> &'static str {
        match self {
            ConsultationStatus::Pending => "Pending Review",
            ConsultationStatus::Approved => "Approved",
            ConsultationStatus::Completed => "Completed",
            ConsultationStatus::Cancelled => "Cancelled",
        }
    }
}

/// A specialist-side state transition, exposed by the backend as
/// `consultations/{id}/{action}/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ConsultationAction {
    Approve,
    Complete,
    Cancel,
}

impl ConsultationAction {
    /// Path segment of the action endpoint.
    pub fn path_segment(&self) -> &'static str {
        match self {
            ConsultationAction::Approve => "approve",
            ConsultationAction::Complete => "complete",
            ConsultationAction::Cancel => "cancel",
        }
    }

    /// Button caption. Cancelling a pending request is presented as declining it.
    pub fn button_label(&self, from: ConsultationStatus) -> &'static str {
        match (self, from) {
            (ConsultationAction::Approve, _) => "Approve",
            (ConsultationAction::Complete, _) => "Mark Complete",
            (ConsultationAction::Cancel, ConsultationStatus::Pending) => "Decline",
            (ConsultationAction::Cancel, _) => "Cancel",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            ConsultationAction::Approve => "approved",
            ConsultationAction::Complete => "completed",
            ConsultationAction::Cancel => "cancelled",
        }
    }
}

/// A patient's request to be seen by a specialist about one scan.
///
/// Only `id`, `status` and `description` are guaranteed by every backend
/// serializer; the rest is optional on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultationRequest {
    pub id: u64,
    #[serde(rename = "user", default)]
    pub patient_id: Option<u64>,
    #[serde(rename = "specialist", default)]
    pub specialist_id: Option<u64>,
    #[serde(rename = "scan", default)]
    pub scan_id: Option<u64>,
    pub description: String,
    #[serde(default)]
    pub scheduled_date: Option<DateTime<Utc>>,
    pub status: ConsultationStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialist_name: Option<String>,
}
