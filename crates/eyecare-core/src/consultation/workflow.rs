//! Consultation status workflow.
//!
//! ```text
//! pending ──approve──▶ approved ──complete──▶ completed
//!    │                    │
//!    └──cancel──▶ cancelled ◀──cancel──┘
//! ```
//!
//! Transitions are checked locally so illegal ones never reach the network,
//! but the status shown afterwards is always the one the server confirmed.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::model::{ConsultationAction, ConsultationRequest, ConsultationStatus};
use crate::session::{Capabilities, Session};
use crate::workflow::WorkflowError;

impl ConsultationStatus {
    /// Target state of `action`, or `None` when unreachable from here.
    pub fn transition(self, action: ConsultationAction) -> Option<ConsultationStatus> {
        use ConsultationAction as A;
        use ConsultationStatus as S;

        match (self, action) {
            (S::Pending, A::Approve) => Some(S::Approved),
            (S::Pending, A::Cancel) => Some(S::Cancelled),
            (S::Approved, A::Complete) => Some(S::Completed),
            (S::Approved, A::Cancel) => Some(S::Cancelled),
            _ => None,
        }
    }

    pub fn allowed_actions(self) -> &'static [ConsultationAction] {
        match self {
            ConsultationStatus::Pending => {
                &[ConsultationAction::Approve, ConsultationAction::Cancel]
            }
            ConsultationStatus::Approved => {
                &[ConsultationAction::Complete, ConsultationAction::Cancel]
            }
            ConsultationStatus::Completed | ConsultationStatus::Cancelled => &[],
        }
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_actions().is_empty()
    }
}

/// Checks that `session` may perform `action` on `consultation` right now.
///
/// Returns the expected target state.
pub fn authorize_action(
    consultation: &ConsultationRequest,
    action: ConsultationAction,
    session: &Session,
    capabilities: &Capabilities,
) -> Result<ConsultationStatus, WorkflowError> {
    if !capabilities.can_act_on_consultations {
        return Err(WorkflowError::not_permitted(format!(
            "Only the assigned specialist can {action} a consultation."
        )));
    }
    if let Some(specialist_id) = consultation.specialist_id
        && specialist_id != session.user_id
    {
        return Err(WorkflowError::not_permitted(format!(
            "Not authorized to {action} this consultation."
        )));
    }
    consultation
        .status
        .transition(action)
        .ok_or(WorkflowError::IllegalTransition {
            from: consultation.status,
            action,
        })
}

/// The consultation request form as filled in by a patient.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsultationDraft {
    pub specialist_id: Option<u64>,
    pub scan_id: Option<u64>,
    pub description: String,
    pub scheduled_date: Option<DateTime<Utc>>,
}

/// The validated creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewConsultation {
    pub specialist: u64,
    pub scan: u64,
    pub description: String,
    pub scheduled_date: Option<DateTime<Utc>>,
}

impl ConsultationDraft {
    /// Validates the form. On error nothing may be sent.
    pub fn validate(&self, capabilities: &Capabilities) -> Result<NewConsultation, WorkflowError> {
        if !capabilities.can_request_consultation {
            return Err(WorkflowError::not_permitted(
                "Only patients can request consultations.",
            ));
        }
        let specialist = self
            .specialist_id
            .ok_or_else(|| WorkflowError::invalid("Please select a specialist"))?;
        let scan = self
            .scan_id
            .ok_or_else(|| WorkflowError::invalid("Please select a scan"))?;
        let description = self.description.trim();
        if description.is_empty() {
            return Err(WorkflowError::invalid(
                "Please provide a description of your concerns",
            ));
        }

        Ok(NewConsultation {
            specialist,
            scan,
            description: description.to_string(),
            scheduled_date: self.scheduled_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::UserRole;
    use strum::IntoEnumIterator;

    fn consultation(status: ConsultationStatus, specialist_id: Option<u64>) -> ConsultationRequest {
        ConsultationRequest {
            id: 7,
            patient_id: Some(12),
            specialist_id,
            scan_id: Some(41),
            description: "blurry vision".to_string(),
            scheduled_date: None,
            status,
            created_at: None,
            user_name: None,
            specialist_name: None,
        }
    }

    fn session(user_id: u64, role: UserRole) -> Session {
        Session {
            user_id,
            username: "u".to_string(),
            display_name: "U".to_string(),
            role,
            token: "t".to_string(),
        }
    }

    #[test]
    fn test_pending_transitions() {
        use ConsultationAction as A;
        use ConsultationStatus as S;
        assert_eq!(S::Pending.transition(A::Approve), Some(S::Approved));
        assert_eq!(S::Pending.transition(A::Cancel), Some(S::Cancelled));
        assert_eq!(S::Pending.transition(A::Complete), None);
    }

    #[test]
    fn test_approved_transitions() {
        use ConsultationAction as A;
        use ConsultationStatus as S;
        assert_eq!(S::Approved.transition(A::Complete), Some(S::Completed));
        assert_eq!(S::Approved.transition(A::Cancel), Some(S::Cancelled));
        assert_eq!(S::Approved.transition(A::Approve), None);
    }

    #[test]
    fn test_terminal_states_admit_nothing() {
        for status in [ConsultationStatus::Completed, ConsultationStatus::Cancelled] {
            assert!(status.is_terminal());
            for action in ConsultationAction::iter() {
                assert_eq!(status.transition(action), None);
            }
        }
    }

    #[test]
    fn test_allowed_actions_match_transition_table() {
        for status in ConsultationStatus::iter() {
            for action in ConsultationAction::iter() {
                assert_eq!(
                    status.allowed_actions().contains(&action),
                    status.transition(action).is_some(),
                    "{status} / {action}"
                );
            }
        }
    }

    #[test]
    fn test_authorize_assigned_specialist() {
        let specialist = session(3, UserRole::Specialist);
        let caps = Capabilities::for_role(UserRole::Specialist);
        let c = consultation(ConsultationStatus::Pending, Some(3));
        assert_eq!(
            authorize_action(&c, ConsultationAction::Approve, &specialist, &caps),
            Ok(ConsultationStatus::Approved)
        );
    }

    #[test]
    fn test_authorize_rejects_other_specialist_and_patient() {
        let c = consultation(ConsultationStatus::Pending, Some(3));

        let other = session(4, UserRole::Specialist);
        let caps = Capabilities::for_role(UserRole::Specialist);
        assert!(matches!(
            authorize_action(&c, ConsultationAction::Approve, &other, &caps),
            Err(WorkflowError::NotPermitted(_))
        ));

        let patient = session(12, UserRole::Patient);
        let caps = Capabilities::for_role(UserRole::Patient);
        assert!(matches!(
            authorize_action(&c, ConsultationAction::Cancel, &patient, &caps),
            Err(WorkflowError::NotPermitted(_))
        ));
    }

    #[test]
    fn test_authorize_rejects_illegal_transition() {
        let specialist = session(3, UserRole::Specialist);
        let caps = Capabilities::for_role(UserRole::Specialist);
        let c = consultation(ConsultationStatus::Completed, Some(3));
        let err = authorize_action(&c, ConsultationAction::Cancel, &specialist, &caps).unwrap_err();
        assert_eq!(
            err,
            WorkflowError::IllegalTransition {
                from: ConsultationStatus::Completed,
                action: ConsultationAction::Cancel
            }
        );
        assert!(err.user_message().contains("completed"));
    }

    #[test]
    fn test_draft_requires_specialist_scan_and_description() {
        let caps = Capabilities::for_role(UserRole::Patient);
        let mut draft = ConsultationDraft {
            description: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            draft.validate(&caps),
            Err(WorkflowError::invalid("Please select a specialist"))
        );

        draft.specialist_id = Some(3);
        assert_eq!(
            draft.validate(&caps),
            Err(WorkflowError::invalid("Please select a scan"))
        );

        draft.scan_id = Some(41);
        assert!(draft.validate(&caps).is_err());

        draft.description = "  blurry vision ".to_string();
        let payload = draft.validate(&caps).unwrap();
        assert_eq!(payload.description, "blurry vision");
        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(body["specialist"], 3);
        assert_eq!(body["scan"], 41);
        assert!(body["scheduled_date"].is_null());
    }

    #[test]
    fn test_specialist_cannot_create() {
        let draft = ConsultationDraft {
            specialist_id: Some(3),
            scan_id: Some(41),
            description: "blurry".to_string(),
            scheduled_date: None,
        };
        let caps = Capabilities::for_role(UserRole::Specialist);
        assert!(matches!(
            draft.validate(&caps),
            Err(WorkflowError::NotPermitted(_))
        ));
    }
}
