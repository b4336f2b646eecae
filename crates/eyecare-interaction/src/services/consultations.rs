use eyecare_core::consultation::{
    ConsultationAction, ConsultationDraft, ConsultationRequest, ConsultationStatus,
    authorize_action,
};
use eyecare_core::request::{HttpMethod, RequestError};
use serde_json::Value;
use std::str::FromStr;

use crate::error::ServiceError;
use crate::resource_client::{ResourceClient, decode};
use crate::routes::ApiRoutes;

/// Consultation requests and their status actions.
#[derive(Clone)]
pub struct ConsultationService {
    client: ResourceClient,
    routes: ApiRoutes,
}

impl ConsultationService {
    pub fn new(client: ResourceClient, routes: ApiRoutes) -> Self {
        Self { client, routes }
    }

    pub async fn list(&self) -> Result<Vec<ConsultationRequest>, RequestError> {
        self.client
            .fetch_records(&self.routes.consultations(), "consultations")
            .await
    }

    /// Creates a pending consultation from a patient's form.
    pub async fn request(&self, draft: &ConsultationDraft) -> Result<ConsultationRequest, ServiceError> {
        let new = draft.validate(&self.client.capabilities())?;
        let body =
            serde_json::to_value(&new).map_err(|e| RequestError::malformed(e.to_string()))?;

        let created: ConsultationRequest = self
            .client
            .fetch_record(&self.routes.consultations(), HttpMethod::Post, Some(body))
            .await?;
        tracing::info!(
            consultation_id = created.id,
            specialist_id = new.specialist,
            "Consultation requested"
        );
        Ok(created)
    }

    /// Performs `action` on `consultation` and returns the server-confirmed record.
    ///
    /// Permission and transition are checked against the displayed state
    /// first; a rejected action never reaches the network.
    pub async fn perform(
        &self,
        consultation: &ConsultationRequest,
        action: ConsultationAction,
    ) -> Result<ConsultationRequest, ServiceError> {
        let session = self
            .client
            .current_session()
            .ok_or(RequestError::Unauthenticated)?;
        let target = authorize_action(
            consultation,
            action,
            &session,
            &self.client.capabilities(),
        )?;

        let endpoint = self.routes.consultation_action(consultation.id, action);
        let body = self
            .client
            .request(&endpoint, HttpMethod::Post, None)
            .await?;
        let confirmed = confirmed_record(consultation, target, body, &endpoint.path)?;
        tracing::info!(
            consultation_id = confirmed.id,
            status = %confirmed.status,
            "Consultation {}",
            action.past_tense()
        );
        Ok(confirmed)
    }
}

/// The record after a successful action.
///
/// A full record in the body wins; a bare `{"status": ..}` updates the
/// displayed record; an empty body means the table's target state.
fn confirmed_record(
    displayed: &ConsultationRequest,
    target: ConsultationStatus,
    body: Value,
    path: &str,
) -> Result<ConsultationRequest, RequestError> {
    if body.get("id").is_some() {
        return decode(body, path);
    }

    let status = match body.get("status").and_then(Value::as_str) {
        Some(raw) => ConsultationStatus::from_str(raw).map_err(|_| {
            RequestError::malformed(format!("{path} returned unknown status '{raw}'"))
        })?,
        None => target,
    };
    Ok(ConsultationRequest {
        status,
        ..displayed.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn displayed() -> ConsultationRequest {
        serde_json::from_value(json!({
            "id": 7, "user": 12, "specialist": 3, "scan": 41,
            "description": "Blurry vision", "status": "pending"
        }))
        .unwrap()
    }

    #[test]
    fn test_full_record_wins() {
        let body = json!({
            "id": 7, "user": 12, "specialist": 3, "scan": 41,
            "description": "Blurry vision", "status": "approved",
            "specialist_name": "Dr. Eze"
        });
        let confirmed =
            confirmed_record(&displayed(), ConsultationStatus::Approved, body, "p").unwrap();
        assert_eq!(confirmed.status, ConsultationStatus::Approved);
        assert_eq!(confirmed.specialist_name.as_deref(), Some("Dr. Eze"));
    }

    #[test]
    fn test_status_only_body() {
        let confirmed = confirmed_record(
            &displayed(),
            ConsultationStatus::Approved,
            json!({"status": "cancelled"}),
            "p",
        )
        .unwrap();
        assert_eq!(confirmed.status, ConsultationStatus::Cancelled);
        assert_eq!(confirmed.description, "Blurry vision");
    }

    #[test]
    fn test_empty_body_uses_target() {
        let confirmed =
            confirmed_record(&displayed(), ConsultationStatus::Approved, Value::Null, "p")
                .unwrap();
        assert_eq!(confirmed.status, ConsultationStatus::Approved);
    }

    #[test]
    fn test_unknown_status_is_malformed() {
        let err = confirmed_record(
            &displayed(),
            ConsultationStatus::Approved,
            json!({"status": "archived"}),
            "p",
        )
        .unwrap_err();
        assert!(matches!(err, RequestError::MalformedResponse { .. }));
    }
}
