use eyecare_core::contact::ContactMessage;
use eyecare_core::request::{HttpMethod, RequestError};

use crate::error::ServiceError;
use crate::resource_client::ResourceClient;
use crate::routes::ApiRoutes;

#[derive(Clone)]
pub struct ContactService {
    client: ResourceClient,
    routes: ApiRoutes,
}

impl ContactService {
    pub fn new(client: ResourceClient, routes: ApiRoutes) -> Self {
        Self { client, routes }
    }

    /// Validates and sends a contact message. Invalid forms are never sent.
    pub async fn send(&self, message: &ContactMessage) -> Result<(), ServiceError> {
        let message = message.validate()?;
        let body =
            serde_json::to_value(&message).map_err(|e| RequestError::malformed(e.to_string()))?;
        self.client
            .request(&self.routes.contact(), HttpMethod::Post, Some(body))
            .await?;
        tracing::info!(subject = %message.subject, "Contact message sent");
        Ok(())
    }
}
