use eyecare_core::specialist::SpecialistProfile;

use crate::resource_client::ResourceClient;
use crate::routes::ApiRoutes;

/// Specialists a patient can address a consultation to.
#[derive(Clone)]
pub struct SpecialistDirectory {
    client: ResourceClient,
    routes: ApiRoutes,
}

impl SpecialistDirectory {
    pub fn new(client: ResourceClient, routes: ApiRoutes) -> Self {
        Self { client, routes }
    }

    /// Best effort: any failure yields an empty directory.
    pub async fn list(&self) -> Vec<SpecialistProfile> {
        match self
            .client
            .fetch_records(&self.routes.specialists(), "specialists")
            .await
        {
            Ok(specialists) => specialists,
            Err(err) => {
                tracing::warn!("Specialist directory unavailable: {}", err);
                Vec::new()
            }
        }
    }
}
