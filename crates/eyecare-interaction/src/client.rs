//! Wiring of the session store, Resource Client and services.

use eyecare_core::EyecareError;
use eyecare_core::session::TokenStore;
use eyecare_infrastructure::ClientConfig;
use std::sync::Arc;
use std::time::Duration;

use crate::auth_session::AuthSessionStore;
use crate::resource_client::ResourceClient;
use crate::routes::ApiRoutes;
use crate::services::{
    ArticleService, ConsultationService, ContactService, RouteReport, ScanService,
    SpecialistDirectory, check_routes,
};
use crate::transport::{HttpTransport, ReqwestTransport};

/// One configured client: a session store plus the services bound to it.
pub struct EyecareClient {
    auth: AuthSessionStore,
    resources: ResourceClient,
    routes: ApiRoutes,
    media_base_url: String,
}

impl EyecareClient {
    /// Builds a reqwest-backed client and restores any persisted session.
    pub async fn connect(
        config: &ClientConfig,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<Self, EyecareError> {
        let transport = ReqwestTransport::new(config.timeout_secs.map(Duration::from_secs))?;
        Ok(Self::with_transport(config, Arc::new(transport), tokens).await)
    }

    pub async fn with_transport(
        config: &ClientConfig,
        transport: Arc<dyn HttpTransport>,
        tokens: Arc<dyn TokenStore>,
    ) -> Self {
        let routes = ApiRoutes::new(config.routes.clone());
        let auth =
            AuthSessionStore::open(transport, tokens, config.api_base_url.clone(), routes.clone())
                .await;
        let resources = auth.resource_client();
        tracing::debug!(api = %resources.base_url(), "Client ready");
        Self {
            auth,
            resources,
            routes,
            media_base_url: config.media_base_url.clone(),
        }
    }

    pub fn auth(&self) -> &AuthSessionStore {
        &self.auth
    }

    pub fn resources(&self) -> &ResourceClient {
        &self.resources
    }

    pub fn scans(&self) -> ScanService {
        ScanService::new(
            self.resources.clone(),
            self.routes.clone(),
            self.media_base_url.clone(),
        )
    }

    pub fn consultations(&self) -> ConsultationService {
        ConsultationService::new(self.resources.clone(), self.routes.clone())
    }

    pub fn specialists(&self) -> SpecialistDirectory {
        SpecialistDirectory::new(self.resources.clone(), self.routes.clone())
    }

    pub fn articles(&self) -> ArticleService {
        ArticleService::new(self.resources.clone(), self.routes.clone())
    }

    pub fn contact(&self) -> ContactService {
        ContactService::new(self.resources.clone(), self.routes.clone())
    }

    pub async fn check_routes(&self) -> Vec<RouteReport> {
        check_routes(&self.resources, &self.routes).await
    }

    /// Start-up check: the configured collection routes that answered 404.
    pub async fn missing_routes(&self) -> Vec<RouteReport> {
        self.check_routes()
            .await
            .into_iter()
            .filter(|report| report.is_missing())
            .collect()
    }
}
