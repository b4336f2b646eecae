//! Start-up probe of the configured collection routes.

use eyecare_core::request::{Endpoint, RequestError};

use crate::resource_client::ResourceClient;
use crate::routes::ApiRoutes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteStatus {
    /// The server answered; the route exists (401/403/405 included).
    Present,
    /// 404: the configured path is wrong for this deployment.
    Missing,
    /// No answer, or the server failed.
    Unreachable(RequestError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteReport {
    pub name: &'static str,
    pub path: String,
    pub status: RouteStatus,
}

impl RouteReport {
    pub fn is_missing(&self) -> bool {
        self.status == RouteStatus::Missing
    }
}

/// Issues one GET per collection route, in order.
pub async fn check_routes(client: &ResourceClient, routes: &ApiRoutes) -> Vec<RouteReport> {
    let mut reports = Vec::new();
    for (name, path) in routes.collections() {
        // Sent as public so an anonymous check still reaches the server.
        let endpoint = Endpoint::public(path.clone());
        let status = match client.fetch_list(&endpoint, name).await {
            Ok(_) => RouteStatus::Present,
            Err(RequestError::EndpointMissing { .. }) => RouteStatus::Missing,
            Err(
                RequestError::Unauthenticated
                | RequestError::MethodNotSupported { .. }
                | RequestError::ValidationFailed { .. }
                | RequestError::Rejected { .. }
                | RequestError::MalformedResponse { .. },
            ) => RouteStatus::Present,
            Err(err) => RouteStatus::Unreachable(err),
        };
        if status == RouteStatus::Missing {
            tracing::error!(route = name, %path, "Configured route not found on server");
        }
        reports.push(RouteReport { name, path, status });
    }
    reports
}
