//! Endpoint resolution from configured route templates.

use eyecare_core::consultation::ConsultationAction;
use eyecare_core::request::Endpoint;
use eyecare_infrastructure::RouteConfig;

/// Resolves logical operations to [`Endpoint`]s.
///
/// Paths are relative to the API base URL; nothing outside this type knows
/// what they look like.
#[derive(Debug, Clone, Default)]
pub struct ApiRoutes {
    routes: RouteConfig,
}

impl ApiRoutes {
    pub fn new(routes: RouteConfig) -> Self {
        Self { routes }
    }

    pub fn login(&self) -> Endpoint {
        Endpoint::anonymous(&self.routes.login)
    }

    pub fn register(&self) -> Endpoint {
        Endpoint::anonymous(&self.routes.register)
    }

    pub fn specialists(&self) -> Endpoint {
        Endpoint::authenticated(&self.routes.specialists)
    }

    pub fn scans(&self) -> Endpoint {
        Endpoint::authenticated(&self.routes.scans)
    }

    pub fn scan(&self, id: u64) -> Endpoint {
        Endpoint::authenticated(detail_path(&self.routes.scans, id))
    }

    pub fn scan_review(&self, id: u64) -> Endpoint {
        Endpoint::authenticated(expand(&self.routes.scan_review, id, None))
    }

    pub fn consultations(&self) -> Endpoint {
        Endpoint::authenticated(&self.routes.consultations)
    }

    pub fn consultation_action(&self, id: u64, action: ConsultationAction) -> Endpoint {
        Endpoint::authenticated(expand(
            &self.routes.consultation_action,
            id,
            Some(action.path_segment()),
        ))
    }

    pub fn articles(&self) -> Endpoint {
        Endpoint::public(&self.routes.articles)
    }

    pub fn contact(&self) -> Endpoint {
        Endpoint::public(&self.routes.contact)
    }

    /// Collection routes probed by the start-up check, with their names.
    pub fn collections(&self) -> Vec<(&'static str, String)> {
        vec![
            ("scans", self.routes.scans.clone()),
            ("consultations", self.routes.consultations.clone()),
            ("specialists", self.routes.specialists.clone()),
            ("articles", self.routes.articles.clone()),
        ]
    }
}

fn detail_path(collection: &str, id: u64) -> String {
    format!("{}/{}/", collection.trim_end_matches('/'), id)
}

fn expand(template: &str, id: u64, action: Option<&str>) -> String {
    let path = template.replace("{id}", &id.to_string());
    match action {
        Some(action) => path.replace("{action}", action),
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_routes() {
        let routes = ApiRoutes::default();
        assert_eq!(routes.login().path, "auth/login/");
        assert!(!routes.login().requires_session());
        assert!(!routes.login().sends_token());
        assert!(!routes.register().sends_token());
        assert!(routes.articles().sends_token());
        assert_eq!(routes.scan(41).path, "scans/41/");
        assert_eq!(routes.scan_review(41).path, "scans/41/review/");
        assert_eq!(
            routes
                .consultation_action(7, ConsultationAction::Approve)
                .path,
            "consultations/7/approve/"
        );
        assert!(routes.consultations().requires_session());
        assert!(!routes.articles().requires_session());
    }

    #[test]
    fn test_configured_prefix_is_used_everywhere() {
        let routes = ApiRoutes::new(RouteConfig {
            consultations: "consultations/consultations/".to_string(),
            consultation_action: "consultations/consultations/{id}/{action}/".to_string(),
            ..RouteConfig::default()
        });
        assert_eq!(
            routes.consultation_action(9, ConsultationAction::Cancel).path,
            "consultations/consultations/9/cancel/"
        );
        assert!(
            routes
                .collections()
                .contains(&("consultations", "consultations/consultations/".to_string()))
        );
    }
}
