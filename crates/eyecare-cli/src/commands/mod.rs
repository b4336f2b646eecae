pub mod auth;
pub mod config;
pub mod consultations;
pub mod info;
pub mod scans;

use anyhow::{Context, Result};
use eyecare_core::request::{Affordance, RequestError};
use eyecare_core::session::TokenStore;
use eyecare_core::view::Banner;
use eyecare_infrastructure::{
    ClientConfig, ConfigService, EyecarePaths, FileTokenStore, InMemoryTokenStore,
};
use eyecare_interaction::{EyecareClient, ServiceError};
use std::path::PathBuf;
use std::sync::Arc;

use crate::render;

/// Global options shared by every command.
pub struct Settings {
    pub api_url: Option<String>,
    pub config_dir: Option<PathBuf>,
    pub ephemeral: bool,
}

impl Settings {
    pub fn paths(&self) -> EyecarePaths {
        EyecarePaths::new(self.config_dir.as_deref())
    }

    /// config.toml, then environment, then `--api-url`.
    pub fn effective_config(&self) -> Result<ClientConfig> {
        let service = ConfigService::new(self.paths());
        let mut config = service
            .get_config()
            .context("Failed to load configuration")?;
        if let Some(url) = &self.api_url {
            config.api_base_url = url.clone();
            config = config.validated().context("Invalid --api-url")?;
        }
        Ok(config)
    }
}

pub async fn connect(settings: &Settings) -> Result<EyecareClient> {
    let config = settings.effective_config()?;
    let tokens: Arc<dyn TokenStore> = if settings.ephemeral {
        Arc::new(InMemoryTokenStore::new())
    } else {
        Arc::new(
            FileTokenStore::from_paths(&settings.paths())
                .context("Failed to locate session storage")?,
        )
    };
    tracing::debug!(api = %config.api_base_url, ephemeral = settings.ephemeral, "Connecting");
    Ok(EyecareClient::connect(&config, tokens).await?)
}

/// Warns about configured routes the server does not know; never fatal.
pub async fn warn_missing_routes(client: &EyecareClient) {
    for report in client.missing_routes().await {
        render::banner(&Banner::from(&RequestError::EndpointMissing {
            path: report.path,
        }));
    }
}

/// Turns a classified request failure into the banner the user sees.
pub fn request_failure(err: RequestError) -> anyhow::Error {
    let hint = match err.affordance() {
        Affordance::Relogin => " Run `eyecare login`.",
        Affordance::Retry => " Try again.",
        Affordance::None => "",
    };
    anyhow::anyhow!("{}{}", err.user_message(), hint)
}

pub fn service_failure(err: ServiceError) -> anyhow::Error {
    match err {
        ServiceError::Request(err) => request_failure(err),
        other => anyhow::anyhow!(other.user_message()),
    }
}
