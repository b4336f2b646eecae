//! Client configuration.
//!
//! Loads `~/.config/eyecare/config.toml`, then applies environment
//! overrides (`EYECARE_API_URL`, `EYECARE_MEDIA_URL`). Missing files and
//! missing keys fall back to defaults.

use eyecare_core::error::{EyecareError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::paths::EyecarePaths;
use crate::storage::{AtomicFile, FileFormat};

pub const API_URL_ENV: &str = "EYECARE_API_URL";
pub const MEDIA_URL_ENV: &str = "EYECARE_MEDIA_URL";

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/";
const DEFAULT_MEDIA_BASE_URL: &str = "http://localhost:8000";

/// Endpoint paths relative to `api_base_url`.
///
/// `{id}` and `{action}` are substituted at call time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    pub login: String,
    pub register: String,
    pub specialists: String,
    pub scans: String,
    pub scan_review: String,
    pub consultations: String,
    pub consultation_action: String,
    pub articles: String,
    pub contact: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            login: "auth/login/".to_string(),
            register: "auth/register/".to_string(),
            specialists: "auth/specialists/".to_string(),
            scans: "scans/".to_string(),
            scan_review: "scans/{id}/review/".to_string(),
            consultations: "consultations/".to_string(),
            consultation_action: "consultations/{id}/{action}/".to_string(),
            articles: "articles/".to_string(),
            contact: "contact-messages/".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub media_base_url: String,
    /// Request timeout; the HTTP client default applies when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    pub routes: RouteConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            media_base_url: DEFAULT_MEDIA_BASE_URL.to_string(),
            timeout_secs: None,
            routes: RouteConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Applies overrides from a variable lookup (normally `std::env::var`).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            tracing::debug!("{} overrides api_base_url", API_URL_ENV);
            self.api_base_url = url.trim().to_string();
        }
        if let Some(url) = lookup(MEDIA_URL_ENV).filter(|v| !v.trim().is_empty()) {
            tracing::debug!("{} overrides media_base_url", MEDIA_URL_ENV);
            self.media_base_url = url.trim().to_string();
        }
    }

    /// Checks URL schemes and normalizes `api_base_url` to end with `/`,
    /// so relative routes join beneath it.
    pub fn validated(mut self) -> Result<Self> {
        for (key, url) in [
            ("api_base_url", &self.api_base_url),
            ("media_base_url", &self.media_base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(EyecareError::config(format!(
                    "{key} must be an http(s) URL, got '{url}'"
                )));
            }
        }
        if !self.api_base_url.ends_with('/') {
            self.api_base_url.push('/');
        }
        if self.timeout_secs == Some(0) {
            return Err(EyecareError::config("timeout_secs must be greater than 0"));
        }
        Ok(self)
    }
}

/// Loads and caches the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: EyecarePaths,
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    pub fn new(paths: EyecarePaths) -> Self {
        Self {
            paths,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn config_path(&self) -> Result<PathBuf> {
        Ok(self.paths.config_file()?)
    }

    /// Gets the configuration, reading the file and environment on first use.
    pub fn get_config(&self) -> Result<ClientConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(cached) = read_lock.as_ref() {
                return Ok(cached.clone());
            }
        }

        let mut loaded = self.load_file()?;
        loaded.apply_overrides(|key| std::env::var(key).ok());
        let loaded = loaded.validated()?;

        *self.config.write().unwrap_or_else(|e| e.into_inner()) = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        *self.config.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    /// Reads only the file (no environment), defaults when absent.
    pub fn load_file(&self) -> Result<ClientConfig> {
        let file = AtomicFile::<ClientConfig>::new(self.config_path()?, FileFormat::Toml);
        match file.load()? {
            Some(config) => Ok(config),
            None => {
                tracing::debug!(path = %file.path().display(), "No config file, using defaults");
                Ok(ClientConfig::default())
            }
        }
    }

    pub fn save(&self, config: &ClientConfig) -> Result<()> {
        let file = AtomicFile::<ClientConfig>::new(self.config_path()?, FileFormat::Toml);
        file.save(config)?;
        self.invalidate_cache();
        Ok(())
    }

    /// Writes the default configuration if no file exists yet.
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: A new file was written
    /// - `Ok(false)`: A file already existed and was left alone
    pub fn ensure_config_file(&self) -> Result<bool> {
        let path = self.config_path()?;
        if path.exists() {
            return Ok(false);
        }
        self.save(&ClientConfig::default())?;
        tracing::info!(path = %path.display(), "Wrote default configuration");
        Ok(true)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new(EyecarePaths::default())
    }
}
