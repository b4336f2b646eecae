//! Unified path management for EyeCare client files.
//!
//! Configuration and the persisted session both live in the platform config
//! directory resolved through `dirs`.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "eyecare";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find the config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for eyecare_core::EyecareError {
    fn from(e: PathError) -> Self {
        eyecare_core::EyecareError::config(e.to_string())
    }
}

/// Path resolution for the client.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/eyecare/
/// ├── config.toml      # API base URL, media base URL, routes
/// └── session.json     # Bearer token + cached profile (0600)
/// ```
///
/// A base directory override replaces `~/.config/eyecare/` entirely, which
/// is how tests point storage at a temporary directory.
#[derive(Debug, Clone, Default)]
pub struct EyecarePaths {
    base: Option<PathBuf>,
}

impl EyecarePaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the client configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: The override, or e.g. `~/.config/eyecare/`
    /// - `Err(PathError::ConfigDirNotFound)`: No override and no platform directory
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path of the persisted session.
    ///
    /// # Security Note
    ///
    /// The file holds a bearer token; writers restrict it to 0600.
    pub fn session_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("session.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_override() {
        let paths = EyecarePaths::new(Some(Path::new("/tmp/eyecare-test")));
        assert_eq!(
            paths.config_file().unwrap(),
            PathBuf::from("/tmp/eyecare-test/config.toml")
        );
        assert_eq!(
            paths.session_file().unwrap(),
            PathBuf::from("/tmp/eyecare-test/session.json")
        );
    }

    #[test]
    fn test_default_dir_ends_with_app_name() {
        if let Ok(dir) = EyecarePaths::default().config_dir() {
            assert!(dir.ends_with("eyecare"));
            assert!(
                EyecarePaths::default()
                    .session_file()
                    .unwrap()
                    .starts_with(&dir)
            );
        }
    }
}
