//! Machine-local plumbing for the EyeCare client: where files live, how they
//! are written, and how configuration is read.

pub mod config_service;
pub mod file_token_store;
pub mod memory_token_store;
pub mod paths;
pub mod storage;

pub use crate::config_service::{ClientConfig, ConfigService, RouteConfig};
pub use crate::file_token_store::FileTokenStore;
pub use crate::memory_token_store::InMemoryTokenStore;
pub use crate::paths::{EyecarePaths, PathError};
