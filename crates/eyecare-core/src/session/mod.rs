//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: roles, profiles, the in-memory session and its persisted form
//! - `capabilities`: role-derived permissions resolved once per session
//! - `context`: the single-writer session cell
//! - `repository`: the durable token store trait
//! - `auth`: login/registration inputs and the auth error taxonomy

mod auth;
mod capabilities;
mod context;
mod model;
mod repository;

pub use auth::{AuthError, Credentials, RegistrationProfile};
pub use capabilities::Capabilities;
pub use context::{SessionReader, SessionWriter, session_channel};
pub use model::{PersistedSession, Session, UserProfile, UserRole};
pub use repository::TokenStore;
