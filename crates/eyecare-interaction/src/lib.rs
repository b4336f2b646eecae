//! Network side of the EyeCare client: transport, Resource Client, Auth
//! Session Store and the per-resource services.

pub mod auth_session;
pub mod client;
pub mod error;
pub mod resource_client;
pub mod routes;
pub mod services;
pub mod transport;

pub use auth_session::AuthSessionStore;
pub use client::EyecareClient;
pub use error::ServiceError;
pub use resource_client::{ResourceClient, SessionExpiry};
pub use routes::ApiRoutes;
pub use transport::{
    ApiRequest, FilePart, HttpTransport, RawResponse, ReqwestTransport, RequestBody,
    TransportError,
};
