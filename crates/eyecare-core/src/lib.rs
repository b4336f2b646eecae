//! Domain layer of the EyeCare client.
//!
//! Nothing in this crate performs I/O: it holds the models the backend returns,
//! the closed enums agreed with it, the consultation workflow, failure
//! classification, list normalization and the render state views keep.

pub mod article;
pub mod consultation;
pub mod contact;
pub mod error;
pub mod request;
pub mod scan;
pub mod session;
pub mod specialist;
pub mod view;
pub mod workflow;

pub use error::EyecareError;
pub use request::RequestError;
pub use workflow::WorkflowError;
