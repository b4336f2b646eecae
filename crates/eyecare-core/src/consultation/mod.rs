//! Consultation domain module.
//!
//! # Module Structure
//!
//! - `model`: consultation record, status and action enums
//! - `workflow`: transition table, authorization, creation form
//! - `board`: list state with confirmed-only row updates

mod board;
mod model;
mod workflow;

pub use board::{ConsultationBoard, ConsultationRow, StatusCounts};
pub use model::{ConsultationAction, ConsultationRequest, ConsultationStatus};
pub use workflow::{ConsultationDraft, NewConsultation, authorize_action};
