//! Scan domain module.
//!
//! - `model`: scan records, AI condition, specialist review, severity
//! - `review`: the specialist review draft and its local checks

mod model;
mod review;

pub use model::{Condition, ScanRecord, ScanReview, Severity};
pub use review::ScanReviewDraft;
