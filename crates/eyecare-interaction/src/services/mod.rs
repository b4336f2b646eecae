//! Per-resource services over the shared Resource Client.

mod articles;
mod consultations;
mod contact;
mod route_check;
mod scans;
mod specialists;

pub use articles::ArticleService;
pub use consultations::ConsultationService;
pub use contact::ContactService;
pub use route_check::{RouteReport, RouteStatus, check_routes};
pub use scans::ScanService;
pub use specialists::SpecialistDirectory;
