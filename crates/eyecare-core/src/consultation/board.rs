//! Consultation list state for patient and specialist dashboards.

use super::model::{ConsultationAction, ConsultationRequest, ConsultationStatus};
use crate::request::RequestError;
use crate::session::Capabilities;
use crate::view::{ApplyOutcome, ListView, LoadTicket};

/// One rendered consultation row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsultationRow {
    pub id: u64,
    pub description: String,
    pub status: ConsultationStatus,
    pub status_label: &'static str,
    /// Empty unless the session can act on consultations.
    pub actions: Vec<ConsultationAction>,
}

/// Per-status totals shown on the specialist dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: usize,
    pub approved: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.pending + self.approved + self.completed + self.cancelled
    }
}

/// The consultation list plus its confirmed-update rules.
#[derive(Debug, Default)]
pub struct ConsultationBoard {
    view: ListView<ConsultationRequest>,
}

impl ConsultationBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &ListView<ConsultationRequest> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ListView<ConsultationRequest> {
        &mut self.view
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.view.begin_load()
    }

    pub fn apply_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<ConsultationRequest>, RequestError>,
    ) -> ApplyOutcome {
        self.view.apply(ticket, result)
    }

    pub fn get(&self, id: u64) -> Option<&ConsultationRequest> {
        self.view.items().iter().find(|c| c.id == id)
    }

    /// Replaces a row with the server's confirmed copy.
    ///
    /// Returns `false` when the row is no longer displayed or the view is gone.
    pub fn confirm(&mut self, updated: ConsultationRequest) -> bool {
        let Some(items) = self.view.items_mut() else {
            return false;
        };
        let Some(index) = items.iter().position(|c| c.id == updated.id) else {
            return false;
        };
        items[index] = updated;
        self.view.dismiss_banner();
        true
    }

    /// Puts a newly created consultation at the top of the list.
    pub fn confirm_created(&mut self, created: ConsultationRequest) -> bool {
        let Some(items) = self.view.items_mut() else {
            return false;
        };
        items.retain(|c| c.id != created.id);
        items.insert(0, created);
        self.view.dismiss_banner();
        true
    }

    pub fn rows(&self, capabilities: &Capabilities) -> Vec<ConsultationRow> {
        self.view
            .items()
            .iter()
            .map(|c| ConsultationRow {
                id: c.id,
                description: c.description.clone(),
                status: c.status,
                status_label: c.status.label(),
                actions: if capabilities.can_act_on_consultations {
                    c.status.allowed_actions().to_vec()
                } else {
                    Vec::new()
                },
            })
            .collect()
    }

    pub fn with_status(&self, status: ConsultationStatus) -> Vec<&ConsultationRequest> {
        self.view
            .items()
            .iter()
            .filter(|c| c.status == status)
            .collect()
    }

    pub fn counts(&self) -> StatusCounts {
        self.view
            .items()
            .iter()
            .fold(StatusCounts::default(), |mut counts, c| {
                match c.status {
                    ConsultationStatus::Pending => counts.pending += 1,
                    ConsultationStatus::Approved => counts.approved += 1,
                    ConsultationStatus::Completed => counts.completed += 1,
                    ConsultationStatus::Cancelled => counts.cancelled += 1,
                }
                counts
            })
    }
}
