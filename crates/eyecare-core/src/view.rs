//! Render state for list views.
//!
//! Fetches resolve in any order and may outlive the view that started them.
//! `ListView` hands out generation tickets so only the newest fetch can land,
//! and ignores everything once detached.

use crate::request::{Affordance, RequestError};

/// A message shown above a view after a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub message: String,
    pub affordance: Affordance,
}

impl From<&RequestError> for Banner {
    fn from(err: &RequestError) -> Self {
        Self {
            message: err.user_message(),
            affordance: err.affordance(),
        }
    }
}

/// Identifies one in-flight load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// What happened to a result handed to [`ListView::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Replaced,
    KeptPrevious,
    /// A newer load was started after this one.
    Stale,
    /// The view is gone.
    Detached,
}

#[derive(Debug, Clone)]
pub struct ListView<T> {
    items: Vec<T>,
    banner: Option<Banner>,
    generation: u64,
    loading: bool,
    detached: bool,
}

impl<T> Default for ListView<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            banner: None,
            generation: 0,
            loading: false,
            detached: false,
        }
    }
}

impl<T> ListView<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// Starts a load; any earlier ticket becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        LoadTicket(self.generation)
    }

    /// Lands a fetch result. Failures keep the previous items.
    pub fn apply(&mut self, ticket: LoadTicket, result: Result<Vec<T>, RequestError>) -> ApplyOutcome {
        if self.detached {
            return ApplyOutcome::Detached;
        }
        if ticket.0 != self.generation {
            tracing::debug!(
                ticket = ticket.0,
                current = self.generation,
                "Discarding stale list response"
            );
            return ApplyOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.banner = None;
                ApplyOutcome::Replaced
            }
            Err(err) => {
                self.banner = Some(Banner::from(&err));
                ApplyOutcome::KeptPrevious
            }
        }
    }

    /// Shows a failure that did not come from a list load (e.g. a row action).
    pub fn show_error(&mut self, err: &RequestError) {
        if !self.detached {
            self.banner = Some(Banner::from(err));
        }
    }

    /// Shows a local validation message.
    pub fn show_message(&mut self, message: impl Into<String>) {
        if !self.detached {
            self.banner = Some(Banner {
                message: message.into(),
                affordance: Affordance::None,
            });
        }
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Marks the view as unmounted.
    pub fn detach(&mut self) {
        self.detached = true;
        self.loading = false;
    }

    /// Mutable access for confirmed single-row updates. `None` once detached.
    pub(crate) fn items_mut(&mut self) -> Option<&mut Vec<T>> {
        if self.detached {
            None
        } else {
            Some(&mut self.items)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_replaces_items_and_clears_banner() {
        let mut view = ListView::new();
        let first = view.begin_load();
        view.apply(first, Err(RequestError::ServerFault { status: 503 }));
        assert!(view.banner().is_some());

        let second = view.begin_load();
        assert!(view.is_loading());
        assert_eq!(view.apply(second, Ok(vec![1, 2])), ApplyOutcome::Replaced);
        assert_eq!(view.items(), &[1, 2]);
        assert!(view.banner().is_none());
        assert!(!view.is_loading());
    }

    #[test]
    fn test_unauthenticated_keeps_previous_items() {
        let mut view = ListView::new();
        let ticket = view.begin_load();
        view.apply(ticket, Ok(vec!["a", "b"]));

        let ticket = view.begin_load();
        let outcome = view.apply(ticket, Err(RequestError::Unauthenticated));
        assert_eq!(outcome, ApplyOutcome::KeptPrevious);
        assert_eq!(view.items(), &["a", "b"]);
        assert_eq!(view.banner().unwrap().affordance, Affordance::Relogin);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut view = ListView::new();
        let older = view.begin_load();
        let newer = view.begin_load();

        assert_eq!(view.apply(newer, Ok(vec![2])), ApplyOutcome::Replaced);
        assert_eq!(view.apply(older, Ok(vec![1])), ApplyOutcome::Stale);
        assert_eq!(view.items(), &[2]);
    }

    #[test]
    fn test_detached_view_ignores_everything() {
        let mut view: ListView<u8> = ListView::new();
        let ticket = view.begin_load();
        view.detach();

        assert_eq!(view.apply(ticket, Ok(vec![9])), ApplyOutcome::Detached);
        view.show_error(&RequestError::ServerFault { status: 500 });
        assert!(view.items().is_empty());
        assert!(view.banner().is_none());
    }
}
