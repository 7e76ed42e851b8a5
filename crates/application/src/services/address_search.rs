//! Debounced address search
//!
//! Every keystroke takes a ticket from a monotonically increasing counter.
//! A search waits for the debounce window and only contacts the geocoding
//! service if no newer ticket was issued meanwhile; its result is applied
//! to the visible suggestions only if it still holds the newest ticket.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use domain::AddressSuggestion;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::GeocodingPort;

/// Default wait before a keystroke turns into a geocoding request
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Result of a single debounced search
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "suggestions", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// The search was the newest one; its suggestions are now visible
    Applied(Vec<AddressSuggestion>),
    /// A newer keystroke arrived; nothing was changed
    Superseded,
}

/// Debounced, last-issued-wins address search
pub struct AddressSearch {
    geocoding: Arc<dyn GeocodingPort>,
    debounce: Duration,
    latest_ticket: AtomicU64,
    suggestions: Mutex<Vec<AddressSuggestion>>,
}

impl fmt::Debug for AddressSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddressSearch")
            .field("debounce", &self.debounce)
            .field("latest_ticket", &self.latest_ticket.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl AddressSearch {
    /// Create a search with the default 500 ms debounce
    #[must_use]
    pub fn new(geocoding: Arc<dyn GeocodingPort>) -> Self {
        Self {
            geocoding,
            debounce: DEFAULT_SEARCH_DEBOUNCE,
            latest_ticket: AtomicU64::new(0),
            suggestions: Mutex::new(Vec::new()),
        }
    }

    /// Override the debounce window
    #[must_use]
    pub const fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Run a debounced search for `query`
    ///
    /// A blank query clears the suggestions immediately. A failed search
    /// clears the suggestions and surfaces the error, unless a newer search
    /// has been issued in the meantime.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<SearchOutcome, ApplicationError> {
        let ticket = self.issue_ticket();
        let query = query.trim();

        if query.is_empty() {
            self.suggestions.lock().clear();
            return Ok(SearchOutcome::Applied(Vec::new()));
        }

        if !self.debounce.is_zero() {
            tokio::time::sleep(self.debounce).await;
        }

        if !self.is_latest(ticket) {
            debug!(ticket, "Search superseded before request");
            return Ok(SearchOutcome::Superseded);
        }

        let result = self.geocoding.search_addresses(query).await;

        let mut suggestions = self.suggestions.lock();
        if !self.is_latest(ticket) {
            debug!(ticket, "Search superseded after response, discarding");
            return Ok(SearchOutcome::Superseded);
        }

        match result {
            Ok(found) => {
                debug!(ticket, count = found.len(), "Applying suggestions");
                suggestions.clone_from(&found);
                Ok(SearchOutcome::Applied(found))
            },
            Err(e) => {
                warn!(ticket, error = %e, "Address search failed");
                suggestions.clear();
                Err(e)
            },
        }
    }

    /// Currently visible suggestions
    #[must_use]
    pub fn suggestions(&self) -> Vec<AddressSuggestion> {
        self.suggestions.lock().clone()
    }

    /// Clear the visible suggestions and invalidate pending searches
    pub fn clear(&self) {
        let mut suggestions = self.suggestions.lock();
        self.issue_ticket();
        suggestions.clear();
    }

    fn issue_ticket(&self) -> u64 {
        self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, ticket: u64) -> bool {
        self.latest_ticket.load(Ordering::SeqCst) == ticket
    }
}
