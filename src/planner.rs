//! Application state for the hub-and-spoke planner
//!
//! The [`Planner`] owns the current [`ResultSet`] and the selection. Every
//! search gets a ticket; only the most recently issued ticket may replace
//! the results, so a slow response can never overwrite a newer one.

use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::Result;
use crate::models::summary::{self, HotelCard, HubSummary};
use crate::models::{AnchorSet, RankedResult, ResultSet};
use crate::ranking::RankingProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Results replaced; the top-ranked hotel is selected
    Applied { count: usize },
    /// Search failed; previous results are untouched
    Failed { message: String },
    /// A newer search was started after this one
    Stale,
}

pub struct Planner {
    provider: Arc<dyn RankingProvider>,
    anchors: AnchorSet,
    results: ResultSet,
    selected: Option<String>,
    last_error: Option<String>,
    issued: u64,
    pending: Option<SearchTicket>,
}

impl Planner {
    #[must_use]
    pub fn new(provider: Arc<dyn RankingProvider>, anchors: AnchorSet) -> Self {
        Self {
            provider,
            anchors,
            results: ResultSet::empty(),
            selected: None,
            last_error: None,
            issued: 0,
            pending: None,
        }
    }

    /// Shared handle on the ranking backend, for callers driving fetches themselves
    #[must_use]
    pub fn provider(&self) -> Arc<dyn RankingProvider> {
        Arc::clone(&self.provider)
    }

    /// Start a search, superseding any search still in flight.
    pub fn begin_search(&mut self) -> SearchTicket {
        self.issued += 1;
        let ticket = SearchTicket(self.issued);
        self.pending = Some(ticket);
        self.last_error = None;
        ticket
    }

    /// Apply the answer to `ticket` if it is still the latest search.
    pub fn complete_search(&mut self, ticket: SearchTicket, outcome: Result<ResultSet>) -> SearchOutcome {
        if self.pending != Some(ticket) {
            warn!(?ticket, latest = self.issued, "Discarding response from superseded search");
            return SearchOutcome::Stale;
        }
        self.pending = None;

        match outcome {
            Ok(results) => {
                let count = results.len();
                self.selected = results.first().map(|r| r.id.clone());
                self.results = results;
                info!(count, selected = ?self.selected, "Results replaced");
                SearchOutcome::Applied { count }
            }
            Err(err) => {
                let message = err.user_message();
                error!("Search failed: {err}");
                self.last_error = Some(message.clone());
                SearchOutcome::Failed { message }
            }
        }
    }

    /// Run one search against the configured provider.
    #[instrument(skip(self))]
    pub async fn search(&mut self) -> SearchOutcome {
        let ticket = self.begin_search();
        let provider = self.provider();
        let outcome = provider.fetch_ranked_results().await;
        self.complete_search(ticket, outcome)
    }

    /// Select a hotel; an id that is not in the current results clears the selection.
    pub fn select(&mut self, id: &str) -> bool {
        if self.results.get(id).is_some() {
            self.selected = Some(id.to_string());
            true
        } else {
            self.selected = None;
            false
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn anchors(&self) -> &AnchorSet {
        &self.anchors
    }

    #[must_use]
    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn selected_result(&self) -> Option<&RankedResult> {
        self.results.get(self.selected.as_deref()?)
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn hub_summary(&self) -> Option<HubSummary> {
        self.selected_result().map(HubSummary::from_result)
    }

    #[must_use]
    pub fn cards(&self) -> Vec<HotelCard> {
        summary::hotel_cards(&self.results, &self.anchors, self.selected_id())
    }
}
