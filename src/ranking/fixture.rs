use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::debug;

use super::{RankingProvider, accept_ranked_results, parse_ranked_results};
use crate::config::HubSpokeConfig;
use crate::models::{RankedResult, ResultSet};
use crate::{HubSpokeError, Result};

/// What a [`FixtureRankingProvider`] answers with
#[derive(Debug, Clone)]
pub enum FixtureResponse {
    Results(Vec<RankedResult>),
    /// Raw service text, parsed exactly like a live response
    Json(String),
    Empty,
    Failure(String),
}

/// Offline ranking backend returning a canned answer
#[derive(Debug)]
pub struct FixtureRankingProvider {
    response: FixtureResponse,
    delay: Option<Duration>,
    max_results: usize,
    calls: AtomicUsize,
}

impl FixtureRankingProvider {
    #[must_use]
    pub fn new(response: FixtureResponse) -> Self {
        Self {
            response,
            delay: None,
            max_results: HubSpokeConfig::default().ranking.max_results as usize,
            calls: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn with_results(results: Vec<RankedResult>) -> Self {
        Self::new(FixtureResponse::Results(results))
    }

    /// Answer only after `delay`, to exercise overlapping searches
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    #[must_use]
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RankingProvider for FixtureRankingProvider {
    async fn fetch_ranked_results(&self) -> Result<ResultSet> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(call, "Serving fixture ranking");

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.response {
            FixtureResponse::Results(results) => {
                accept_ranked_results(results.clone(), self.max_results)
            }
            FixtureResponse::Json(text) => parse_ranked_results(text, self.max_results),
            FixtureResponse::Empty => Err(HubSpokeError::EmptyResponse),
            FixtureResponse::Failure(message) => Err(HubSpokeError::request_failure(message)),
        }
    }
}
