//! Ranking module
//!
//! Fetches hotels ranked by hub-and-spoke commute cost:
//! - `prompt`: the fixed task description
//! - `schema`: the structured response schema
//! - `gemini`: the generative-AI HTTP backend
//! - `fixture`: canned responses for tests and offline demos

pub mod fixture;
pub mod gemini;
pub mod prompt;
pub mod schema;

use async_trait::async_trait;
use tracing::warn;

use crate::models::{RankedResult, ResultSet};
use crate::{HubSpokeError, Result};

pub use fixture::{FixtureRankingProvider, FixtureResponse};
pub use gemini::GeminiRankingClient;
pub use prompt::{ItineraryRules, build_prompt};
pub use schema::response_schema;

/// Source of ranked hotels. Each call is an independent request with no caching.
#[async_trait]
pub trait RankingProvider: Send + Sync {
    async fn fetch_ranked_results(&self) -> Result<ResultSet>;
}

/// Parse the structured text returned by a ranking backend into a validated set.
pub fn parse_ranked_results(text: &str, limit: usize) -> Result<ResultSet> {
    if text.trim().is_empty() {
        return Err(HubSpokeError::EmptyResponse);
    }

    let results: Vec<RankedResult> = serde_json::from_str(text)?;
    accept_ranked_results(results, limit)
}

/// Validate decoded results, then rank them and keep the best `limit`.
pub fn accept_ranked_results(results: Vec<RankedResult>, limit: usize) -> Result<ResultSet> {
    for result in &results {
        if !result.totals_consistent() {
            warn!(
                hotel = %result.id,
                reported = result.total_duration_min,
                leg_sum = result.cost_duration_sum(),
                "Reported total duration does not match the sum of its legs"
            );
        }
    }

    ResultSet::ranked(results, limit)
        .map_err(|reason| HubSpokeError::request_failure(format!("Schema violation: {reason}")))
}
