//! `hubspoke` - Hub-and-spoke hotel planning
//!
//! This library fetches hotels ranked by total round-trip commute cost to a
//! fixed set of anchors, and turns the ranking into an interactive map scene
//! with animated spokes from the selected hotel.

pub mod config;
pub mod error;
pub mod logging;
pub mod map;
pub mod models;
pub mod planner;
pub mod ranking;

// Re-export core types for public API
pub use crate::config::HubSpokeConfig;
pub use error::HubSpokeError;
pub use map::{CanvasPoint, GeoProjector, Scene, SceneRenderer, Viewport};
pub use models::{Anchor, AnchorSet, Coordinate, RankedResult, ResultSet, RouteCost};
pub use planner::{Planner, SearchOutcome, SearchTicket};
pub use ranking::{FixtureRankingProvider, GeminiRankingClient, RankingProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, HubSpokeError>;
