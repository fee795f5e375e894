//! Data models for the hub-and-spoke planner
//!
//! This module contains the core domain models organized by concern:
//! - Location: coordinates and the fixed anchors
//! - Ranking: ranked hotels and their round-trip costs
//! - Summary: list and overlay view models

pub mod location;
pub mod ranking;
pub mod summary;

pub use location::{Anchor, AnchorKind, AnchorSet, Coordinate, CostKey};
pub use ranking::{CostBreakdown, RankedResult, ResultSet, RouteCost};
pub use summary::{CostRow, HotelCard, HubSummary};
