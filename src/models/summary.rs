//! View models for the ranked list and the selected-hub overlay
//!
//! Every [`RouteCost`](super::RouteCost) is already a full round trip, so no
//! leg is doubled here.

use serde::Serialize;

use super::{AnchorSet, RankedResult, ResultSet};

/// One row of a hotel card's round-trip breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostRow {
    pub label: String,
    pub color: String,
    pub duration_min: f64,
    pub distance_km: i64,
}

/// Card shown in the ranked list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelCard {
    pub rank: usize,
    pub id: String,
    pub name: String,
    pub address: String,
    pub total_duration_min: f64,
    pub selected: bool,
    /// Only filled for the selected card
    pub cost_rows: Vec<CostRow>,
}

/// Overlay describing the selected hub
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HubSummary {
    pub name: String,
    pub address: String,
    pub total_duration_min: f64,
    pub total_distance_km: i64,
}

impl HubSummary {
    #[must_use]
    pub fn from_result(result: &RankedResult) -> Self {
        Self {
            name: result.name.clone(),
            address: result.address.clone(),
            total_duration_min: result.total_duration_min,
            total_distance_km: result.total_distance_km.round() as i64,
        }
    }
}

#[must_use]
pub fn cost_rows(result: &RankedResult, anchors: &AnchorSet) -> Vec<CostRow> {
    anchors
        .iter()
        .map(|anchor| {
            let cost = result.costs.get(anchor.cost_key);
            CostRow {
                label: anchor.short_label().to_string(),
                color: anchor.color.clone(),
                duration_min: cost.duration_min,
                distance_km: cost.distance_km.round() as i64,
            }
        })
        .collect()
}

/// Cards in rank order; the selected one carries its breakdown.
#[must_use]
pub fn hotel_cards(results: &ResultSet, anchors: &AnchorSet, selected: Option<&str>) -> Vec<HotelCard> {
    results
        .iter()
        .enumerate()
        .map(|(index, result)| {
            let is_selected = selected == Some(result.id.as_str());
            HotelCard {
                rank: index + 1,
                id: result.id.clone(),
                name: result.name.clone(),
                address: result.address.clone(),
                total_duration_min: result.total_duration_min,
                selected: is_selected,
                cost_rows: if is_selected {
                    cost_rows(result, anchors)
                } else {
                    Vec::new()
                },
            }
        })
        .collect()
}
