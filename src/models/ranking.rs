//! Ranked hotels and their per-anchor round-trip costs

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::location::{Coordinate, CostKey};

/// Upper bound for a single round trip; anything above is treated as a bogus answer.
pub const MAX_LEG_DURATION_MIN: f64 = 24.0 * 60.0;
/// Upper bound for the sum of all four round trips.
pub const MAX_TOTAL_DURATION_MIN: f64 = 4.0 * MAX_LEG_DURATION_MIN;
const MAX_LEG_DISTANCE_KM: f64 = 1000.0;

/// One full round trip between a hotel and an anchor
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteCost {
    pub destination: String,
    pub distance_km: f64,
    pub duration_min: f64,
}

/// Round-trip cost to each anchor, keyed by the anchor's [`CostKey`]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CostBreakdown {
    pub station: RouteCost,
    pub fuzimiao: RouteCost,
    pub zhongshanling: RouteCost,
    pub niushoushan: RouteCost,
}

impl CostBreakdown {
    #[must_use]
    pub fn get(&self, key: CostKey) -> &RouteCost {
        match key {
            CostKey::Station => &self.station,
            CostKey::Fuzimiao => &self.fuzimiao,
            CostKey::Zhongshanling => &self.zhongshanling,
            CostKey::Niushoushan => &self.niushoushan,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (CostKey, &RouteCost)> {
        CostKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}

/// A candidate hotel with aggregate and per-anchor travel costs
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    pub id: String,
    pub name: String,
    pub address: String,
    pub coords: Coordinate,
    pub total_duration_min: f64,
    pub total_distance_km: f64,
    pub costs: CostBreakdown,
}

impl RankedResult {
    /// Sum of the four round-trip durations
    #[must_use]
    pub fn cost_duration_sum(&self) -> f64 {
        self.costs.iter().map(|(_, c)| c.duration_min).sum()
    }

    #[must_use]
    pub fn cost_distance_sum(&self) -> f64 {
        self.costs.iter().map(|(_, c)| c.distance_km).sum()
    }

    /// Whether the reported total agrees with the legs, to within half a minute
    #[must_use]
    pub fn totals_consistent(&self) -> bool {
        (self.total_duration_min - self.cost_duration_sum()).abs() <= 0.5
    }

    /// Bounds checks applied to every hotel the ranking service returns.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err(format!("hotel '{}' has an empty id", self.name));
        }
        if !self.coords.is_valid() {
            return Err(format!(
                "hotel '{}' has invalid coordinates ({}, {})",
                self.id, self.coords.lat, self.coords.lng
            ));
        }
        check_range(&self.id, "totalDurationMin", self.total_duration_min, MAX_TOTAL_DURATION_MIN)?;
        check_range(
            &self.id,
            "totalDistanceKm",
            self.total_distance_km,
            4.0 * MAX_LEG_DISTANCE_KM,
        )?;
        for (key, cost) in self.costs.iter() {
            let field = key.as_str();
            check_range(&self.id, field, cost.duration_min, MAX_LEG_DURATION_MIN)?;
            check_range(&self.id, field, cost.distance_km, MAX_LEG_DISTANCE_KM)?;
        }
        Ok(())
    }
}

fn check_range(id: &str, field: &str, value: f64, max: f64) -> Result<(), String> {
    if !value.is_finite() || value < 0.0 || value > max {
        return Err(format!(
            "hotel '{id}' has out-of-range {field}: {value} (expected 0..={max})"
        ));
    }
    Ok(())
}

/// Ordered hotels; rank is position + 1.
#[derive(Debug, Serialize, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct ResultSet {
    results: Vec<RankedResult>,
}

impl ResultSet {
    /// Build a set from already-ranked results, rejecting duplicate ids and bad values.
    pub fn new(results: Vec<RankedResult>) -> Result<Self, String> {
        let mut seen = HashSet::new();
        for result in &results {
            result.validate()?;
            if !seen.insert(result.id.as_str()) {
                return Err(format!("duplicate hotel id '{}'", result.id));
            }
        }
        Ok(Self { results })
    }

    /// Validate every entry, then order by ascending total duration and keep the best `limit`.
    pub fn ranked(results: Vec<RankedResult>, limit: usize) -> Result<Self, String> {
        let mut set = Self::new(results)?;
        set.results
            .sort_by(|a, b| a.total_duration_min.total_cmp(&b.total_duration_min));
        set.results.truncate(limit);
        Ok(set)
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&RankedResult> {
        self.results.iter().find(|r| r.id == id)
    }

    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.results.iter().position(|r| r.id == id)
    }

    #[must_use]
    pub fn first(&self) -> Option<&RankedResult> {
        self.results.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedResult> {
        self.results.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.results.iter().map(|r| r.coords)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn leg(destination: &str, distance_km: f64, duration_min: f64) -> RouteCost {
        RouteCost {
            destination: destination.to_string(),
            distance_km,
            duration_min,
        }
    }

    pub(crate) fn hotel(id: &str, lat: f64, lng: f64, legs: [f64; 4]) -> RankedResult {
        let costs = CostBreakdown {
            station: leg("Nanjing South Station", legs[0] / 2.0, legs[0]),
            fuzimiao: leg("Fuzimiao", legs[1] / 2.0, legs[1]),
            zhongshanling: leg("Zhongshanling", legs[2] / 2.0, legs[2]),
            niushoushan: leg("Niushoushan", legs[3] / 2.0, legs[3]),
        };
        RankedResult {
            id: id.to_string(),
            name: format!("Hotel {id}"),
            address: format!("{id} Road, Nanjing"),
            coords: Coordinate::new(lat, lng),
            total_duration_min: legs.iter().sum(),
            total_distance_km: legs.iter().sum::<f64>() / 2.0,
            costs,
        }
    }

    #[test]
    fn test_totals_match_leg_sum() {
        let result = hotel("h1", 32.0, 118.79, [20.0, 25.0, 30.0, 15.0]);
        assert_eq!(result.total_duration_min, 90.0);
        assert_eq!(result.cost_duration_sum(), 90.0);
        assert!(result.totals_consistent());

        let mut skewed = result.clone();
        skewed.total_duration_min = 80.0;
        assert!(!skewed.totals_consistent());
    }

    #[test]
    fn test_deserialize_service_shape() {
        let json = r#"{
            "id": "h-7",
            "name": "Jinling Hotel",
            "address": "2 Hanzhong Rd",
            "coords": { "lat": 32.04, "lng": 118.78 },
            "totalDurationMin": 150,
            "totalDistanceKm": 88.5,
            "costs": {
                "station":       { "destination": "Nanjing South", "distanceKm": 24, "durationMin": 40 },
                "fuzimiao":      { "destination": "Fuzimiao",      "distanceKm": 8,  "durationMin": 20 },
                "zhongshanling": { "destination": "Zhongshanling", "distanceKm": 20, "durationMin": 35 },
                "niushoushan":   { "destination": "Niushoushan",   "distanceKm": 36.5, "durationMin": 55 }
            }
        }"#;
        let result: RankedResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.id, "h-7");
        assert_eq!(result.costs.get(CostKey::Niushoushan).distance_km, 36.5);
        assert_eq!(result.cost_duration_sum(), 150.0);
        assert!(result.validate().is_ok());
    }

    #[test]
    fn test_missing_cost_entry_is_rejected_by_serde() {
        let json = r#"{
            "id": "h", "name": "n", "address": "a",
            "coords": { "lat": 32.0, "lng": 118.8 },
            "totalDurationMin": 10, "totalDistanceKm": 5,
            "costs": {
                "station": { "destination": "s", "distanceKm": 1, "durationMin": 1 }
            }
        }"#;
        assert!(serde_json::from_str::<RankedResult>(json).is_err());
    }

    #[test]
    fn test_validate_rejects_negative_and_absurd_values() {
        let mut negative = hotel("h1", 32.0, 118.8, [20.0, 25.0, 30.0, 15.0]);
        negative.costs.fuzimiao.duration_min = -3.0;
        assert!(negative.validate().unwrap_err().contains("fuzimiao"));

        let mut absurd = hotel("h2", 32.0, 118.8, [20.0, 25.0, 30.0, 15.0]);
        absurd.total_duration_min = 1.0e9;
        assert!(absurd.validate().unwrap_err().contains("totalDurationMin"));

        let off_planet = hotel("h3", 132.0, 118.8, [20.0, 25.0, 30.0, 15.0]);
        assert!(off_planet.validate().unwrap_err().contains("invalid coordinates"));

        let blank = hotel(" ", 32.0, 118.8, [20.0, 25.0, 30.0, 15.0]);
        assert!(blank.validate().unwrap_err().contains("empty id"));
    }

    #[test]
    fn test_result_set_rejects_duplicate_ids() {
        let a = hotel("dup", 32.0, 118.8, [10.0, 10.0, 10.0, 10.0]);
        let b = hotel("dup", 32.01, 118.81, [20.0, 10.0, 10.0, 10.0]);
        let err = ResultSet::new(vec![a, b]).unwrap_err();
        assert!(err.contains("duplicate"));
    }

    #[test]
    fn test_ranked_sorts_and_truncates() {
        let results = vec![
            hotel("slow", 32.0, 118.8, [40.0, 40.0, 40.0, 40.0]),
            hotel("fast", 32.0, 118.8, [10.0, 10.0, 10.0, 10.0]),
            hotel("mid", 32.0, 118.8, [20.0, 20.0, 20.0, 20.0]),
        ];
        let set = ResultSet::ranked(results, 2).unwrap();
        let ids: Vec<&str> = set.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["fast", "mid"]);
        assert_eq!(set.position("mid"), Some(1));
        assert!(set.get("slow").is_none());
    }

    #[test]
    fn test_ranked_validates_entries_beyond_limit() {
        let mut results: Vec<RankedResult> = (0..6)
            .map(|i| hotel(&format!("h{i}"), 32.0, 118.8, [10.0 + f64::from(i), 10.0, 10.0, 10.0]))
            .collect();
        results.push(hotel("far", 132.0, 118.8, [90.0, 90.0, 90.0, 90.0]));
        let err = ResultSet::ranked(results.clone(), 6).unwrap_err();
        assert!(err.contains("invalid coordinates"));

        results.pop();
        results.push(hotel("h0", 32.0, 118.8, [90.0, 90.0, 90.0, 90.0]));
        let err = ResultSet::ranked(results, 6).unwrap_err();
        assert!(err.contains("duplicate hotel id 'h0'"));
    }
}
