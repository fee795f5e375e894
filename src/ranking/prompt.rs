//! Task description sent to the ranking service

use std::fmt::Write;

use crate::models::{AnchorKind, AnchorSet};

/// Parameters of the hub-and-spoke itinerary embedded in the prompt
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryRules {
    pub city: String,
    pub nights: u32,
    pub candidate_pool: u32,
    pub buffer_km: f64,
    pub top_n: u32,
    /// Local departure time assumed for traffic
    pub traffic_time: String,
}

impl Default for ItineraryRules {
    fn default() -> Self {
        Self {
            city: "Nanjing".to_string(),
            nights: 3,
            candidate_pool: 20,
            buffer_km: 3.0,
            top_n: 6,
            traffic_time: "10:00 AM".to_string(),
        }
    }
}

#[must_use]
pub fn build_prompt(anchors: &AnchorSet, rules: &ItineraryRules) -> String {
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "Role: You are an expert travel planner using Chinese mapping logic (simulating Amap/Gaode Maps data)."
    );
    let _ = writeln!(prompt);
    let _ = writeln!(
        prompt,
        "Task: Find the top {} hotels in {} that minimize the TOTAL travel cost for a \"Hub and Spoke\" (驻地式) itinerary.",
        rules.top_n, rules.city
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Itinerary Model:");
    let _ = writeln!(prompt, "- Stay at one hotel for {} nights.", rules.nights);
    for (day, attraction) in anchors.attractions().enumerate() {
        let _ = writeln!(
            prompt,
            "- Day {}: Round trip to {}.",
            day + 1,
            attraction.short_label()
        );
    }
    if let Some(station) = anchors.station() {
        let _ = writeln!(
            prompt,
            "- Commute: Arrival and Departure from {}.",
            station.short_label()
        );
    }
    let _ = writeln!(prompt);

    let _ = writeln!(prompt, "Anchors (WGS84):");
    for (index, anchor) in anchors.iter().enumerate() {
        let _ = writeln!(
            prompt,
            "{}. {} [{}]: {}",
            index + 1,
            anchor.short_label(),
            anchor.cost_key.as_str(),
            anchor.coords
        );
    }
    let _ = writeln!(prompt);

    let _ = writeln!(prompt, "Algorithm:");
    let _ = writeln!(
        prompt,
        "1. Search for {} real hotels within a {}km buffer of the polygon formed by these {} points.",
        rules.candidate_pool,
        rules.buffer_km,
        anchors.len()
    );
    let _ = writeln!(
        prompt,
        "2. For each hotel, calculate DRIVING time (minutes) and distance (km) of ONE ROUND TRIP (2x one-way) for:"
    );
    for anchor in anchors.iter() {
        let kind = match anchor.kind {
            AnchorKind::Station => "arrival and departure",
            AnchorKind::Attraction => "day trip",
        };
        let _ = writeln!(
            prompt,
            "   - {}: Hotel <-> {} ({})",
            anchor.cost_key.as_str(),
            anchor.short_label(),
            kind
        );
    }
    let _ = writeln!(
        prompt,
        "3. Total Cost = sum of the {} round trips. totalDurationMin must equal the sum of the durationMin values.",
        anchors.len()
    );
    let _ = writeln!(
        prompt,
        "4. Rank by lowest Total Duration. Return the top {}.",
        rules.top_n
    );
    let _ = writeln!(prompt);

    let _ = writeln!(prompt, "Constraint:");
    let _ = writeln!(prompt, "- Use real coordinates for hotels.");
    let _ = writeln!(
        prompt,
        "- Simulate {} traffic conditions.",
        rules.traffic_time
    );

    prompt
}
