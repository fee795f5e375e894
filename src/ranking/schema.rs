use serde_json::{Value, json};

use crate::models::CostKey;

fn route_cost_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "destination": { "type": "STRING" },
            "distanceKm": { "type": "NUMBER" },
            "durationMin": { "type": "NUMBER" }
        },
        "required": ["destination", "distanceKm", "durationMin"]
    })
}

/// Response schema constraining the service to an array of ranked hotels.
#[must_use]
pub fn response_schema() -> Value {
    let cost_properties: serde_json::Map<String, Value> = CostKey::ALL
        .iter()
        .map(|key| (key.as_str().to_string(), route_cost_schema()))
        .collect();
    let cost_required: Vec<&str> = CostKey::ALL.iter().map(CostKey::as_str).collect();

    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "STRING" },
                "name": { "type": "STRING" },
                "address": { "type": "STRING" },
                "coords": {
                    "type": "OBJECT",
                    "properties": {
                        "lat": { "type": "NUMBER" },
                        "lng": { "type": "NUMBER" }
                    },
                    "required": ["lat", "lng"]
                },
                "totalDurationMin": { "type": "NUMBER" },
                "totalDistanceKm": { "type": "NUMBER" },
                "costs": {
                    "type": "OBJECT",
                    "properties": cost_properties,
                    "required": cost_required
                }
            },
            "required": ["id", "name", "address", "coords", "totalDurationMin", "totalDistanceKm", "costs"]
        }
    })
}
