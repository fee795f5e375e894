//! Geographic coordinates and the fixed anchors every hotel is scored against

use serde::{Deserialize, Serialize};
use std::fmt;

/// WGS84 coordinate in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lng: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components finite and inside the WGS84 ranges
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.6}, {:.6}", self.lat, self.lng)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_coordinates())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnchorKind {
    Station,
    Attraction,
}

/// Key of an anchor's entry in a hotel's cost breakdown.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CostKey {
    Station,
    Fuzimiao,
    Zhongshanling,
    Niushoushan,
}

impl CostKey {
    pub const ALL: [CostKey; 4] = [
        CostKey::Station,
        CostKey::Fuzimiao,
        CostKey::Zhongshanling,
        CostKey::Niushoushan,
    ];

    /// Field name used in the response schema
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CostKey::Station => "station",
            CostKey::Fuzimiao => "fuzimiao",
            CostKey::Zhongshanling => "zhongshanling",
            CostKey::Niushoushan => "niushoushan",
        }
    }
}

/// A fixed point of interest
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Anchor {
    pub id: String,
    pub name: String,
    pub coords: Coordinate,
    pub kind: AnchorKind,
    /// Hex display color, e.g. `#3b82f6`
    pub color: String,
    pub cost_key: CostKey,
    /// Short english label used in the legend, prompt and cost rows
    pub short_label: String,
}

impl Anchor {
    #[must_use]
    pub fn new(
        id: &str,
        name: &str,
        coords: Coordinate,
        kind: AnchorKind,
        color: &str,
        cost_key: CostKey,
        short_label: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            coords,
            kind,
            color: color.to_string(),
            cost_key,
            short_label: short_label.to_string(),
        }
    }

    #[must_use]
    pub fn short_label(&self) -> &str {
        &self.short_label
    }
}

/// Immutable set of anchors handed to the projector, renderer and prompt builder.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorSet {
    anchors: Vec<Anchor>,
}

impl AnchorSet {
    #[must_use]
    pub fn new(anchors: Vec<Anchor>) -> Self {
        Self { anchors }
    }

    /// Nanjing South Station plus the three day-trip attractions
    #[must_use]
    pub fn nanjing() -> Self {
        Self::new(vec![
            Anchor::new(
                "nanjing_south",
                "南京南站 (Station)",
                Coordinate::new(31.968789, 118.798537),
                AnchorKind::Station,
                "#3b82f6",
                CostKey::Station,
                "Nanjing South",
            ),
            Anchor::new(
                "fuzimiao",
                "夫子庙 (Fuzimiao)",
                Coordinate::new(32.022579, 118.783786),
                AnchorKind::Attraction,
                "#ef4444",
                CostKey::Fuzimiao,
                "Fuzimiao",
            ),
            Anchor::new(
                "zhongshanling",
                "中山陵 (Mausoleum)",
                Coordinate::new(32.0643, 118.8483),
                AnchorKind::Attraction,
                "#22c55e",
                CostKey::Zhongshanling,
                "Zhongshanling",
            ),
            Anchor::new(
                "niushoushan",
                "牛首山 (Niushoushan)",
                Coordinate::new(31.91322, 118.74507),
                AnchorKind::Attraction,
                "#eab308",
                CostKey::Niushoushan,
                "Niushoushan",
            ),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Anchor> {
        self.anchors.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Anchor> {
        self.anchors.iter().find(|a| a.id == id)
    }

    #[must_use]
    pub fn station(&self) -> Option<&Anchor> {
        self.anchors.iter().find(|a| a.kind == AnchorKind::Station)
    }

    pub fn attractions(&self) -> impl Iterator<Item = &Anchor> {
        self.anchors
            .iter()
            .filter(|a| a.kind == AnchorKind::Attraction)
    }

    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.anchors.iter().map(|a| a.coords)
    }
}

impl Default for AnchorSet {
    fn default() -> Self {
        Self::nanjing()
    }
}
