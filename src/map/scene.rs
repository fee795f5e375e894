//! Scene graph for the interactive map
//!
//! A [`Scene`] is rebuilt from scratch for every result set or selection
//! change. Nodes are stored in draw order: connectors, anchors, hotels.

use serde::Serialize;

use super::projection::{CanvasPoint, GeoProjector, Viewport};
use crate::models::{AnchorSet, RankedResult, ResultSet};

const BACKGROUND_STROKE: &str = "#0f172a";
const MUTED_FILL: &str = "#94a3b8";
const SELECTED_FILL: &str = "#ffffff";

const ANCHOR_HALO_RADIUS: f64 = 15.0;
const ANCHOR_CORE_RADIUS: f64 = 6.0;
const ANCHOR_LABEL_OFFSET: f64 = -20.0;
const RESULT_RADIUS: f64 = 5.0;
const SELECTED_RESULT_RADIUS: f64 = 8.0;
const SELECTION_RING_RADIUS: f64 = 20.0;
const SELECTED_LABEL_OFFSET: f64 = 25.0;
const HIT_TOLERANCE: f64 = 4.0;

/// Radius of the marker travelling along each connector
pub const SPOKE_MARKER_RADIUS: f64 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
    pub opacity: f64,
    /// Dash and gap lengths
    pub dash: Option<(f64, f64)>,
}

impl Stroke {
    fn solid(color: &str, width: f64) -> Self {
        Self {
            color: color.to_string(),
            width,
            opacity: 1.0,
            dash: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    Circle {
        center: CanvasPoint,
        radius: f64,
        fill: String,
        fill_opacity: f64,
        stroke: Option<Stroke>,
    },
    Line {
        from: CanvasPoint,
        to: CanvasPoint,
        stroke: Stroke,
    },
    Label {
        at: CanvasPoint,
        text: String,
        font_size: f64,
        color: String,
        bold: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeKind {
    Connector { anchor_id: String, result_id: String },
    Anchor { anchor_id: String },
    Result { result_id: String, selected: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneNode {
    pub kind: NodeKind,
    pub position: CanvasPoint,
    pub shapes: Vec<Shape>,
}

/// Straight spoke from the selected hotel to one anchor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connector {
    pub anchor_id: String,
    pub color: String,
    pub from: CanvasPoint,
    pub to: CanvasPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub viewport: Viewport,
    pub nodes: Vec<SceneNode>,
    pub connectors: Vec<Connector>,
    /// Selection after resolving it against the result set
    pub selected: Option<String>,
}

impl Scene {
    /// Build the full scene. A selection id missing from `results` counts as no selection.
    #[must_use]
    pub fn build(
        anchors: &AnchorSet,
        results: &ResultSet,
        selected: Option<&str>,
        projector: &GeoProjector,
    ) -> Self {
        let selected = selected.and_then(|id| results.get(id));
        let mut nodes = Vec::with_capacity(2 * anchors.len() + results.len());
        let mut connectors = Vec::new();

        if let Some(hub) = selected {
            let from = projector.project(hub.coords);
            for anchor in anchors.iter() {
                let to = projector.project(anchor.coords);
                nodes.push(SceneNode {
                    kind: NodeKind::Connector {
                        anchor_id: anchor.id.clone(),
                        result_id: hub.id.clone(),
                    },
                    position: from,
                    shapes: vec![Shape::Line {
                        from,
                        to,
                        stroke: Stroke {
                            color: anchor.color.clone(),
                            width: 2.0,
                            opacity: 0.6,
                            dash: Some((5.0, 5.0)),
                        },
                    }],
                });
                connectors.push(Connector {
                    anchor_id: anchor.id.clone(),
                    color: anchor.color.clone(),
                    from,
                    to,
                });
            }
        }

        for anchor in anchors.iter() {
            let at = projector.project(anchor.coords);
            nodes.push(SceneNode {
                kind: NodeKind::Anchor {
                    anchor_id: anchor.id.clone(),
                },
                position: at,
                shapes: vec![
                    Shape::Circle {
                        center: at,
                        radius: ANCHOR_HALO_RADIUS,
                        fill: anchor.color.clone(),
                        fill_opacity: 0.2,
                        stroke: None,
                    },
                    Shape::Circle {
                        center: at,
                        radius: ANCHOR_CORE_RADIUS,
                        fill: anchor.color.clone(),
                        fill_opacity: 1.0,
                        stroke: Some(Stroke::solid(BACKGROUND_STROKE, 2.0)),
                    },
                    Shape::Label {
                        at: CanvasPoint::new(at.x, at.y + ANCHOR_LABEL_OFFSET),
                        text: anchor.name.clone(),
                        font_size: 12.0,
                        color: anchor.color.clone(),
                        bold: true,
                    },
                ],
            });
        }

        let selected_id = selected.map(|hub| hub.id.as_str());
        for result in results.iter() {
            let is_selected = selected_id == Some(result.id.as_str());
            nodes.push(result_node(result, projector.project(result.coords), is_selected));
        }

        Self {
            viewport: *projector.viewport(),
            nodes,
            connectors,
            selected: selected_id.map(str::to_string),
        }
    }

    pub fn anchor_markers(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::Anchor { .. }))
    }

    pub fn result_markers(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::Result { .. }))
    }

    pub fn connector_lines(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::Connector { .. }))
    }

    /// Id of the topmost hotel marker under `point`
    #[must_use]
    pub fn hit_test(&self, point: CanvasPoint) -> Option<&str> {
        self.nodes.iter().rev().find_map(|node| match &node.kind {
            NodeKind::Result {
                result_id,
                selected,
            } => {
                let radius = if *selected {
                    SELECTION_RING_RADIUS
                } else {
                    RESULT_RADIUS
                };
                (node.position.distance_to(point) <= radius + HIT_TOLERANCE)
                    .then_some(result_id.as_str())
            }
            _ => None,
        })
    }
}

fn result_node(result: &RankedResult, at: CanvasPoint, selected: bool) -> SceneNode {
    let mut shapes = Vec::with_capacity(3);
    if selected {
        shapes.push(Shape::Circle {
            center: at,
            radius: SELECTION_RING_RADIUS,
            fill: SELECTED_FILL.to_string(),
            fill_opacity: 0.1,
            stroke: Some(Stroke {
                color: SELECTED_FILL.to_string(),
                width: 1.0,
                opacity: 1.0,
                dash: Some((4.0, 2.0)),
            }),
        });
    }
    shapes.push(Shape::Circle {
        center: at,
        radius: if selected {
            SELECTED_RESULT_RADIUS
        } else {
            RESULT_RADIUS
        },
        fill: if selected { SELECTED_FILL } else { MUTED_FILL }.to_string(),
        fill_opacity: 1.0,
        stroke: Some(Stroke::solid(BACKGROUND_STROKE, 2.0)),
    });
    if selected {
        shapes.push(Shape::Label {
            at: CanvasPoint::new(at.x, at.y + SELECTED_LABEL_OFFSET),
            text: result.name.clone(),
            font_size: 14.0,
            color: SELECTED_FILL.to_string(),
            bold: true,
        });
    }

    SceneNode {
        kind: NodeKind::Result {
            result_id: result.id.clone(),
            selected,
        },
        position: at,
        shapes,
    }
}
