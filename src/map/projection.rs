//! Linear projection from geographic coordinates to canvas space
//!
//! Longitude maps to x and latitude maps to y, with y inverted so north
//! renders upward. The domain is the bounding box of all points, padded by a
//! fraction of each span, fitted into the canvas minus a fixed pixel margin.

use serde::Serialize;

use crate::config::MapConfig;
use crate::models::Coordinate;

/// Span substituted for an axis whose points all share one value
pub const DEFAULT_SPAN_DEG: f64 = 0.01;
const MIN_SPAN_DEG: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CanvasPoint {
    pub x: f64,
    pub y: f64,
}

impl CanvasPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_to(&self, other: CanvasPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Point at fraction `t` of the way towards `other`
    #[must_use]
    pub fn lerp(&self, other: CanvasPoint, t: f64) -> CanvasPoint {
        CanvasPoint::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

/// Fixed logical canvas the scene is drawn on
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    pub padding_fraction: f64,
}

impl Viewport {
    #[must_use]
    pub fn from_config(config: &MapConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            margin: config.margin_px,
            padding_fraction: config.padding_fraction,
        }
    }

    /// Whether `point` lies inside the canvas inset by the margin
    #[must_use]
    pub fn contains_inset(&self, point: CanvasPoint) -> bool {
        (self.margin..=self.width - self.margin).contains(&point.x)
            && (self.margin..=self.height - self.margin).contains(&point.y)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_config(&MapConfig::default())
    }
}

/// Closed interval of degrees on one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisDomain {
    pub min: f64,
    pub max: f64,
}

impl AxisDomain {
    /// Padded domain covering `values`; never zero-width.
    fn fit(values: impl Iterator<Item = f64>, padding_fraction: f64) -> Self {
        let (min, max) = values
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });

        if !min.is_finite() || !max.is_finite() {
            let half = DEFAULT_SPAN_DEG / 2.0;
            return Self { min: -half, max: half };
        }

        let span = max - min;
        if span <= MIN_SPAN_DEG {
            let centre = (min + max) / 2.0;
            let half = DEFAULT_SPAN_DEG / 2.0;
            return Self {
                min: centre - half,
                max: centre + half,
            };
        }

        let buffer = span * padding_fraction;
        Self {
            min: min - buffer,
            max: max + buffer,
        }
    }

    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Affine, axis-independent transform shared by every element of one scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoProjector {
    viewport: Viewport,
    lng: AxisDomain,
    lat: AxisDomain,
    x_scale: f64,
    y_scale: f64,
}

impl GeoProjector {
    /// Fit a fresh projection over every point of the scene.
    pub fn fit<I>(points: I, viewport: &Viewport) -> Self
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let points: Vec<Coordinate> = points.into_iter().collect();
        let lng = AxisDomain::fit(points.iter().map(|p| p.lng), viewport.padding_fraction);
        let lat = AxisDomain::fit(points.iter().map(|p| p.lat), viewport.padding_fraction);

        let x_scale = (viewport.width - 2.0 * viewport.margin) / lng.span();
        let y_scale = (viewport.height - 2.0 * viewport.margin) / lat.span();

        Self {
            viewport: *viewport,
            lng,
            lat,
            x_scale,
            y_scale,
        }
    }

    #[must_use]
    pub fn project(&self, coord: Coordinate) -> CanvasPoint {
        CanvasPoint::new(
            self.viewport.margin + (coord.lng - self.lng.min) * self.x_scale,
            self.viewport.height - self.viewport.margin - (coord.lat - self.lat.min) * self.y_scale,
        )
    }

    #[must_use]
    pub fn unproject(&self, point: CanvasPoint) -> Coordinate {
        Coordinate::new(
            self.lat.min + (self.viewport.height - self.viewport.margin - point.y) / self.y_scale,
            self.lng.min + (point.x - self.viewport.margin) / self.x_scale,
        )
    }

    /// Pixels per degree on (x, y)
    #[must_use]
    pub fn scale(&self) -> (f64, f64) {
        (self.x_scale, self.y_scale)
    }

    #[must_use]
    pub fn lng_domain(&self) -> AxisDomain {
        self.lng
    }

    #[must_use]
    pub fn lat_domain(&self) -> AxisDomain {
        self.lat
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }
}
