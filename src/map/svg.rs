use std::fmt::Write;

use super::animation::SpokeMarker;
use super::scene::{SPOKE_MARKER_RADIUS, Scene, Shape, Stroke};

/// Serialize `scene` as a standalone SVG document scaled to fit its container.
#[must_use]
pub fn render_svg(scene: &Scene, markers: &[SpokeMarker]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" preserveAspectRatio="xMidYMid slice">"#,
        scene.viewport.width, scene.viewport.height
    );

    for node in &scene.nodes {
        for shape in &node.shapes {
            write_shape(&mut out, shape);
        }
    }

    for marker in markers {
        let _ = writeln!(
            out,
            r#"  <circle cx="{:.2}" cy="{:.2}" r="{}" fill="{}"/>"#,
            marker.position.x,
            marker.position.y,
            SPOKE_MARKER_RADIUS,
            escape(&marker.color)
        );
    }

    out.push_str("</svg>\n");
    out
}

fn write_shape(out: &mut String, shape: &Shape) {
    match shape {
        Shape::Circle {
            center,
            radius,
            fill,
            fill_opacity,
            stroke,
        } => {
            let _ = writeln!(
                out,
                r#"  <circle cx="{:.2}" cy="{:.2}" r="{}" fill="{}" fill-opacity="{}"{}/>"#,
                center.x,
                center.y,
                radius,
                escape(fill),
                fill_opacity,
                stroke_attrs(stroke.as_ref())
            );
        }
        Shape::Line { from, to, stroke } => {
            let _ = writeln!(
                out,
                r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}"{}/>"#,
                from.x,
                from.y,
                to.x,
                to.y,
                stroke_attrs(Some(stroke))
            );
        }
        Shape::Label {
            at,
            text,
            font_size,
            color,
            bold,
        } => {
            let weight = if *bold { "bold" } else { "normal" };
            let _ = writeln!(
                out,
                r#"  <text x="{:.2}" y="{:.2}" text-anchor="middle" font-size="{}px" font-weight="{}" fill="{}">{}</text>"#,
                at.x,
                at.y,
                font_size,
                weight,
                escape(color),
                escape(text)
            );
        }
    }
}

fn stroke_attrs(stroke: Option<&Stroke>) -> String {
    let Some(stroke) = stroke else {
        return String::new();
    };
    let mut attrs = format!(
        r#" stroke="{}" stroke-width="{}" stroke-opacity="{}""#,
        escape(&stroke.color),
        stroke.width,
        stroke.opacity
    );
    if let Some((dash, gap)) = stroke.dash {
        let _ = write!(attrs, r#" stroke-dasharray="{dash},{gap}""#);
    }
    attrs
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::projection::{CanvasPoint, GeoProjector, Viewport};
    use crate::models::ranking::tests::hotel;
    use crate::models::{AnchorSet, ResultSet};

    fn scene(selected: Option<&str>) -> Scene {
        let anchors = AnchorSet::nanjing();
        let mut result = hotel("h1", 32.0, 118.79, [20.0, 25.0, 30.0, 15.0]);
        result.name = "Tom & Jerry <Inn>".to_string();
        let results = ResultSet::new(vec![result]).unwrap();
        let projector = GeoProjector::fit(
            anchors.coordinates().chain(results.coordinates()),
            &Viewport::default(),
        );
        Scene::build(&anchors, &results, selected, &projector)
    }

    #[test]
    fn test_svg_uses_fixed_logical_canvas() {
        let svg = render_svg(&scene(None), &[]);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 800 600""#));
        assert!(svg.contains(r#"preserveAspectRatio="xMidYMid slice""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_svg_draws_dashed_connectors_when_selected() {
        let svg = render_svg(&scene(Some("h1")), &[]);
        assert_eq!(svg.matches("<line").count(), 4);
        assert_eq!(svg.matches(r#"stroke-dasharray="5,5""#).count(), 4);
        assert!(svg.contains(r#"stroke-dasharray="4,2""#));
    }

    #[test]
    fn test_svg_escapes_labels() {
        let svg = render_svg(&scene(Some("h1")), &[]);
        assert!(svg.contains("Tom &amp; Jerry &lt;Inn&gt;"));
    }

    #[test]
    fn test_svg_includes_travelling_markers() {
        let markers = [SpokeMarker {
            anchor_id: "fuzimiao".to_string(),
            color: "#ef4444".to_string(),
            position: CanvasPoint::new(12.5, 40.0),
        }];
        let svg = render_svg(&scene(Some("h1")), &markers);
        assert!(svg.contains(r##"<circle cx="12.50" cy="40.00" r="4" fill="#ef4444"/>"##));
    }
}
