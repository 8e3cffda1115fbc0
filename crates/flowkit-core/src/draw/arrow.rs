//! Connector path rendering and the shared arrowhead marker.
//!
//! Every routed connector is an axis-aligned polyline drawn as a single
//! `<path>` whose end is capped by one document-wide `<marker>`. The marker
//! is emitted once per document and referenced by id from every path.

use svg::node::element as svg_element;
use svg::node::element::path::Data;

use crate::{draw::Stroke, geometry::Point};

/// The id of the document-wide arrowhead marker.
pub const ARROW_MARKER_ID: &str = "markerArrow";

/// Builds the arrowhead marker definition.
///
/// The marker is a small solid triangle oriented along the path, with its
/// reference point on the tip so the path may end exactly on the target
/// attachment.
pub fn arrow_marker() -> svg_element::Marker {
    svg_element::Marker::new()
        .set("id", ARROW_MARKER_ID)
        .set("markerWidth", 5)
        .set("markerHeight", 5)
        .set("orient", "auto")
        .set("refX", 5)
        .set("refY", 2.5)
        .add(
            svg_element::Path::new()
                .set("style", "fill: #000000;")
                .set("d", "M0,0 L0,5 L5,2.5 L0,0"),
        )
}

/// Renders a waypoint polyline as an arrow-terminated path.
///
/// # Panics
///
/// Panics if `points` is empty; the router always produces at least two
/// waypoints per connector.
pub fn connector_path(points: &[Point], stroke: &Stroke) -> svg_element::Path {
    let mut data = Data::new().move_to((points[0].x(), points[0].y()));
    for point in &points[1..] {
        data = data.line_to((point.x(), point.y()));
    }

    svg_element::Path::new()
        .set("d", data)
        .set("fill", "transparent")
        .set("stroke", stroke.color())
        .set("stroke-width", stroke.width())
        .set("style", format!("marker-end: url(#{ARROW_MARKER_ID});"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_has_expected_geometry() {
        let markup = arrow_marker().to_string();

        assert!(markup.contains(&format!("id=\"{ARROW_MARKER_ID}\"")));
        assert!(markup.contains("orient=\"auto\""));
        assert!(markup.contains("refX=\"5\""));
        assert!(markup.contains("refY=\"2.5\""));
    }

    #[test]
    fn test_path_follows_waypoints() {
        let points = [
            Point::new(27.5, 36.0),
            Point::new(27.5, 62.0),
            Point::new(27.5, 74.0),
            Point::new(27.5, 100.0),
        ];
        let markup = connector_path(&points, &Stroke::default()).to_string();

        assert!(markup.contains("M27.5,36"));
        assert_eq!(markup.matches('L').count(), 3);
        assert!(markup.contains(&format!("marker-end: url(#{ARROW_MARKER_ID});")));
    }

    #[test]
    fn test_two_point_path() {
        let points = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let markup = connector_path(&points, &Stroke::default()).to_string();

        assert!(markup.contains("M0,0"));
        assert!(markup.contains("L10,0"));
    }
}
