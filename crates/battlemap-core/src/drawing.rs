//! Multi-click drawing state machine.
//!
//! Converts a sequence of snapped click events plus a continuous stream of
//! snapped move events into exactly one finished [`Shape`] per gesture,
//! driving a single live preview placeholder along the way. All degenerate
//! inputs (duplicate anchor clicks, moves without an anchor, unchanged
//! positions) are silent no-ops; the machine simply does not transition.

use crate::geom::coords_equal;
use crate::shapes::{Circle, Polyline, Shape, ShapeStyle, Square, chebyshev_radius};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Drawing tools, selected by the external toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    Square,
    Circle,
    Line,
    Polygon,
}

/// State of one drawing gesture.
///
/// The click buffer and the last-rendered preview position/radius are
/// explicit fields, reset on tool change and on shape completion. The tool
/// stays selected between gestures until the caller deselects it.
pub struct DrawingSession {
    tool: Option<ToolKind>,
    style: ShapeStyle,
    /// Accepted snapped click positions for the gesture in progress.
    clicks: Vec<Point>,
    /// Snapped cursor marker, tracked on every move.
    cursor: Option<Point>,
    /// The single preview placeholder; each rebuild replaces it.
    preview: Option<Shape>,
    /// Snapped position of the last preview rebuild.
    last_preview_pos: Option<Point>,
    /// Radius of the last circle preview rebuild.
    last_preview_radius: Option<f64>,
}

impl Default for DrawingSession {
    fn default() -> Self {
        Self {
            tool: None,
            style: ShapeStyle::default(),
            clicks: Vec::new(),
            cursor: None,
            preview: None,
            last_preview_pos: None,
            last_preview_radius: None,
        }
    }
}

impl DrawingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a tool (or deselect with `None`). Any gesture in progress is
    /// discarded.
    pub fn set_tool(&mut self, tool: Option<ToolKind>) {
        self.tool = tool;
        self.reset_gesture();
    }

    pub fn tool(&self) -> Option<ToolKind> {
        self.tool
    }

    /// Adopt the style supplied by the external style picker. Applies to
    /// shapes finished after this call.
    pub fn set_style(&mut self, style: ShapeStyle) {
        self.style = style;
    }

    pub fn style(&self) -> ShapeStyle {
        self.style
    }

    /// The snapped cursor marker position, if the pointer has moved yet.
    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    /// The current preview placeholder.
    pub fn preview(&self) -> Option<&Shape> {
        self.preview.as_ref()
    }

    /// Snapped clicks accepted so far in the gesture in progress.
    pub fn pending_points(&self) -> &[Point] {
        &self.clicks
    }

    fn reset_gesture(&mut self) {
        self.clicks.clear();
        self.preview = None;
        self.last_preview_pos = None;
        self.last_preview_radius = None;
    }

    /// Process a snapped click. Returns the finished shape when the click
    /// completes a gesture; the click buffer resets and the tool stays
    /// selected.
    pub fn click(&mut self, snapped: Point) -> Option<Shape> {
        let tool = self.tool?;
        let finished = match tool {
            ToolKind::Square | ToolKind::Circle => self.click_two_point(tool, snapped),
            ToolKind::Line | ToolKind::Polygon => self.click_path(tool, snapped),
        };
        if let Some(shape) = &finished {
            log::debug!("drawing: finished {:?} shape {}", tool, shape.id());
            self.reset_gesture();
        }
        finished
    }

    /// Square/circle: exactly two distinct points. A second click on the
    /// anchor cell is ignored so a true double-click cannot produce a
    /// zero-size shape.
    fn click_two_point(&mut self, tool: ToolKind, snapped: Point) -> Option<Shape> {
        let Some(&anchor) = self.clicks.first() else {
            self.clicks.push(snapped);
            return None;
        };
        if coords_equal(snapped, anchor) {
            return None;
        }
        Some(match tool {
            ToolKind::Square => Shape::Square(Square::from_corners(anchor, snapped, self.style)),
            ToolKind::Circle => Shape::Circle(Circle::from_anchor(anchor, snapped, self.style)),
            _ => unreachable!(),
        })
    }

    /// Line/polygon: unbounded points; clicking the previous point again
    /// finalizes from the points accumulated before the duplicate.
    fn click_path(&mut self, tool: ToolKind, snapped: Point) -> Option<Shape> {
        if self.clicks.len() >= 2
            && self.clicks.last().is_some_and(|&last| coords_equal(snapped, last))
        {
            let poly = Polyline::from_points(&self.clicks, self.style);
            return Some(match tool {
                ToolKind::Line => Shape::Line(poly),
                ToolKind::Polygon => Shape::Polygon(poly),
                _ => unreachable!(),
            });
        }
        self.clicks.push(snapped);
        None
    }

    /// Process a snapped pointer move: update the cursor marker and, if a
    /// gesture is in progress, rebuild the preview placeholder when (and
    /// only when) it would actually change.
    pub fn motion(&mut self, snapped: Point) {
        self.cursor = Some(snapped);
        let Some(tool) = self.tool else { return };
        let Some(&anchor) = self.clicks.first() else { return };

        match tool {
            ToolKind::Square => {
                if !coords_equal(snapped, anchor) && !self.at_last_preview(snapped) {
                    self.preview =
                        Some(Shape::Square(Square::from_corners(anchor, snapped, self.style)));
                    self.last_preview_pos = Some(snapped);
                }
            }
            ToolKind::Circle => {
                // Rebuild on radius change, not raw position change: moving
                // along the bounding square of the current radius is a no-op.
                let radius = chebyshev_radius(anchor, snapped);
                if self.last_preview_radius != Some(radius) {
                    self.preview =
                        Some(Shape::Circle(Circle::from_anchor(anchor, snapped, self.style)));
                    self.last_preview_radius = Some(radius);
                }
            }
            ToolKind::Line | ToolKind::Polygon => {
                if !self.at_last_preview(snapped) {
                    let mut points = self.clicks.clone();
                    points.push(snapped);
                    let poly = Polyline::from_points(&points, self.style);
                    self.preview = Some(match tool {
                        ToolKind::Line => Shape::Line(poly),
                        ToolKind::Polygon => Shape::Polygon(poly),
                        _ => unreachable!(),
                    });
                    self.last_preview_pos = Some(snapped);
                }
            }
        }
    }

    fn at_last_preview(&self, snapped: Point) -> bool {
        self.last_preview_pos
            .is_some_and(|p| coords_equal(p, snapped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::coords_equal;

    fn session(tool: ToolKind) -> DrawingSession {
        let mut s = DrawingSession::new();
        s.set_tool(Some(tool));
        s
    }

    #[test]
    fn test_no_tool_ignores_clicks() {
        let mut s = DrawingSession::new();
        assert!(s.click(Point::new(0.0, 0.0)).is_none());
        assert!(s.pending_points().is_empty());
    }

    #[test]
    fn test_square_gesture() {
        let mut s = session(ToolKind::Square);
        assert!(s.click(Point::new(40.0, 40.0)).is_none());
        let shape = s.click(Point::new(120.0, 80.0)).expect("second click finishes");
        match shape {
            Shape::Square(sq) => {
                assert!(coords_equal(sq.lt, Point::new(40.0, 40.0)));
                assert!((sq.width - 80.0).abs() < f64::EPSILON);
                assert!((sq.height - 40.0).abs() < f64::EPSILON);
            }
            other => panic!("expected square, got {other:?}"),
        }
        // Buffer reset, tool still selected.
        assert!(s.pending_points().is_empty());
        assert_eq!(s.tool(), Some(ToolKind::Square));
    }

    #[test]
    fn test_square_anchor_duplicate_is_ignored() {
        let mut s = session(ToolKind::Square);
        assert!(s.click(Point::new(0.0, 0.0)).is_none());
        assert!(s.click(Point::new(0.0, 0.0)).is_none());
        assert_eq!(s.pending_points().len(), 1);
    }

    #[test]
    fn test_circle_gesture() {
        let mut s = session(ToolKind::Circle);
        assert!(s.click(Point::new(80.0, 80.0)).is_none());
        let shape = s.click(Point::new(120.0, 160.0)).expect("second click finishes");
        match shape {
            Shape::Circle(c) => {
                assert!(coords_equal(c.center, Point::new(80.0, 80.0)));
                assert!((c.radius - 80.0).abs() < f64::EPSILON);
            }
            other => panic!("expected circle, got {other:?}"),
        }
    }

    #[test]
    fn test_polygon_duplicate_terminates() {
        let mut s = session(ToolKind::Polygon);
        assert!(s.click(Point::new(0.0, 0.0)).is_none());
        assert!(s.click(Point::new(40.0, 0.0)).is_none());
        assert!(s.click(Point::new(40.0, 40.0)).is_none());
        let shape = s.click(Point::new(40.0, 40.0)).expect("duplicate finalizes");
        match shape {
            Shape::Polygon(poly) => {
                assert!(coords_equal(poly.offset, Point::new(0.0, 0.0)));
                assert_eq!(poly.points.len(), 3);
                assert!(coords_equal(poly.points[2], Point::new(40.0, 40.0)));
            }
            other => panic!("expected polygon, got {other:?}"),
        }
        assert!(s.pending_points().is_empty());
    }

    #[test]
    fn test_line_needs_two_points_before_terminating() {
        let mut s = session(ToolKind::Line);
        assert!(s.click(Point::new(0.0, 0.0)).is_none());
        // Buffer has one point: the duplicate is appended, not a terminator.
        assert!(s.click(Point::new(0.0, 0.0)).is_none());
        assert_eq!(s.pending_points().len(), 2);
    }

    #[test]
    fn test_cursor_tracks_every_move() {
        let mut s = session(ToolKind::Square);
        s.motion(Point::new(40.0, 0.0));
        assert_eq!(s.cursor(), Some(Point::new(40.0, 0.0)));
        s.motion(Point::new(80.0, 40.0));
        assert_eq!(s.cursor(), Some(Point::new(80.0, 40.0)));
    }

    #[test]
    fn test_no_preview_before_anchor() {
        let mut s = session(ToolKind::Square);
        s.motion(Point::new(40.0, 40.0));
        assert!(s.preview().is_none());
    }

    #[test]
    fn test_square_preview_skips_anchor_position() {
        let mut s = session(ToolKind::Square);
        s.click(Point::new(40.0, 40.0));
        s.motion(Point::new(40.0, 40.0));
        assert!(s.preview().is_none());
        s.motion(Point::new(80.0, 80.0));
        assert!(s.preview().is_some());
    }

    #[test]
    fn test_square_preview_suppresses_same_position() {
        let mut s = session(ToolKind::Square);
        s.click(Point::new(0.0, 0.0));
        s.motion(Point::new(80.0, 40.0));
        let first_id = s.preview().expect("preview built").id();
        s.motion(Point::new(80.0, 40.0));
        // Unchanged position: the placeholder is not replaced.
        assert_eq!(s.preview().expect("preview kept").id(), first_id);
        s.motion(Point::new(120.0, 40.0));
        assert_ne!(s.preview().expect("preview rebuilt").id(), first_id);
    }

    #[test]
    fn test_circle_preview_suppresses_same_radius() {
        let mut s = session(ToolKind::Circle);
        s.click(Point::new(0.0, 0.0));
        s.motion(Point::new(80.0, 40.0));
        let first_id = s.preview().expect("preview built").id();
        // Different position, same Chebyshev radius: no rebuild.
        s.motion(Point::new(40.0, 80.0));
        assert_eq!(s.preview().expect("preview kept").id(), first_id);
        s.motion(Point::new(120.0, 0.0));
        assert_ne!(s.preview().expect("preview rebuilt").id(), first_id);
    }

    #[test]
    fn test_line_preview_spans_buffer_and_cursor() {
        let mut s = session(ToolKind::Line);
        s.click(Point::new(40.0, 40.0));
        s.click(Point::new(80.0, 40.0));
        s.motion(Point::new(80.0, 120.0));
        match s.preview().expect("preview built") {
            Shape::Line(poly) => {
                assert!(coords_equal(poly.offset, Point::new(40.0, 40.0)));
                assert_eq!(poly.points.len(), 3);
                assert!(coords_equal(poly.points[0], Point::new(0.0, 0.0)));
                assert!(coords_equal(poly.points[1], Point::new(40.0, 0.0)));
                assert!(coords_equal(poly.points[2], Point::new(40.0, 80.0)));
            }
            other => panic!("expected line preview, got {other:?}"),
        }
    }

    #[test]
    fn test_tool_change_discards_gesture() {
        let mut s = session(ToolKind::Polygon);
        s.click(Point::new(0.0, 0.0));
        s.motion(Point::new(40.0, 40.0));
        s.set_tool(Some(ToolKind::Square));
        assert!(s.pending_points().is_empty());
        assert!(s.preview().is_none());
    }
}
