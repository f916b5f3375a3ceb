//! Polyline geometry shared by the line and polygon shapes.

use super::{ShapeId, ShapeStyle};
use crate::geom;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sequence of connected points, stored relative to the first click.
///
/// The same representation backs both open lines and closed polygons; the
/// [`super::Shape`] variant carries the distinction. The factory performs no
/// deduplication and no minimum-point validation; that lives in the drawing
/// state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polyline {
    pub(crate) id: ShapeId,
    /// The first clicked point; all stored points are relative to it.
    pub offset: Point,
    /// Points translated so the first one is `(0, 0)`.
    pub points: Vec<Point>,
    /// Style properties recorded at construction.
    pub style: ShapeStyle,
}

impl Polyline {
    /// Create a polyline from absolute clicked points.
    ///
    /// The first point becomes the offset; every point is re-expressed
    /// relative to it. An empty input yields an empty polyline anchored at
    /// the origin.
    pub fn from_points(points: &[Point], style: ShapeStyle) -> Self {
        let offset = points.first().copied().unwrap_or(Point::ZERO);
        Self {
            id: Uuid::new_v4(),
            offset,
            points: points.iter().map(|&p| geom::sub(p, offset)).collect(),
            style,
        }
    }

    /// Points translated back into absolute map coordinates.
    pub fn absolute_points(&self) -> Vec<Point> {
        self.points.iter().map(|&p| geom::add(p, self.offset)).collect()
    }

    /// Bounding box in map coordinates.
    pub fn bounds(&self) -> Rect {
        let mut bounds = Rect::new(self.offset.x, self.offset.y, self.offset.x, self.offset.y);
        for p in self.absolute_points() {
            bounds = bounds.union_pt(p);
        }
        bounds
    }
}
