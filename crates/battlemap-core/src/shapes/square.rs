//! Axis-aligned square/rectangle shape.

use super::{ShapeId, ShapeStyle};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Order two arbitrary corner points into `(top_left, bottom_right)`.
///
/// The rule is asymmetric on purpose: `p1` stays the top-left corner unless
/// it strictly dominates `p2` on *both* axes. Mixed orderings (one axis each
/// way) keep `(p1, p2)` even though the resulting extent is negative on one
/// axis. Downstream consumers rely on this exact resolution, so it must not
/// be replaced with a general min/max.
pub fn normalize_corners(p1: Point, p2: Point) -> (Point, Point) {
    if p1.x < p2.x || p1.y < p2.y {
        (p1, p2)
    } else {
        (p2, p1)
    }
}

/// A grid-aligned square (or rectangle) placed on the map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Square {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub lt: Point,
    /// Width of the square.
    pub width: f64,
    /// Height of the square.
    pub height: f64,
    /// Style properties recorded at construction.
    pub style: ShapeStyle,
}

impl Square {
    /// Create a square from two clicked corner points.
    pub fn from_corners(p1: Point, p2: Point, style: ShapeStyle) -> Self {
        let (lt, rb) = normalize_corners(p1, p2);
        Self {
            id: Uuid::new_v4(),
            lt,
            width: rb.x - lt.x,
            height: rb.y - lt.y,
            style,
        }
    }

    /// Bounding box in map coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.lt.x,
            self.lt.y,
            self.lt.x + self.width,
            self.lt.y + self.height,
        )
    }
}
