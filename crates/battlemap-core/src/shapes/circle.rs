//! Circle shape with a bounding-square radius.

use super::{ShapeId, ShapeStyle};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Chebyshev half-extent between a center and a second point:
/// `max(|dx|, |dy|)`.
///
/// The circle's bounding box touches the second point on whichever axis has
/// the larger offset; the circle itself is not guaranteed to pass through
/// that point under Euclidean distance. This is the intended behavior.
pub fn chebyshev_radius(center: Point, other: Point) -> f64 {
    (other.x - center.x).abs().max((other.y - center.y).abs())
}

/// A circle placed on the map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: ShapeId,
    /// Center position.
    pub center: Point,
    /// Bounding-square half-extent.
    pub radius: f64,
    /// Style properties recorded at construction.
    pub style: ShapeStyle,
}

impl Circle {
    /// Create a circle from its center and a second clicked point.
    pub fn from_anchor(center: Point, other: Point, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius: chebyshev_radius(center, other),
            style,
        }
    }

    /// Bounding box in map coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }
}
