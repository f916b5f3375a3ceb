//! Componentwise point arithmetic for the grid plane.
//!
//! All coordinates flowing through the editor are grid-aligned products of
//! [`crate::scene::Scene::snapped_xy`], so exact floating-point comparison is
//! safe here and used deliberately instead of an epsilon tolerance.

use kurbo::Point;

/// Componentwise sum of two points.
pub fn add(a: Point, b: Point) -> Point {
    Point::new(a.x + b.x, a.y + b.y)
}

/// Componentwise difference of two points.
pub fn sub(a: Point, b: Point) -> Point {
    Point::new(a.x - b.x, a.y - b.y)
}

/// Exact componentwise equality.
///
/// Only valid for grid-aligned coordinates; raw pointer positions must be
/// snapped before being compared.
pub fn coords_equal(a: Point, b: Point) -> bool {
    a.x == b.x && a.y == b.y
}
