//! Shape definitions for the battle map.

mod circle;
mod path;
mod square;

pub use circle::{Circle, chebyshev_radius};
pub use path::Polyline;
pub use square::{Square, normalize_corners};

use kurbo::{Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Fill pattern style for shapes (roughjs vocabulary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FillPattern {
    /// Parallel diagonal lines.
    #[default]
    Hachure,
    /// Solid fill color.
    Solid,
    /// Zigzag pattern.
    ZigZag,
    /// Cross-hatched lines.
    CrossHatch,
    /// Dot pattern.
    Dots,
    /// Dashed lines.
    Dashed,
}

/// Style properties for shapes, supplied by the external style picker and
/// recorded on the shape when the drawing gesture completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Fill color.
    pub fill: SerializableColor,
    /// Stroke color.
    pub stroke: SerializableColor,
    /// Fill pattern style.
    pub fill_pattern: FillPattern,
}

impl ShapeStyle {
    /// Get the stroke color as a peniko Color.
    pub fn stroke_color(&self) -> Color {
        self.stroke.into()
    }

    /// Get the fill color as a peniko Color.
    pub fn fill_color(&self) -> Color {
        self.fill.into()
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill: SerializableColor::transparent(),
            stroke: SerializableColor::black(),
            fill_pattern: FillPattern::default(),
        }
    }
}

/// Unique identifier for shapes. Assigned once at construction, never reused.
pub type ShapeId = Uuid;

/// A shape placed on the map. Immutable once constructed: the scene only
/// appends and reads, so a shape's identity can key render caches forever.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Shape {
    Square(Square),
    Circle(Circle),
    Line(Polyline),
    Polygon(Polyline),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Square(s) => s.id,
            Shape::Circle(s) => s.id,
            Shape::Line(s) => s.id,
            Shape::Polygon(s) => s.id,
        }
    }

    /// The point the rendered fragment is translated to: the square's
    /// top-left corner, the circle's center, or the polyline's offset.
    pub fn anchor(&self) -> Point {
        match self {
            Shape::Square(s) => s.lt,
            Shape::Circle(s) => s.center,
            Shape::Line(s) | Shape::Polygon(s) => s.offset,
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Square(s) => s.bounds(),
            Shape::Circle(s) => s.bounds(),
            Shape::Line(s) | Shape::Polygon(s) => s.bounds(),
        }
    }

    pub fn style(&self) -> &ShapeStyle {
        match self {
            Shape::Square(s) => &s.style,
            Shape::Circle(s) => &s.style,
            Shape::Line(s) | Shape::Polygon(s) => &s.style,
        }
    }
}
