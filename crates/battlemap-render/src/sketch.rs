//! Sketch-renderer seam.
//!
//! The procedural hand-drawn rendering algorithm is an external
//! collaborator: a pure function from a primitive kind plus style to a small
//! ordered tree of vector drawing nodes. This module defines that contract
//! and a plain (un-sketched) backend useful as a default and in tests.

use battlemap_core::shapes::{FillPattern, SerializableColor, Shape, ShapeStyle};
use kurbo::{BezPath, Point, Shape as KurboShape};
use thiserror::Error;

/// Renderer boundary errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("sketch backend failed: {0}")]
    Backend(String),
}

/// Primitive kind with geometry in anchor-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum SketchPrimitive {
    Rectangle { width: f64, height: f64 },
    Circle { diameter: f64 },
    LinearPath { points: Vec<Point> },
    Polygon { points: Vec<Point> },
}

/// Role of a node inside a rendered fragment (roughjs vocabulary).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// Outline stroke.
    Stroke,
    /// Solid fill path.
    Fill,
    /// Sketched fill pattern strokes.
    FillSketch,
}

/// One vector drawing node with its rendering attributes.
#[derive(Debug, Clone)]
pub struct SketchNode {
    pub role: NodeRole,
    /// Geometry in anchor-local coordinates.
    pub path: BezPath,
    /// Attribute set, kebab-case names as the backend emits them.
    pub attributes: Vec<(String, String)>,
}

/// The backend's output for one shape: a small ordered list of nodes.
#[derive(Debug, Clone, Default)]
pub struct SketchFragment {
    pub nodes: Vec<SketchNode>,
}

/// The external sketch renderer. Treated as a pure function of its inputs,
/// which is what makes identity-keyed caching of its output sound.
pub trait SketchRenderer {
    fn render(
        &mut self,
        primitive: &SketchPrimitive,
        style: &ShapeStyle,
    ) -> Result<SketchFragment, RenderError>;
}

/// Map a shape to the primitive handed to the backend. Geometry is
/// re-expressed relative to the shape's anchor; positioning happens later by
/// translating the finished fragment.
pub fn primitive_for(shape: &Shape) -> SketchPrimitive {
    match shape {
        Shape::Square(s) => SketchPrimitive::Rectangle {
            width: s.width,
            height: s.height,
        },
        Shape::Circle(c) => SketchPrimitive::Circle {
            diameter: c.radius * 2.0,
        },
        Shape::Line(p) => SketchPrimitive::LinearPath {
            points: p.points.clone(),
        },
        Shape::Polygon(p) => SketchPrimitive::Polygon {
            points: p.points.clone(),
        },
    }
}

/// Hex form of a color, `#rrggbb` or `#rrggbbaa` when not fully opaque.
pub fn color_hex(color: SerializableColor) -> String {
    if color.a == 255 {
        format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", color.r, color.g, color.b, color.a)
    }
}

/// Precise, non-procedural backend: exact outlines, solid fills only.
///
/// Stands in for the sketch library when the hand-drawn look is not wanted
/// and doubles as the deterministic backend for tests.
#[derive(Debug, Default)]
pub struct PlainSketcher;

impl PlainSketcher {
    fn outline(primitive: &SketchPrimitive) -> BezPath {
        match primitive {
            SketchPrimitive::Rectangle { width, height } => {
                kurbo::Rect::new(0.0, 0.0, *width, *height).to_path(0.1)
            }
            SketchPrimitive::Circle { diameter } => {
                kurbo::Circle::new(Point::ZERO, diameter / 2.0).to_path(0.1)
            }
            SketchPrimitive::LinearPath { points } => polyline_path(points, false),
            SketchPrimitive::Polygon { points } => polyline_path(points, true),
        }
    }
}

fn polyline_path(points: &[Point], close: bool) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(&first) = iter.next() {
        path.move_to(first);
        for &p in iter {
            path.line_to(p);
        }
        if close {
            path.close_path();
        }
    }
    path
}

impl SketchRenderer for PlainSketcher {
    fn render(
        &mut self,
        primitive: &SketchPrimitive,
        style: &ShapeStyle,
    ) -> Result<SketchFragment, RenderError> {
        let mut nodes = Vec::new();
        let fillable = matches!(
            primitive,
            SketchPrimitive::Rectangle { .. }
                | SketchPrimitive::Circle { .. }
                | SketchPrimitive::Polygon { .. }
        );
        if fillable && style.fill.a > 0 && style.fill_pattern == FillPattern::Solid {
            nodes.push(SketchNode {
                role: NodeRole::Fill,
                path: Self::outline(primitive),
                attributes: vec![
                    ("fill".into(), color_hex(style.fill)),
                    ("stroke".into(), "none".into()),
                ],
            });
        }
        nodes.push(SketchNode {
            role: NodeRole::Stroke,
            path: Self::outline(primitive),
            attributes: vec![
                ("stroke".into(), color_hex(style.stroke)),
                ("stroke-width".into(), "2".into()),
                ("fill".into(), "none".into()),
            ],
        });
        Ok(SketchFragment { nodes })
    }
}
