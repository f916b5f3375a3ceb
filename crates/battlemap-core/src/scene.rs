//! Scene state: the tile grid, the viewport and the append-only shape list.

use crate::shapes::Shape;
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Notification emitted after every scene mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    /// A shape was appended to the shape list.
    ShapesChanged,
    /// The viewport position, dimension or screen offset changed.
    ViewportChanged,
}

/// Listener invoked synchronously after a mutation completes.
pub type SceneListener = Box<dyn FnMut(&SceneEvent)>;

/// The visible window onto the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Top-left of the visible window in map coordinates.
    pub xy: Point,
    /// Visible extent in pixels, measured from the host surface.
    pub dimension: Size,
    /// Screen-space position of the host surface, subtracted from raw
    /// pointer coordinates before snapping.
    pub screen_offset: Point,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            xy: Point::ZERO,
            dimension: Size::ZERO,
            screen_offset: Point::ZERO,
        }
    }
}

/// The editing session's single source of truth.
///
/// Tile geometry is fixed at construction; the viewport mutates continuously
/// in response to resize and pan events; shapes accumulate monotonically.
/// Nothing is ever removed or edited, so insertion order is paint order and
/// shape identity stays valid for the life of the session.
pub struct Scene {
    /// Grid cell size in map units.
    tile_size: f64,
    /// Grid extent in whole cells.
    tile_counts: Vec2,
    /// Total map extent, `tile_counts * tile_size`. Derived once.
    scene_dimension: Size,
    viewport: Viewport,
    shapes: Vec<Shape>,
    listeners: Vec<SceneListener>,
}

impl Scene {
    /// Create a scene with a fixed tile grid.
    pub fn new(tile_size: f64, tile_counts: Vec2) -> Self {
        Self {
            tile_size,
            tile_counts,
            scene_dimension: Size::new(tile_counts.x * tile_size, tile_counts.y * tile_size),
            viewport: Viewport::default(),
            shapes: Vec::new(),
            listeners: Vec::new(),
        }
    }

    pub fn tile_size(&self) -> f64 {
        self.tile_size
    }

    pub fn tile_counts(&self) -> Vec2 {
        self.tile_counts
    }

    pub fn scene_dimension(&self) -> Size {
        self.scene_dimension
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Shapes in paint order (back to front).
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Register a listener notified synchronously after every mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&SceneEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self, event: SceneEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    /// Clamp a requested viewport position into the scene.
    ///
    /// Each axis is clamped to `[0, scene_dimension - viewport.dimension]`.
    /// When the viewport is larger than the scene on an axis the upper bound
    /// is negative; it collapses to 0 so the result is always 0 there.
    pub fn clamp_viewport_xy(&self, xy: Point) -> Point {
        let max_x = (self.scene_dimension.width - self.viewport.dimension.width).max(0.0);
        let max_y = (self.scene_dimension.height - self.viewport.dimension.height).max(0.0);
        Point::new(xy.x.clamp(0.0, max_x), xy.y.clamp(0.0, max_y))
    }

    /// Clamp and store the viewport position.
    pub fn set_viewport_xy(&mut self, xy: Point) {
        self.viewport.xy = self.clamp_viewport_xy(xy);
        self.notify(SceneEvent::ViewportChanged);
    }

    /// Store the measured viewport extent (host resize).
    pub fn set_viewport_dimension(&mut self, dimension: Size) {
        self.viewport.dimension = dimension;
        self.notify(SceneEvent::ViewportChanged);
    }

    /// Store the measured screen offset of the host surface.
    pub fn set_viewport_offset(&mut self, offset: Point) {
        self.viewport.screen_offset = offset;
        self.notify(SceneEvent::ViewportChanged);
    }

    /// Map a raw screen coordinate to the nearest grid-aligned map
    /// coordinate.
    ///
    /// Subtracts the screen offset, floors negative results to 0 (no upper
    /// clamp), and rounds to the nearest tile boundary. `f64::round` ties
    /// away from zero, which matches the intended half-way behavior since
    /// inputs are non-negative at that point.
    pub fn snapped_xy(&self, screen: Point) -> Point {
        let local_x = (screen.x - self.viewport.screen_offset.x).max(0.0);
        let local_y = (screen.y - self.viewport.screen_offset.y).max(0.0);
        Point::new(
            (local_x / self.tile_size).round() * self.tile_size,
            (local_y / self.tile_size).round() * self.tile_size,
        )
    }

    /// Append a shape to the scene. No bounds validation, no dedup.
    pub fn add_shape(&mut self, shape: Shape) {
        log::debug!("scene: add shape {}", shape.id());
        self.shapes.push(shape);
        self.notify(SceneEvent::ShapesChanged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{ShapeStyle, Square};
    use std::cell::Cell;
    use std::rc::Rc;

    fn grid_scene() -> Scene {
        // 60x60 cells of 40 map units = 2400x2400.
        Scene::new(40.0, Vec2::new(60.0, 60.0))
    }

    #[test]
    fn test_scene_dimension_derived() {
        let scene = grid_scene();
        assert!((scene.scene_dimension().width - 2400.0).abs() < f64::EPSILON);
        assert!((scene.scene_dimension().height - 2400.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clamp_viewport_xy() {
        let mut scene = grid_scene();
        scene.set_viewport_dimension(Size::new(800.0, 600.0));
        let clamped = scene.clamp_viewport_xy(Point::new(-50.0, 3000.0));
        assert!((clamped.x - 0.0).abs() < f64::EPSILON);
        assert!((clamped.y - 1800.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clamp_oversized_viewport_collapses_to_zero() {
        let mut scene = Scene::new(40.0, Vec2::new(10.0, 10.0)); // 400x400
        scene.set_viewport_dimension(Size::new(800.0, 600.0));
        let clamped = scene.clamp_viewport_xy(Point::new(100.0, 100.0));
        assert!((clamped.x - 0.0).abs() < f64::EPSILON);
        assert!((clamped.y - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_snapping() {
        let scene = grid_scene();
        assert_eq!(scene.snapped_xy(Point::new(41.0, 19.0)), Point::new(40.0, 0.0));
        assert_eq!(scene.snapped_xy(Point::new(19.0, 19.0)), Point::new(0.0, 0.0));
        // Exact midpoints round away from zero.
        assert_eq!(scene.snapped_xy(Point::new(20.0, 20.0)), Point::new(40.0, 40.0));
    }

    #[test]
    fn test_snapping_respects_screen_offset() {
        let mut scene = grid_scene();
        scene.set_viewport_offset(Point::new(100.0, 50.0));
        assert_eq!(scene.snapped_xy(Point::new(141.0, 69.0)), Point::new(40.0, 0.0));
        // Left of the surface: negative local coordinates floor to 0.
        assert_eq!(scene.snapped_xy(Point::new(10.0, 10.0)), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_listeners_notified_per_mutation() {
        let mut scene = grid_scene();
        let shape_events = Rc::new(Cell::new(0u32));
        let viewport_events = Rc::new(Cell::new(0u32));
        let s = shape_events.clone();
        let v = viewport_events.clone();
        scene.subscribe(move |event| match event {
            SceneEvent::ShapesChanged => s.set(s.get() + 1),
            SceneEvent::ViewportChanged => v.set(v.get() + 1),
        });

        scene.set_viewport_dimension(Size::new(800.0, 600.0));
        scene.set_viewport_xy(Point::new(40.0, 40.0));
        scene.add_shape(crate::shapes::Shape::Square(Square::from_corners(
            Point::new(0.0, 0.0),
            Point::new(40.0, 40.0),
            ShapeStyle::default(),
        )));

        assert_eq!(shape_events.get(), 1);
        assert_eq!(viewport_events.get(), 2);
    }

    #[test]
    fn test_add_shape_keeps_order() {
        let mut scene = grid_scene();
        let style = ShapeStyle::default();
        let first = Square::from_corners(Point::new(0.0, 0.0), Point::new(40.0, 40.0), style);
        let second = Square::from_corners(Point::new(40.0, 40.0), Point::new(80.0, 80.0), style);
        let first_id = first.id;
        let second_id = second.id;
        scene.add_shape(crate::shapes::Shape::Square(first));
        scene.add_shape(crate::shapes::Shape::Square(second));
        assert_eq!(scene.shapes()[0].id(), first_id);
        assert_eq!(scene.shapes()[1].id(), second_id);
    }
}
