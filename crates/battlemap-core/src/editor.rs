//! Editor session: wires pointer input, snapping, the drawing state machine
//! and the scene together.

use crate::drawing::{DrawingSession, ToolKind};
use crate::input::{Debouncer, PanGesture, PointerEvent};
use crate::scene::Scene;
use crate::shapes::{Shape, ShapeStyle};
use kurbo::{Point, Size, Vec2};
use std::time::Instant;

/// Host-surface layout measurement: visible extent plus screen offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMeasure {
    pub dimension: Size,
    pub screen_offset: Point,
}

/// Callback handed every finished shape.
pub type ShapeCallback = Box<dyn FnMut(&Shape)>;

/// One editing session over a fixed tile grid.
///
/// External collaborators feed in tool selections (toolbar), styles (style
/// picker), raw pointer events and layout measurements (host surface); the
/// editor snaps coordinates, drives the drawing state machine, appends
/// finished shapes to the scene and hands them to the `on_shape` callback.
pub struct MapEditor {
    scene: Scene,
    session: DrawingSession,
    resize_debounce: Debouncer<SurfaceMeasure>,
    pan: Option<PanGesture>,
    on_shape: Option<ShapeCallback>,
}

impl MapEditor {
    /// Create an editor over a grid of `tile_counts` cells of `tile_size`
    /// map units each.
    pub fn new(tile_size: f64, tile_counts: Vec2) -> Self {
        Self {
            scene: Scene::new(tile_size, tile_counts),
            session: DrawingSession::new(),
            resize_debounce: Debouncer::default(),
            pan: None,
            on_shape: None,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable scene access, used by the host to register render-layer
    /// listeners at startup.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    /// Register the callback receiving every finished shape.
    pub fn on_shape(&mut self, callback: impl FnMut(&Shape) + 'static) {
        self.on_shape = Some(Box::new(callback));
    }

    /// Toolbar notification: select or deselect the active tool.
    pub fn set_tool(&mut self, tool: Option<ToolKind>) {
        self.session.set_tool(tool);
    }

    /// Style-picker notification.
    pub fn set_style(&mut self, style: ShapeStyle) {
        self.session.set_style(style);
    }

    /// Process a pointer event in raw screen coordinates. Every event is
    /// snapped through the scene before it reaches the state machine.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Move { position } => {
                let snapped = self.scene.snapped_xy(position);
                self.session.motion(snapped);
            }
            PointerEvent::Click { position } => {
                let snapped = self.scene.snapped_xy(position);
                if let Some(shape) = self.session.click(snapped) {
                    self.scene.add_shape(shape.clone());
                    if let Some(callback) = &mut self.on_shape {
                        callback(&shape);
                    }
                }
            }
        }
    }

    /// Start a viewport pan drag at a screen-space pointer position.
    pub fn begin_pan(&mut self, pointer: Point) {
        self.pan = Some(PanGesture::begin(self.scene.viewport().xy, pointer));
    }

    /// Visual translation for the drag in progress, applied by the host
    /// without touching scene state.
    pub fn pan_translation(&self, pointer: Point) -> Option<Vec2> {
        self.pan.map(|pan| pan.translation(pointer))
    }

    /// Finish the pan drag and commit the viewport position once.
    pub fn end_pan(&mut self, pointer: Point) {
        if let Some(pan) = self.pan.take() {
            self.scene.set_viewport_xy(pan.release(pointer));
        }
    }

    /// Record a host-layout measurement; applied after the debounce quiet
    /// period via [`MapEditor::poll_resize`].
    pub fn measure_surface(&mut self, measure: SurfaceMeasure, now: Instant) {
        self.resize_debounce.push(measure, now);
    }

    /// Apply the pending measurement if its quiet period has elapsed.
    pub fn poll_resize(&mut self, now: Instant) {
        if let Some(measure) = self.resize_debounce.poll(now) {
            self.scene.set_viewport_dimension(measure.dimension);
            self.scene.set_viewport_offset(measure.screen_offset);
        }
    }
}
