//! Battle-map editor core.
//!
//! Platform-agnostic state and logic for an interactive 2D battle-map
//! editor: the grid/viewport coordinate engine, the shape model and its
//! canonicalizing factories, and the multi-click drawing state machine with
//! live preview. Rendering lives in `battlemap-render`.

pub mod drawing;
pub mod editor;
pub mod geom;
pub mod input;
pub mod scene;
pub mod shapes;

pub use drawing::{DrawingSession, ToolKind};
pub use editor::{MapEditor, SurfaceMeasure};
pub use input::{Debouncer, PanGesture, PointerEvent, RESIZE_DEBOUNCE};
pub use scene::{Scene, SceneEvent, Viewport};
pub use shapes::{Shape, ShapeId, ShapeStyle};
