//! Battle-map render layer.
//!
//! Projects the scene's shapes into displayable vector output: each shape is
//! rendered once through the external sketch backend, cached by its
//! immutable identity, and re-assembled into the visible display list on
//! every scene mutation.

mod cache;
mod project;
mod sketch;

pub use cache::{FragmentCache, PlacedFragment};
pub use project::{DisplayElement, camel_case, project_fragment, project_visible};
pub use sketch::{
    NodeRole, PlainSketcher, RenderError, SketchFragment, SketchNode, SketchPrimitive,
    SketchRenderer, color_hex, primitive_for,
};
