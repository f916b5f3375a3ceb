//! Identity-keyed fragment cache over the scene's shape list.

use crate::sketch::{RenderError, SketchFragment, SketchRenderer, primitive_for};
use battlemap_core::scene::{Scene, SceneEvent};
use battlemap_core::shapes::ShapeId;
use kurbo::Point;
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

/// A cached fragment positioned at its shape's anchor, in paint order.
#[derive(Debug, Clone)]
pub struct PlacedFragment {
    /// Identity of the shape the fragment renders, for downstream
    /// addressing.
    pub shape_id: ShapeId,
    /// Translation applied to the fragment's anchor-local geometry.
    pub anchor: Point,
    pub fragment: Rc<SketchFragment>,
}

/// Caches one rendered fragment per shape identity and maintains the visible
/// list in paint order.
///
/// Shapes are immutable once added, so entries are never invalidated: a
/// cache hit is always correct, and the cost of a scene mutation is
/// re-deriving the visible list, not re-rendering. The cache learns about
/// mutations through a shared dirty flag set by the scene listener; the host
/// calls [`FragmentCache::flush`] after each event turn.
pub struct FragmentCache<R> {
    renderer: R,
    fragments: HashMap<ShapeId, Rc<SketchFragment>>,
    visible: Vec<PlacedFragment>,
    dirty: Rc<Cell<bool>>,
}

impl<R: SketchRenderer> FragmentCache<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            fragments: HashMap::new(),
            visible: Vec::new(),
            // Dirty from the start so the first flush builds the list.
            dirty: Rc::new(Cell::new(true)),
        }
    }

    /// Listener to register with [`Scene::subscribe`]. Captures only the
    /// dirty flag, so the scene can notify while the cache is elsewhere.
    pub fn listener(&self) -> impl FnMut(&SceneEvent) + 'static {
        let dirty = self.dirty.clone();
        move |event| {
            if *event == SceneEvent::ShapesChanged {
                dirty.set(true);
            }
        }
    }

    /// Rebuild the visible list if the shape list changed since the last
    /// flush. Returns whether a rebuild happened.
    pub fn flush(&mut self, scene: &Scene) -> Result<bool, RenderError> {
        if !self.dirty.get() {
            return Ok(false);
        }
        self.rebuild(scene)?;
        self.dirty.set(false);
        Ok(true)
    }

    fn rebuild(&mut self, scene: &Scene) -> Result<(), RenderError> {
        self.visible.clear();
        for shape in scene.shapes() {
            let id = shape.id();
            if !self.fragments.contains_key(&id) {
                log::debug!("render cache: miss for shape {id}");
                let fragment = self.renderer.render(&primitive_for(shape), shape.style())?;
                self.fragments.insert(id, Rc::new(fragment));
            }
            self.visible.push(PlacedFragment {
                shape_id: id,
                anchor: shape.anchor(),
                fragment: Rc::clone(&self.fragments[&id]),
            });
        }
        Ok(())
    }

    /// Visible fragments in paint order, as of the last flush.
    pub fn visible(&self) -> &[PlacedFragment] {
        &self.visible
    }

    /// Number of distinct shape identities rendered so far.
    pub fn cached_count(&self) -> usize {
        self.fragments.len()
    }
}
