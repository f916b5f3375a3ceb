//! Projection of cached fragments into the host display representation.
//!
//! The sketch backend's native output is a list of path nodes with
//! kebab-case attributes. The host element tree wants camelCase attribute
//! names and absolute coordinates, so projection translates both.

use crate::cache::PlacedFragment;
use kurbo::Affine;
use std::collections::BTreeMap;

/// One element of the host display tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayElement {
    pub tag: String,
    /// Attributes keyed by camelCase name.
    pub attributes: BTreeMap<String, String>,
}

/// Translate a kebab-case attribute name to camelCase. Names without dashes
/// pass through unchanged.
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '-' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Project one placed fragment into host display elements.
///
/// Each node becomes a `path` element: geometry translated to the shape's
/// anchor and serialized as SVG path data, attributes copied across with
/// their names case-translated, and the owning shape's identity recorded for
/// downstream addressing.
pub fn project_fragment(placed: &PlacedFragment) -> Vec<DisplayElement> {
    let translate = Affine::translate(placed.anchor.to_vec2());
    placed
        .fragment
        .nodes
        .iter()
        .map(|node| {
            let mut path = node.path.clone();
            path.apply_affine(translate);

            let mut attributes = BTreeMap::new();
            for (name, value) in &node.attributes {
                attributes.insert(camel_case(name), value.clone());
            }
            attributes.insert("d".to_string(), path.to_svg());
            attributes.insert(camel_case("data-shape-id"), placed.shape_id.to_string());

            DisplayElement {
                tag: "path".to_string(),
                attributes,
            }
        })
        .collect()
}

/// Project the whole visible list, preserving paint order.
pub fn project_visible(visible: &[PlacedFragment]) -> Vec<DisplayElement> {
    visible.iter().flat_map(project_fragment).collect()
}
