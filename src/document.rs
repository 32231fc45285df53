//! The seam between the engine and the host's element tree.
//!
//! The engine reads geometry and declarative attributes through [`Document`]
//! and writes nothing but inline `transform`, `opacity` and
//! `transform-origin`. [`crate::tree::ElementTree`] is the in-memory
//! implementation; hosts with their own tree implement the trait directly.

use crate::element::FlipAttributes;
use crate::geometry::Rect;
pub use crate::tree::ElementId;

/// An inline style property the engine is allowed to touch
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Transform,
    Opacity,
    TransformOrigin,
}

/// An inline style write
#[derive(Clone, Debug, PartialEq)]
pub enum Style {
    Transform(String),
    Opacity(f32),
    TransformOrigin(String),
}

pub trait Document {
    /// Direct children in document order
    fn children(&self, element: ElementId) -> Vec<ElementId>;

    fn attributes(&self, element: ElementId) -> Option<&FlipAttributes>;

    /// Border box in page coordinates, including the effect of transforms on
    /// the element and its ancestors
    fn bounding_rect(&self, element: ElementId) -> Rect;

    fn computed_opacity(&self, element: ElementId) -> f32;

    /// Computed `transform` as CSS text (`"none"` when there is none)
    fn computed_transform(&self, element: ElementId) -> String;

    /// Width and height of the visible area
    fn viewport(&self) -> (f32, f32);

    /// Whether the element is still attached to the live tree
    fn contains(&self, element: ElementId) -> bool;

    fn set_style(&mut self, element: ElementId, style: Style);

    fn clear_style(&mut self, element: ElementId, property: StyleProperty);

    /// All descendants of `root` in pre-order, excluding `root`
    fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(root).into_iter().rev().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).into_iter().rev());
        }
        out
    }

    /// Descendants of `root` that carry a flip id
    fn participants(&self, root: ElementId) -> Vec<ElementId> {
        self.descendants(root)
            .into_iter()
            .filter(|&id| self.attributes(id).is_some_and(FlipAttributes::is_participant))
            .collect()
    }

    /// Descendants of `root` that are compensation targets of any participant
    fn inverse_targets(&self, root: ElementId) -> Vec<ElementId> {
        self.descendants(root)
            .into_iter()
            .filter(|&id| {
                self.attributes(id)
                    .is_some_and(FlipAttributes::is_inverse_target)
            })
            .collect()
    }

    /// Descendants of `parent` compensating for the participant `flip_id`
    fn inverse_targets_of(&self, parent: ElementId, flip_id: &str) -> Vec<ElementId> {
        self.descendants(parent)
            .into_iter()
            .filter(|&id| {
                self.attributes(id)
                    .and_then(|attrs| attrs.inverse_flip_id.as_deref())
                    == Some(flip_id)
            })
            .collect()
    }
}
