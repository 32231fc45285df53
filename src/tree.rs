//! Arena-based in-memory element tree.
//!
//! [`ElementTree`] implements [`Document`] for hosts that lay elements out
//! themselves (and for tests). Each element carries a layout box in page
//! coordinates, a base (stylesheet) opacity and transform, an inline style
//! the engine writes to, and optional [`FlipAttributes`].
//!
//! Geometry queries behave like a browser's: `bounding_rect` applies the
//! element's own transform and every ancestor's, each around its resolved
//! `transform-origin`.
//!
//! ## Storage
//!
//! - **Generational Indices**: ElementId contains index + generation, so a
//!   stale id of a removed element never aliases a new one.
//! - **Dense Storage**: nodes live contiguously; a sparse map gives O(1)
//!   lookup from id to dense slot.
//! - **Swap-Remove**: O(1) removal without holes in dense storage.

use crate::document::{Document, Style, StyleProperty};
use crate::element::FlipAttributes;
use crate::geometry::Rect;
use crate::transform::Matrix4;
use crate::transform_origin::TransformOrigin;

/// Unique identifier for an element in the tree.
///
/// - `index`: position in the sparse array (reused after removal)
/// - `generation`: bumped whenever a slot is reused
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ElementId {
    index: u32,
    generation: u32,
}

impl ElementId {
    fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

/// Inline style written by the engine
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InlineStyle {
    pub transform: Option<String>,
    pub opacity: Option<f32>,
    pub transform_origin: Option<String>,
}

/// Entry in the sparse map, pointing to a dense array slot.
struct SparseEntry {
    dense_index: usize,
    generation: u32,
}

struct Node {
    id: ElementId,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    attributes: Option<FlipAttributes>,
    /// Untransformed border box in page coordinates
    layout: Rect,
    base_opacity: f32,
    base_transform: Option<String>,
    base_origin: TransformOrigin,
    inline: InlineStyle,
}

pub struct ElementTree {
    dense: Vec<Node>,
    sparse: Vec<Option<SparseEntry>>,
    free_indices: Vec<u32>,
    root: ElementId,
    viewport: (f32, f32),
}

impl ElementTree {
    /// Create a tree containing a single root element filling the viewport.
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        let mut tree = Self {
            dense: Vec::new(),
            sparse: Vec::new(),
            free_indices: Vec::new(),
            root: ElementId::new(0, 0),
            viewport: (viewport_width, viewport_height),
        };
        tree.root = tree.allocate(None, None);
        tree.set_layout(
            tree.root,
            Rect::new(0.0, 0.0, viewport_width, viewport_height),
        );
        tree
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
    }

    fn allocate(
        &mut self,
        parent: Option<ElementId>,
        attributes: Option<FlipAttributes>,
    ) -> ElementId {
        let (sparse_index, generation) = if let Some(idx) = self.free_indices.pop() {
            let old_gen = self.sparse[idx as usize]
                .as_ref()
                .map(|e| e.generation)
                .unwrap_or(0);
            (idx, old_gen.wrapping_add(1))
        } else {
            let idx = self.sparse.len() as u32;
            self.sparse.push(None);
            (idx, 0)
        };

        let id = ElementId::new(sparse_index, generation);
        let dense_index = self.dense.len();
        self.dense.push(Node {
            id,
            parent,
            children: Vec::new(),
            attributes,
            layout: Rect::default(),
            base_opacity: 1.0,
            base_transform: None,
            base_origin: TransformOrigin::CENTER,
            inline: InlineStyle::default(),
        });
        self.sparse[sparse_index as usize] = Some(SparseEntry {
            dense_index,
            generation,
        });
        id
    }

    /// Append a new child element with the given layout box.
    ///
    /// Returns `None` if `parent` is not in the tree.
    pub fn append(
        &mut self,
        parent: ElementId,
        attributes: Option<FlipAttributes>,
        layout: Rect,
    ) -> Option<ElementId> {
        let parent_dense = self.dense_index(parent)?;
        let id = self.allocate(Some(parent), attributes);
        self.dense[parent_dense].children.push(id);
        self.set_layout(id, layout);
        Some(id)
    }

    /// Remove an element and its whole subtree.
    pub fn remove(&mut self, id: ElementId) {
        let dense_index = match self.dense_index(id) {
            Some(idx) => idx,
            None => return,
        };

        if let Some(parent_dense) = self.dense[dense_index]
            .parent
            .and_then(|parent_id| self.dense_index(parent_id))
        {
            self.dense[parent_dense].children.retain(|&c| c != id);
        }

        let children = std::mem::take(&mut self.dense[dense_index].children);
        for child in children {
            self.remove(child);
        }

        // Children removal may have moved this node
        let dense_index = match self.dense_index(id) {
            Some(idx) => idx,
            None => return,
        };
        let last_dense_index = self.dense.len() - 1;
        self.dense.swap_remove(dense_index);

        if dense_index != last_dense_index {
            let moved = self.dense[dense_index].id;
            if let Some(ref mut entry) = self.sparse[moved.index as usize] {
                entry.dense_index = dense_index;
            }
        }

        // Keep the generation around for the next allocation of this slot
        self.sparse[id.index as usize] = Some(SparseEntry {
            dense_index: usize::MAX,
            generation: id.generation,
        });
        self.free_indices.push(id.index);
    }

    fn dense_index(&self, id: ElementId) -> Option<usize> {
        self.sparse
            .get(id.index as usize)
            .and_then(|e| e.as_ref())
            .filter(|e| e.generation == id.generation && e.dense_index != usize::MAX)
            .map(|e| e.dense_index)
    }

    fn node(&self, id: ElementId) -> Option<&Node> {
        self.dense_index(id).map(|idx| &self.dense[idx])
    }

    fn node_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        let idx = self.dense_index(id)?;
        Some(&mut self.dense[idx])
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn element_count(&self) -> usize {
        self.dense.len()
    }

    /// Move an element to a new layout box (what a re-layout would do).
    pub fn set_layout(&mut self, id: ElementId, layout: Rect) {
        if let Some(node) = self.node_mut(id) {
            node.layout = layout;
        }
    }

    pub fn layout(&self, id: ElementId) -> Option<Rect> {
        self.node(id).map(|n| n.layout)
    }

    pub fn set_attributes(&mut self, id: ElementId, attributes: Option<FlipAttributes>) {
        if let Some(node) = self.node_mut(id) {
            node.attributes = attributes;
        }
    }

    /// Stylesheet opacity, used when no inline opacity is set.
    pub fn set_base_opacity(&mut self, id: ElementId, opacity: f32) {
        if let Some(node) = self.node_mut(id) {
            node.base_opacity = opacity;
        }
    }

    /// Stylesheet transform, used when no inline transform is set.
    pub fn set_base_transform(&mut self, id: ElementId, transform: Option<String>) {
        if let Some(node) = self.node_mut(id) {
            node.base_transform = transform;
        }
    }

    pub fn set_base_origin(&mut self, id: ElementId, origin: TransformOrigin) {
        if let Some(node) = self.node_mut(id) {
            node.base_origin = origin;
        }
    }

    pub fn inline_style(&self, id: ElementId) -> Option<&InlineStyle> {
        self.node(id).map(|n| &n.inline)
    }

    fn effective_transform(node: &Node) -> Option<&str> {
        node.inline
            .transform
            .as_deref()
            .or(node.base_transform.as_deref())
            .filter(|t| !t.trim().is_empty() && t.trim() != "none")
    }

    fn effective_origin(node: &Node) -> TransformOrigin {
        node.inline
            .transform_origin
            .as_deref()
            .map(TransformOrigin::parse_lossy)
            .unwrap_or(node.base_origin)
    }

    /// Transform of a single node in page space, applied around its origin.
    fn local_matrix(node: &Node) -> Matrix4 {
        match Self::effective_transform(node) {
            Some(css) => {
                let (ox, oy) = Self::effective_origin(node).resolve(node.layout);
                Matrix4::product(&[
                    Matrix4::translate(ox, oy),
                    Matrix4::parse(css),
                    Matrix4::translate(-ox, -oy),
                ])
            }
            None => Matrix4::IDENTITY,
        }
    }

    /// Accumulated page-space transform of an element and its ancestors.
    pub fn screen_matrix(&self, id: ElementId) -> Matrix4 {
        let mut chain = Vec::new();
        let mut current = self.node(id);
        while let Some(node) = current {
            chain.push(node);
            current = node.parent.and_then(|p| self.node(p));
        }
        chain
            .iter()
            .rev()
            .fold(Matrix4::IDENTITY, |acc, node| {
                acc.multiply(&Self::local_matrix(node))
            })
    }
}

impl Document for ElementTree {
    fn children(&self, element: ElementId) -> Vec<ElementId> {
        self.node(element)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn attributes(&self, element: ElementId) -> Option<&FlipAttributes> {
        self.node(element).and_then(|n| n.attributes.as_ref())
    }

    fn bounding_rect(&self, element: ElementId) -> Rect {
        let Some(node) = self.node(element) else {
            return Rect::default();
        };
        let matrix = self.screen_matrix(element);
        let corners = node
            .layout
            .corners()
            .map(|(x, y)| matrix.transform_point(x, y));
        Rect::bounding(&corners)
    }

    fn computed_opacity(&self, element: ElementId) -> f32 {
        self.node(element)
            .map(|n| n.inline.opacity.unwrap_or(n.base_opacity))
            .unwrap_or(1.0)
    }

    fn computed_transform(&self, element: ElementId) -> String {
        match self.node(element).and_then(Self::effective_transform) {
            Some(css) => Matrix4::parse(css).to_compact_2d().to_string(),
            None => "none".to_string(),
        }
    }

    fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    fn contains(&self, element: ElementId) -> bool {
        self.dense_index(element).is_some()
    }

    fn set_style(&mut self, element: ElementId, style: Style) {
        let Some(node) = self.node_mut(element) else {
            return;
        };
        match style {
            Style::Transform(t) => node.inline.transform = Some(t),
            Style::Opacity(o) => node.inline.opacity = Some(o),
            Style::TransformOrigin(o) => node.inline.transform_origin = Some(o),
        }
    }

    fn clear_style(&mut self, element: ElementId, property: StyleProperty) {
        let Some(node) = self.node_mut(element) else {
            return;
        };
        match property {
            StyleProperty::Transform => node.inline.transform = None,
            StyleProperty::Opacity => node.inline.opacity = None,
            StyleProperty::TransformOrigin => node.inline.transform_origin = None,
        }
    }
}
