//! Geometry snapshots of transition participants.

use indexmap::IndexMap;

use crate::document::{Document, ElementId, StyleProperty};
use crate::element::FlipId;
use crate::geometry::Rect;

/// Measured state of one participant at capture time
#[derive(Clone, Debug, PartialEq)]
pub struct FlipPosition {
    pub element: ElementId,
    pub rect: Rect,
    pub opacity: f32,
    /// Group label ("component id") the element carried when captured
    pub group: Option<String>,
}

impl FlipPosition {
    /// Whether geometry and opacity are exactly the same as `other`.
    pub fn unchanged_from(&self, other: &FlipPosition) -> bool {
        self.rect.same_box(&other.rect) && self.opacity == other.opacity
    }
}

/// Participant positions keyed by flip id, in document order.
///
/// Never mutated after capture.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    positions: IndexMap<FlipId, FlipPosition>,
}

impl Snapshot {
    pub fn get(&self, flip_id: &str) -> Option<&FlipPosition> {
        self.positions.get(flip_id)
    }

    pub fn contains(&self, flip_id: &str) -> bool {
        self.positions.contains_key(flip_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FlipId, &FlipPosition)> {
        self.positions.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &FlipId> {
        self.positions.keys()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CaptureOptions {
    /// Clear inline transforms of participants and compensation targets
    /// before measuring, so interrupted elements are measured where they
    /// really are rather than mid-tween
    pub strip_in_flight_transforms: bool,
    /// Whether any animation is currently running; stripping only happens
    /// when there is something to strip
    pub animations_in_progress: bool,
}

/// Measure every participant under `root`.
///
/// With `strip_in_flight_transforms` the cleared inline transforms are not
/// restored; the caller is expected to write fresh ones right away.
pub fn capture<D: Document + ?Sized>(
    document: &mut D,
    root: ElementId,
    options: CaptureOptions,
) -> Snapshot {
    let participants = document.participants(root);

    if options.strip_in_flight_transforms && options.animations_in_progress {
        let targets = document.inverse_targets(root);
        for &element in participants.iter().chain(targets.iter()) {
            document.clear_style(element, StyleProperty::Transform);
        }
    }

    let mut positions = IndexMap::with_capacity(participants.len());
    for element in participants {
        let Some(attrs) = document.attributes(element) else {
            continue;
        };
        let Some(flip_id) = attrs.flip_id.clone() else {
            continue;
        };
        let group = attrs.group.clone();

        let position = FlipPosition {
            element,
            rect: document.bounding_rect(element),
            opacity: document.computed_opacity(element),
            group,
        };
        if positions.insert(flip_id.clone(), position).is_some() {
            log::warn!("Duplicate flip id {:?}; the last element wins", flip_id);
        }
    }

    Snapshot { positions }
}
