//! Inverse-transform propagation.
//!
//! When a participant is scaled or translated by its corrective transform,
//! descendants tagged with its flip id as `inverse_flip_id` get the opposite
//! transform so they keep their apparent size and position. Each child only
//! gets the components it asked for in its [`Compensate`] flags.

use crate::document::{Document, ElementId, Style, StyleProperty};
use crate::element::Compensate;
use crate::transform::Matrix2d;

/// Start and end group labels of the transition run in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GroupRuns<'a> {
    pub start: Option<&'a str>,
    pub end: Option<&'a str>,
}

impl<'a> GroupRuns<'a> {
    pub fn new(start: Option<&'a str>, end: Option<&'a str>) -> Self {
        Self { start, end }
    }
}

/// Inline transform cancelling the requested components of `parent`.
///
/// Returns `None` when nothing was requested. Zero parent scales are not
/// special-cased and produce non-finite values.
pub fn inverse_transform(parent: &Matrix2d, compensate: Compensate) -> Option<String> {
    let scale_x = parent.scale_x();
    let scale_y = parent.scale_y();

    let mut parts = Vec::with_capacity(2);
    if compensate.contains(Compensate::TRANSLATE) {
        parts.push(format!(
            "translate({}px, {}px)",
            -parent.translate_x() / scale_x,
            -parent.translate_y() / scale_y
        ));
    }
    if compensate.contains(Compensate::SCALE) {
        parts.push(format!("scale({}, {})", 1.0 / scale_x, 1.0 / scale_y));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// Apply the inverse of `matrix` to the compensation targets of `flip_id`
/// inside `parent`. Targets whose group filter rejects both labels of `runs`
/// are left alone.
///
/// Returns the number of targets written.
pub fn propagate_inverse<D: Document + ?Sized>(
    document: &mut D,
    parent: ElementId,
    flip_id: &str,
    matrix: &Matrix2d,
    runs: GroupRuns<'_>,
) -> usize {
    let mut written = 0;
    for child in document.inverse_targets_of(parent, flip_id) {
        let Some(attrs) = document.attributes(child) else {
            continue;
        };
        if !attrs.accepts_run(runs.start, runs.end) {
            log::trace!("Skipping compensation of {:?}: outside run {:?}", child, runs);
            continue;
        }

        match inverse_transform(matrix, attrs.compensate) {
            Some(transform) => document.set_style(child, Style::Transform(transform)),
            None => document.clear_style(child, StyleProperty::Transform),
        }
        written += 1;
    }
    written
}
