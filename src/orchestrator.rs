//! Turning a pair of snapshots into running transitions.
//!
//! [`reconcile`] decides, for every participant of the current snapshot,
//! whether it animates, applies its starting styles right away and registers
//! a tween. [`step_animations`] is the per-frame half: it advances every
//! registered tween and writes the results back to the document.

use std::time::Instant;

use crate::animation::{EasingRegistry, FlipValues, Transition, Tween, TweenConfig, TweenFrame};
use crate::document::{Document, ElementId, Style};
use crate::element::{Channels, DecisionData, FlipAttributes, FlipId, Hooks};
use crate::invert::{propagate_inverse, GroupRuns};
use crate::registry::{AnimationRegistry, AnimationToken};
use crate::snapshot::{FlipPosition, Snapshot};
use crate::stagger::{self, ScheduleEntry, StaggerConfig};
use crate::transform::{Matrix4, SCALE_EPSILON};
use crate::transform_origin::TransformOrigin;

/// Lifecycle notifications, delivered only to elements subscribed through
/// their [`Hooks`].
#[derive(Clone, Debug, PartialEq)]
pub enum FlipEvent {
    /// A participant present only in the current snapshot. `index` counts
    /// the subscribed newcomers of one pass.
    Appear {
        flip_id: FlipId,
        element: ElementId,
        index: usize,
    },
    /// A transition was set up. Sent during [`reconcile`], before any delay
    /// or stagger offset elapses.
    StartImmediate {
        flip_id: FlipId,
        element: ElementId,
        /// Group label the element had before the pass
        group: Option<String>,
    },
    /// The element began to move: the first frame past its delay.
    Start {
        flip_id: FlipId,
        element: ElementId,
        group: Option<String>,
    },
    /// A transition finished or was cut short by a newer one.
    Complete {
        flip_id: FlipId,
        element: ElementId,
        group: Option<String>,
    },
}

impl FlipEvent {
    pub fn flip_id(&self) -> &str {
        match self {
            FlipEvent::Appear { flip_id, .. }
            | FlipEvent::StartImmediate { flip_id, .. }
            | FlipEvent::Start { flip_id, .. }
            | FlipEvent::Complete { flip_id, .. } => flip_id,
        }
    }

    pub fn element(&self) -> ElementId {
        match self {
            FlipEvent::Appear { element, .. }
            | FlipEvent::StartImmediate { element, .. }
            | FlipEvent::Start { element, .. }
            | FlipEvent::Complete { element, .. } => *element,
        }
    }
}

/// Receiver of [`FlipEvent`]s.
pub trait FlipHandler {
    fn handle(&mut self, event: FlipEvent);
}

impl<F> FlipHandler for F
where
    F: FnMut(FlipEvent),
{
    fn handle(&mut self, event: FlipEvent) {
        self(event)
    }
}

/// Settings of one reconciliation pass.
#[derive(Clone, Copy, Debug)]
pub struct ReconcileOptions<'a> {
    /// Duration for participants without their own
    pub duration_ms: f32,
    /// Easing name for participants without their own
    pub ease: &'a str,
    /// Write `transform-origin: 0 0` to participants without an explicit
    /// origin
    pub apply_transform_origin: bool,
    pub easings: &'a EasingRegistry,
    pub stagger: Option<&'a StaggerConfig>,
    pub previous_data: &'a DecisionData,
    pub current_data: &'a DecisionData,
}

fn begin_moving<H: FlipHandler + ?Sized>(handler: &mut H, token: &mut AnimationToken) {
    if token.moving {
        return;
    }
    token.moving = true;
    if token.hooks.contains(Hooks::START) {
        handler.handle(FlipEvent::Start {
            flip_id: token.flip_id.clone(),
            element: token.element,
            group: token.start_group.clone(),
        });
    }
}

fn notify_complete<H: FlipHandler + ?Sized>(handler: &mut H, token: AnimationToken) {
    if token.notifies_complete() {
        handler.handle(FlipEvent::Complete {
            flip_id: token.flip_id,
            element: token.element,
            group: token.start_group,
        });
    }
}

/// Write the explicit origin, or `0 0` when normalization is on.
fn normalize_origin<D: Document + ?Sized>(
    document: &mut D,
    element: ElementId,
    explicit: Option<TransformOrigin>,
    apply_default: bool,
) {
    let origin = match explicit {
        Some(origin) => origin,
        None if apply_default => TransformOrigin::ZERO,
        None => return,
    };
    document.set_style(element, Style::TransformOrigin(origin.to_string()));
}

/// Corrective matrix taking an element from `current` back to `previous`,
/// on top of the transform it already has.
pub fn corrective_matrix(
    current_transform: &Matrix4,
    previous: &FlipPosition,
    current: &FlipPosition,
    channels: Channels,
) -> Matrix4 {
    let mut factors = vec![*current_transform];
    if channels.contains(Channels::TRANSLATE) {
        factors.push(Matrix4::translate_x(previous.rect.left() - current.rect.left()));
        factors.push(Matrix4::translate_y(previous.rect.top() - current.rect.top()));
    }
    if channels.contains(Channels::SCALE) {
        factors.push(Matrix4::scale_x(
            previous.rect.width / current.rect.width.max(SCALE_EPSILON),
        ));
        factors.push(Matrix4::scale_y(
            previous.rect.height / current.rect.height.max(SCALE_EPSILON),
        ));
    }
    Matrix4::product(&factors)
}

fn apply_values<D: Document + ?Sized>(
    document: &mut D,
    token: &AnimationToken,
    values: &FlipValues,
) {
    document.set_style(token.element, Style::Transform(values.matrix.to_string()));
    if token.channels.contains(Channels::OPACITY) {
        document.set_style(token.element, Style::Opacity(values.opacity));
    }
    if token.compensate_children {
        propagate_inverse(
            document,
            token.element,
            &token.flip_id,
            &values.matrix,
            GroupRuns::new(token.start_group.as_deref(), token.end_group.as_deref()),
        );
    }
}

/// Why a matched participant did not animate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Skip {
    OffViewport,
    Unchanged,
    Declined,
    Filtered,
}

fn skip_reason(
    attrs: &FlipAttributes,
    previous: &FlipPosition,
    current: &FlipPosition,
    viewport: (f32, f32),
    options: &ReconcileOptions<'_>,
) -> Option<Skip> {
    let (vw, vh) = viewport;
    if !previous.rect.intersects_viewport(vw, vh) && !current.rect.intersects_viewport(vw, vh) {
        return Some(Skip::OffViewport);
    }
    if previous.unchanged_from(current) {
        return Some(Skip::Unchanged);
    }
    if let Some(predicate) = &attrs.should_flip {
        if !predicate.test(options.previous_data, options.current_data) {
            return Some(Skip::Declined);
        }
    }
    if !attrs.accepts_run(previous.group.as_deref(), attrs.group.as_deref()) {
        return Some(Skip::Filtered);
    }
    None
}

/// Start transitions for every participant that moved between `previous`
/// and `current`.
///
/// From-styles are written before this returns; tweens only advance in
/// [`step_animations`]. Returns the number of transitions started.
pub fn reconcile<D, H>(
    document: &mut D,
    previous: &Snapshot,
    current: &Snapshot,
    registry: &mut AnimationRegistry,
    options: &ReconcileOptions<'_>,
    handler: &mut H,
    now: Instant,
) -> usize
where
    D: Document + ?Sized,
    H: FlipHandler + ?Sized,
{
    let viewport = document.viewport();

    let mut appear_index = 0;
    for (flip_id, position) in current.iter() {
        if previous.contains(flip_id) {
            continue;
        }
        let subscribed = document
            .attributes(position.element)
            .is_some_and(|attrs| attrs.hooks.contains(Hooks::APPEAR));
        if subscribed {
            handler.handle(FlipEvent::Appear {
                flip_id: flip_id.clone(),
                element: position.element,
                index: appear_index,
            });
            appear_index += 1;
        }
    }

    let mut started: Vec<AnimationToken> = Vec::new();
    let mut schedule: Vec<ScheduleEntry> = Vec::new();

    for (flip_id, curr) in current.iter() {
        let Some(prev) = previous.get(flip_id) else {
            continue;
        };
        let element = curr.element;
        let Some(attrs) = document.attributes(element).cloned() else {
            continue;
        };

        if let Some(reason) = skip_reason(&attrs, prev, curr, viewport, options) {
            log::trace!("Not animating {:?}: {:?}", flip_id, reason);
            continue;
        }

        if let Some(old) = registry.cancel(flip_id) {
            notify_complete(handler, old);
        }

        let current_transform = Matrix4::parse(&document.computed_transform(element));
        let from_matrix =
            corrective_matrix(&current_transform, prev, curr, attrs.channels).to_compact_2d();
        let to_matrix = current_transform.to_compact_2d();

        let (from_opacity, to_opacity) = if attrs.channels.contains(Channels::OPACITY) {
            (prev.opacity, curr.opacity)
        } else {
            (curr.opacity, curr.opacity)
        };

        normalize_origin(
            document,
            element,
            attrs.transform_origin,
            options.apply_transform_origin,
        );
        for child in document.inverse_targets_of(element, flip_id) {
            let explicit = document
                .attributes(child)
                .and_then(|child_attrs| child_attrs.transform_origin);
            normalize_origin(document, child, explicit, options.apply_transform_origin);
        }

        let compensate_children = attrs
            .should_invert
            .as_ref()
            .map_or(true, |p| p.test(options.previous_data, options.current_data));

        let duration_ms = attrs.duration_ms.unwrap_or(options.duration_ms);
        let delay_ms = attrs.delay_ms.unwrap_or(0.0);
        let timing = options
            .easings
            .resolve(attrs.ease.as_deref().unwrap_or(options.ease));

        let from = FlipValues::new(from_matrix, from_opacity);
        let tween = Tween::start(
            TweenConfig {
                from,
                to: FlipValues::new(to_matrix, to_opacity),
                transition: Transition::new(duration_ms, timing).delay(delay_ms),
            },
            now,
        );

        let token = AnimationToken {
            flip_id: flip_id.clone(),
            element,
            tween,
            start_group: prev.group.clone(),
            end_group: attrs.group.clone(),
            channels: attrs.channels,
            hooks: attrs.hooks,
            compensate_children,
            moving: false,
        };

        apply_values(document, &token, &from);

        log::debug!(
            "Starting transition of {:?}: {} over {}ms",
            flip_id,
            from_matrix,
            duration_ms
        );
        if attrs.hooks.contains(Hooks::START_IMMEDIATE) {
            handler.handle(FlipEvent::StartImmediate {
                flip_id: flip_id.clone(),
                element,
                group: token.start_group.clone(),
            });
        }

        schedule.push(ScheduleEntry {
            flip_id: flip_id.clone(),
            stagger: attrs.stagger.clone(),
            delay_ms,
            duration_ms,
        });
        started.push(token);
    }

    let default_stagger = StaggerConfig::default();
    stagger::schedule(
        &mut schedule,
        options.stagger.unwrap_or(&default_stagger),
        options.previous_data,
        options.current_data,
    );

    let count = started.len();
    for (mut token, entry) in started.into_iter().zip(schedule) {
        token.tween.set_delay(entry.delay_ms);
        registry.insert(token);
    }
    count
}

/// Advance every running transition to `now`.
///
/// Finished transitions deliver their completion and leave the registry.
/// Transitions whose element left the document are dropped silently.
/// Returns the number still running.
pub fn step_animations<D, H>(
    document: &mut D,
    registry: &mut AnimationRegistry,
    now: Instant,
    handler: &mut H,
) -> usize
where
    D: Document + ?Sized,
    H: FlipHandler + ?Sized,
{
    for flip_id in registry.ids() {
        let Some(token) = registry.get_mut(&flip_id) else {
            continue;
        };
        let attached = document.contains(token.element);

        match token.tween.advance(now, attached) {
            TweenFrame::Delayed => {}
            TweenFrame::Step(values) => {
                begin_moving(handler, token);
                apply_values(document, token, &values);
            }
            TweenFrame::Finished(values) => {
                begin_moving(handler, token);
                apply_values(document, token, &values);
                if let Some(token) = registry.remove(&flip_id) {
                    notify_complete(handler, token);
                }
            }
            TweenFrame::Stopped => {
                log::debug!("Dropping transition of {:?}: element detached", flip_id);
                registry.remove(&flip_id);
            }
        }
    }
    registry.len()
}
