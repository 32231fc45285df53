pub mod animation;
pub mod document;
pub mod element;
pub mod error;
pub mod geometry;
pub mod invert;
pub mod orchestrator;
pub mod registry;
pub mod snapshot;
pub mod stagger;
pub mod transform;
pub mod transform_origin;
pub mod tree;

use std::time::Instant;

use animation::{EasingRegistry, TimingFunction};
use document::{Document, ElementId};
use element::DecisionData;
use orchestrator::{FlipHandler, ReconcileOptions};
use registry::AnimationRegistry;
use snapshot::{capture, CaptureOptions, Snapshot};
use stagger::{StaggerConfig, StaggerPolicy};

pub mod prelude {
    pub use crate::animation::{EasingRegistry, SpringConfig, TimingFunction, FALLBACK_EASE};
    pub use crate::document::{Document, ElementId, Style, StyleProperty};
    pub use crate::element::{
        Channels, Compensate, DecisionData, FlipAttributes, FlipId, GroupFilter, Hooks,
    };
    pub use crate::error::ParseError;
    pub use crate::geometry::Rect;
    pub use crate::orchestrator::{FlipEvent, FlipHandler};
    pub use crate::stagger::{DelayEdge, DelayUntil, StaggerConfig, StaggerPolicy};
    pub use crate::transform::{Matrix2d, Matrix4};
    pub use crate::transform_origin::TransformOrigin;
    pub use crate::tree::ElementTree;
    pub use crate::{Flipper, FlipperConfig};
}

pub struct FlipperConfig {
    /// Default duration in milliseconds
    pub duration_ms: f32,
    /// Default easing name, looked up in `easings`
    pub ease: String,
    /// Write `transform-origin: 0 0` to animated elements that do not set
    /// their own origin
    pub apply_transform_origin: bool,
    pub stagger: StaggerConfig,
    pub easings: EasingRegistry,
}

impl Default for FlipperConfig {
    fn default() -> Self {
        Self {
            duration_ms: 250.0,
            ease: "easeOutExpo".to_string(),
            apply_transform_origin: true,
            stagger: StaggerConfig::default(),
            easings: EasingRegistry::new(),
        }
    }
}

/// Animates layout changes of the participants under one root element.
///
/// The host calls [`Flipper::before_update`] right before it changes the
/// tree, [`Flipper::after_update`] right after, and [`Flipper::tick`] once per
/// frame while [`Flipper::is_animating`] is true.
///
/// # Example
/// ```ignore
/// let mut flipper = Flipper::new(tree.root()).duration(400.0).ease("easeOutBack");
///
/// flipper.before_update(&mut tree, "grid", None);
/// // ... rearrange the tree ...
/// flipper.after_update(&mut tree, &mut |event: FlipEvent| log::info!("{:?}", event), Instant::now());
///
/// while flipper.is_animating() {
///     flipper.tick(&mut tree, Instant::now(), &mut |_: FlipEvent| {});
/// }
/// ```
pub struct Flipper {
    config: FlipperConfig,
    root: ElementId,
    flip_key: Option<String>,
    previous: Option<Snapshot>,
    previous_data: DecisionData,
    current_data: DecisionData,
    registry: AnimationRegistry,
}

impl Flipper {
    pub fn new(root: ElementId) -> Self {
        Self::with_config(root, FlipperConfig::default())
    }

    pub fn with_config(root: ElementId, config: FlipperConfig) -> Self {
        Self {
            config,
            root,
            flip_key: None,
            previous: None,
            previous_data: None,
            current_data: None,
            registry: AnimationRegistry::new(),
        }
    }

    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.config.duration_ms = duration_ms;
        self
    }

    pub fn ease(mut self, ease: impl Into<String>) -> Self {
        self.config.ease = ease.into();
        self
    }

    pub fn apply_transform_origin(mut self, apply: bool) -> Self {
        self.config.apply_transform_origin = apply;
        self
    }

    pub fn stagger(mut self, key: impl Into<String>, policy: StaggerPolicy) -> Self {
        self.config.stagger.insert(key, policy);
        self
    }

    /// Register a named easing curve on this flipper only.
    pub fn easing(mut self, name: impl Into<String>, curve: TimingFunction) -> Self {
        self.config.easings.register(name, curve);
        self
    }

    /// Key of the current layout. A pass only happens when the key passed to
    /// [`Flipper::before_update`] differs from this one.
    pub fn flip_key(mut self, key: impl Into<String>) -> Self {
        self.flip_key = Some(key.into());
        self
    }

    /// Replace the stagger policies used from the next pass on. Running
    /// transitions keep their offsets.
    pub fn set_stagger(&mut self, stagger: StaggerConfig) {
        self.config.stagger = stagger;
    }

    pub fn config(&self) -> &FlipperConfig {
        &self.config
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn registry(&self) -> &AnimationRegistry {
        &self.registry
    }

    pub fn is_animating(&self) -> bool {
        !self.registry.is_empty()
    }

    /// Record positions before the host changes the tree.
    ///
    /// Returns false, and takes no snapshot, when `flip_key` is unchanged.
    /// `decision_data` is kept either way and becomes the previous data of
    /// the next pass.
    pub fn before_update<D: Document + ?Sized>(
        &mut self,
        document: &mut D,
        flip_key: &str,
        decision_data: DecisionData,
    ) -> bool {
        if self.flip_key.as_deref() == Some(flip_key) {
            self.previous = None;
            self.current_data = decision_data;
            return false;
        }

        let snapshot = capture(
            document,
            self.root,
            CaptureOptions {
                strip_in_flight_transforms: false,
                animations_in_progress: self.is_animating(),
            },
        );
        log::debug!(
            "Flip key {:?} -> {:?}: captured {} participants",
            self.flip_key,
            flip_key,
            snapshot.len()
        );

        self.flip_key = Some(flip_key.to_string());
        self.previous_data = std::mem::replace(&mut self.current_data, decision_data);
        self.previous = Some(snapshot);
        true
    }

    /// Measure the changed tree and start transitions. Does nothing unless
    /// [`Flipper::before_update`] recorded a pass.
    ///
    /// Returns the number of transitions started.
    pub fn after_update<D, H>(&mut self, document: &mut D, handler: &mut H, now: Instant) -> usize
    where
        D: Document + ?Sized,
        H: FlipHandler + ?Sized,
    {
        let Some(previous) = self.previous.take() else {
            return 0;
        };

        let current = capture(
            document,
            self.root,
            CaptureOptions {
                strip_in_flight_transforms: true,
                animations_in_progress: self.is_animating(),
            },
        );

        let options = ReconcileOptions {
            duration_ms: self.config.duration_ms,
            ease: &self.config.ease,
            apply_transform_origin: self.config.apply_transform_origin,
            easings: &self.config.easings,
            stagger: Some(&self.config.stagger),
            previous_data: &self.previous_data,
            current_data: &self.current_data,
        };
        orchestrator::reconcile(
            document,
            &previous,
            &current,
            &mut self.registry,
            &options,
            handler,
            now,
        )
    }

    /// Advance running transitions. Returns how many are still running.
    pub fn tick<D, H>(&mut self, document: &mut D, now: Instant, handler: &mut H) -> usize
    where
        D: Document + ?Sized,
        H: FlipHandler + ?Sized,
    {
        orchestrator::step_animations(document, &mut self.registry, now, handler)
    }
}
