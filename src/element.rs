//! Per-element capability records.
//!
//! Authoring code builds one [`FlipAttributes`] per tagged element. The engine
//! only reads these; which channels animate, which components a child wants
//! compensated, and which events it wants to hear about are all decided here,
//! up front, rather than looked up by attribute name during a transition.

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;

use crate::transform_origin::TransformOrigin;

/// Identifier of a participant, unique within one transition root.
pub type FlipId = String;

/// Host-provided value describing the state on each side of a transition,
/// passed to stagger rules and flip predicates.
pub type DecisionData = Option<String>;

bitflags! {
    /// Which visual channels of a participant animate
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Channels: u8 {
        const TRANSLATE = 0b001;
        const SCALE     = 0b010;
        const OPACITY   = 0b100;
    }
}

bitflags! {
    /// Which components of an ancestor's corrective transform a child wants
    /// cancelled out
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Compensate: u8 {
        const TRANSLATE = 0b01;
        const SCALE     = 0b10;
    }
}

bitflags! {
    /// Events an element subscribes to
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Hooks: u8 {
        /// First frame of movement, after any delay or stagger offset
        const START           = 0b0001;
        const COMPLETE        = 0b0010;
        const APPEAR          = 0b0100;
        /// Transition set up, before any delay elapses
        const START_IMMEDIATE = 0b1000;
    }
}

/// Restricts which transition runs an element reacts to.
///
/// A run is identified by its start and end group labels. Matching is exact
/// string equality and an element passes if *any* label in the filter equals
/// the run label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupFilter(Vec<String>);

impl GroupFilter {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(labels.into_iter().map(Into::into).collect())
    }

    /// Build from a comma-separated list, ignoring empty entries. Entries
    /// are kept verbatim, whitespace included.
    /// Returns `None` when nothing is left, meaning "no filter".
    pub fn parse(list: &str) -> Option<Self> {
        let labels: Vec<String> = list
            .split(',')
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        if labels.is_empty() {
            None
        } else {
            Some(Self(labels))
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.0
    }

    /// Whether `label` is one of the accepted labels. A missing label never
    /// matches.
    pub fn accepts(&self, label: Option<&str>) -> bool {
        match label {
            Some(label) => self.0.iter().any(|l| l == label),
            None => false,
        }
    }

    /// Whether an element with this filter takes part in the run going from
    /// `start` to `end`.
    pub fn accepts_run(&self, start: Option<&str>, end: Option<&str>) -> bool {
        self.accepts(start) || self.accepts(end)
    }
}

/// Predicate over `(previous, current)` decision data.
#[derive(Clone)]
pub struct DecisionPredicate(Arc<dyn Fn(&DecisionData, &DecisionData) -> bool + Send + Sync>);

impl DecisionPredicate {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&DecisionData, &DecisionData) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn test(&self, previous: &DecisionData, current: &DecisionData) -> bool {
        (self.0)(previous, current)
    }
}

impl fmt::Debug for DecisionPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DecisionPredicate")
    }
}

/// Declarative description of how one element takes part in transitions.
///
/// An element can be a participant (it has a `flip_id`), a compensation
/// target (it has an `inverse_flip_id`), or both.
///
/// # Example
/// ```ignore
/// let card = FlipAttributes::participant("card-1")
///     .group("card")
///     .stagger("card")
///     .hooks(Hooks::START | Hooks::COMPLETE);
///
/// let content = FlipAttributes::inverse("card-1").compensate(Compensate::SCALE);
/// ```
#[derive(Clone, Debug)]
pub struct FlipAttributes {
    pub flip_id: Option<FlipId>,
    pub inverse_flip_id: Option<FlipId>,
    /// Group label this element belongs to (its "component id")
    pub group: Option<String>,
    pub filter: Option<GroupFilter>,
    pub channels: Channels,
    pub compensate: Compensate,
    pub hooks: Hooks,
    pub duration_ms: Option<f32>,
    pub ease: Option<String>,
    pub delay_ms: Option<f32>,
    pub transform_origin: Option<TransformOrigin>,
    pub stagger: Option<String>,
    pub should_flip: Option<DecisionPredicate>,
    pub should_invert: Option<DecisionPredicate>,
}

impl FlipAttributes {
    fn empty() -> Self {
        Self {
            flip_id: None,
            inverse_flip_id: None,
            group: None,
            filter: None,
            channels: Channels::empty(),
            compensate: Compensate::empty(),
            hooks: Hooks::empty(),
            duration_ms: None,
            ease: None,
            delay_ms: None,
            transform_origin: None,
            stagger: None,
            should_flip: None,
            should_invert: None,
        }
    }

    /// A participant animating translation and scale.
    pub fn participant(flip_id: impl Into<FlipId>) -> Self {
        Self {
            flip_id: Some(flip_id.into()),
            channels: Channels::TRANSLATE | Channels::SCALE,
            ..Self::empty()
        }
    }

    /// A compensation target for the participant `parent_flip_id`,
    /// cancelling both translation and scale.
    pub fn inverse(parent_flip_id: impl Into<FlipId>) -> Self {
        Self {
            inverse_flip_id: Some(parent_flip_id.into()),
            compensate: Compensate::TRANSLATE | Compensate::SCALE,
            ..Self::empty()
        }
    }

    pub fn is_participant(&self) -> bool {
        self.flip_id.is_some()
    }

    pub fn is_inverse_target(&self) -> bool {
        self.inverse_flip_id.is_some()
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn filter(mut self, filter: GroupFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn channels(mut self, channels: Channels) -> Self {
        self.channels = channels;
        self
    }

    pub fn compensate(mut self, compensate: Compensate) -> Self {
        self.compensate = compensate;
        self
    }

    pub fn hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn ease(mut self, ease: impl Into<String>) -> Self {
        self.ease = Some(ease.into());
        self
    }

    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    pub fn transform_origin(mut self, origin: TransformOrigin) -> Self {
        self.transform_origin = Some(origin);
        self
    }

    pub fn stagger(mut self, key: impl Into<String>) -> Self {
        self.stagger = Some(key.into());
        self
    }

    pub fn should_flip<F>(mut self, f: F) -> Self
    where
        F: Fn(&DecisionData, &DecisionData) -> bool + Send + Sync + 'static,
    {
        self.should_flip = Some(DecisionPredicate::new(f));
        self
    }

    pub fn should_invert<F>(mut self, f: F) -> Self
    where
        F: Fn(&DecisionData, &DecisionData) -> bool + Send + Sync + 'static,
    {
        self.should_invert = Some(DecisionPredicate::new(f));
        self
    }

    /// Whether this element reacts to the run from `start` to `end`.
    /// Elements without a filter react to every run.
    pub fn accepts_run(&self, start: Option<&str>, end: Option<&str>) -> bool {
        self.filter
            .as_ref()
            .map_or(true, |filter| filter.accepts_run(start, end))
    }
}
