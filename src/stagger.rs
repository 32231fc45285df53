//! Staggered start times for groups of tweens.
//!
//! Participants sharing a stagger key start one after another, `interval_ms`
//! apart, in document order (or reversed). A group may also wait for one
//! specific participant of this pass to start or finish before its first
//! member begins. That is a single dependency edge per group, resolved after
//! all groups without such a rule have been placed.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::element::{DecisionData, FlipId};

/// Gap between consecutive members of a stagger group
pub const DEFAULT_STAGGER_INTERVAL_MS: f32 = 40.0;

/// Which moment of the referenced tween a dependent group waits for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DelayEdge {
    #[default]
    Start,
    Finish,
}

type ResolveFn = dyn Fn(&DecisionData, &DecisionData) -> Option<FlipId> + Send + Sync;

/// Picks, from the previous and current decision data, the participant a
/// group has to wait for.
#[derive(Clone)]
pub struct DelayUntil {
    pub edge: DelayEdge,
    resolve: Arc<ResolveFn>,
}

impl DelayUntil {
    /// Wait for the referenced participant's tween to start.
    pub fn start_of<F>(resolve: F) -> Self
    where
        F: Fn(&DecisionData, &DecisionData) -> Option<FlipId> + Send + Sync + 'static,
    {
        Self {
            edge: DelayEdge::Start,
            resolve: Arc::new(resolve),
        }
    }

    /// Wait for the referenced participant's tween to finish.
    pub fn finish_of<F>(resolve: F) -> Self
    where
        F: Fn(&DecisionData, &DecisionData) -> Option<FlipId> + Send + Sync + 'static,
    {
        Self {
            edge: DelayEdge::Finish,
            resolve: Arc::new(resolve),
        }
    }

    pub fn resolve(&self, previous: &DecisionData, current: &DecisionData) -> Option<FlipId> {
        (self.resolve)(previous, current)
    }
}

impl fmt::Debug for DelayUntil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelayUntil").field("edge", &self.edge).finish()
    }
}

#[derive(Clone, Debug)]
pub struct StaggerPolicy {
    pub reverse: bool,
    pub interval_ms: f32,
    pub delay_until: Option<DelayUntil>,
}

impl StaggerPolicy {
    pub fn new() -> Self {
        Self {
            reverse: false,
            interval_ms: DEFAULT_STAGGER_INTERVAL_MS,
            delay_until: None,
        }
    }

    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn interval(mut self, interval_ms: f32) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    pub fn delay_until(mut self, rule: DelayUntil) -> Self {
        self.delay_until = Some(rule);
        self
    }
}

impl Default for StaggerPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Policies per stagger key. Keys without a policy use the default one.
#[derive(Clone, Debug, Default)]
pub struct StaggerConfig {
    policies: HashMap<String, StaggerPolicy>,
}

impl StaggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, policy: StaggerPolicy) -> Self {
        self.insert(key, policy);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, policy: StaggerPolicy) {
        self.policies.insert(key.into(), policy);
    }

    pub fn get(&self, key: &str) -> Option<&StaggerPolicy> {
        self.policies.get(key)
    }
}

/// One tween waiting to be scheduled
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleEntry {
    pub flip_id: FlipId,
    pub stagger: Option<String>,
    /// Own delay on input, final delay on output
    pub delay_ms: f32,
    pub duration_ms: f32,
}

/// Shift the delays of staggered entries in place.
///
/// `entries` must be in document order. Entries without a stagger key keep
/// their delay.
pub fn schedule(
    entries: &mut [ScheduleEntry],
    config: &StaggerConfig,
    previous: &DecisionData,
    current: &DecisionData,
) {
    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
    for (idx, entry) in entries.iter().enumerate() {
        let Some(key) = entry.stagger.as_deref() else {
            continue;
        };
        match groups.iter_mut().find(|(k, _)| k == key) {
            Some((_, members)) => members.push(idx),
            None => groups.push((key.to_string(), vec![idx])),
        }
    }

    let default_policy = StaggerPolicy::default();
    let policy_for = |key: &str| config.get(key).unwrap_or(&default_policy);

    // Independent groups first, so dependents see their final delays
    let (dependent, independent): (Vec<_>, Vec<_>) = groups
        .into_iter()
        .partition(|(key, _)| policy_for(key).delay_until.is_some());

    for (key, members) in independent.into_iter().chain(dependent) {
        let policy = policy_for(&key);

        let base_ms = match &policy.delay_until {
            Some(rule) => match rule.resolve(previous, current) {
                Some(target) => match entries.iter().find(|e| e.flip_id == target) {
                    Some(entry) => match rule.edge {
                        DelayEdge::Start => entry.delay_ms,
                        DelayEdge::Finish => entry.delay_ms + entry.duration_ms,
                    },
                    None => {
                        log::debug!(
                            "Stagger group {:?} waits for {:?}, which is not animating",
                            key,
                            target
                        );
                        0.0
                    }
                },
                None => 0.0,
            },
            None => 0.0,
        };

        let ordered: Vec<usize> = if policy.reverse {
            members.into_iter().rev().collect()
        } else {
            members
        };

        for (i, idx) in ordered.into_iter().enumerate() {
            entries[idx].delay_ms += base_ms + i as f32 * policy.interval_ms;
        }
    }
}
