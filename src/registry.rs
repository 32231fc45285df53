//! Bookkeeping for running transitions.

use indexmap::IndexMap;

use crate::animation::Tween;
use crate::document::ElementId;
use crate::element::{Channels, FlipId, Hooks};

/// A running transition of one participant.
pub struct AnimationToken {
    pub flip_id: FlipId,
    pub element: ElementId,
    pub tween: Tween,
    /// Group label from the previous snapshot
    pub start_group: Option<String>,
    /// Group label the element carries now
    pub end_group: Option<String>,
    pub channels: Channels,
    /// Subscriptions captured when the transition started
    pub hooks: Hooks,
    /// Whether compensation targets follow this transition
    pub compensate_children: bool,
    /// Set on the first frame past the delay
    pub moving: bool,
}

impl AnimationToken {
    pub fn notifies_complete(&self) -> bool {
        self.hooks.contains(Hooks::COMPLETE)
    }
}

/// Running transitions keyed by flip id. At most one per id.
///
/// Iteration follows registration order, so transitions finishing on the
/// same frame report in the order they were started.
#[derive(Default)]
pub struct AnimationRegistry {
    tokens: IndexMap<FlipId, AnimationToken>,
}

impl AnimationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token, returning any token it displaced. Callers cancel
    /// the old token first; a displaced token here is stopped and dropped.
    pub fn insert(&mut self, token: AnimationToken) -> Option<AnimationToken> {
        let displaced = self.tokens.shift_remove(&token.flip_id);
        self.tokens.insert(token.flip_id.clone(), token);
        displaced.map(|mut old| {
            log::debug!("Replacing running transition of {:?}", old.flip_id);
            old.tween.stop();
            old
        })
    }

    /// Stop the transition of `flip_id` and take it out of the registry.
    ///
    /// The caller delivers the completion event of the returned token.
    pub fn cancel(&mut self, flip_id: &str) -> Option<AnimationToken> {
        let mut token = self.tokens.shift_remove(flip_id)?;
        log::debug!("Cancelling transition of {:?}", flip_id);
        token.tween.stop();
        Some(token)
    }

    /// Drop a token without stopping it, e.g. after it finished.
    pub fn remove(&mut self, flip_id: &str) -> Option<AnimationToken> {
        self.tokens.shift_remove(flip_id)
    }

    pub fn get(&self, flip_id: &str) -> Option<&AnimationToken> {
        self.tokens.get(flip_id)
    }

    pub fn get_mut(&mut self, flip_id: &str) -> Option<&mut AnimationToken> {
        self.tokens.get_mut(flip_id)
    }

    pub fn contains(&self, flip_id: &str) -> bool {
        self.tokens.contains_key(flip_id)
    }

    pub fn ids(&self) -> Vec<FlipId> {
        self.tokens.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
