//! Time-driven interpolation of [`FlipValues`].
//!
//! A tween does not own a clock. The host frame loop calls
//! [`Tween::advance`] with the current instant and applies whatever the tween
//! reports; between calls the tween does nothing.

use std::time::Instant;

use super::{Animatable, FlipValues, Transition};
use crate::transform::Matrix2d;

pub struct TweenConfig {
    pub from: FlipValues,
    pub to: FlipValues,
    pub transition: Transition,
}

/// What a tween produced for one frame
#[derive(Clone, Debug, PartialEq)]
pub enum TweenFrame {
    /// Still waiting out the delay; nothing to apply
    Delayed,
    /// Intermediate values
    Step(FlipValues),
    /// Final values. Produced exactly once, when the timeline ends naturally
    Finished(FlipValues),
    /// The tween is no longer running (stopped, detached, or already
    /// finished)
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TweenState {
    Running,
    Finished,
    Stopped,
}

pub struct Tween {
    from: FlipValues,
    to: FlipValues,
    transition: Transition,
    started_at: Instant,
    state: TweenState,
}

impl Tween {
    pub fn start(config: TweenConfig, now: Instant) -> Self {
        Self {
            from: config.from,
            to: config.to,
            transition: config.transition,
            started_at: now,
            state: TweenState::Running,
        }
    }

    pub fn from_values(&self) -> &FlipValues {
        &self.from
    }

    pub fn delay_ms(&self) -> f32 {
        self.transition.delay_ms
    }

    pub fn duration_ms(&self) -> f32 {
        self.transition.duration_ms
    }

    /// Push the start back, e.g. for staggering. Only meaningful before the
    /// first frame.
    pub fn set_delay(&mut self, delay_ms: f32) {
        self.transition.delay_ms = delay_ms.max(0.0);
    }

    pub fn is_running(&self) -> bool {
        self.state == TweenState::Running
    }

    /// Halt immediately. No `Finished` frame will follow.
    pub fn stop(&mut self) {
        if self.state == TweenState::Running {
            self.state = TweenState::Stopped;
        }
    }

    /// Values at `progress` (0..1) of the timeline. The matrix channel follows
    /// the timing function, opacity is linear.
    pub fn values_at(&self, progress: f32) -> FlipValues {
        let eased = self.transition.timing.evaluate(progress);
        FlipValues {
            matrix: Matrix2d::lerp(&self.from.matrix, &self.to.matrix, eased),
            opacity: f32::lerp(&self.from.opacity, &self.to.opacity, progress),
        }
    }

    /// Advance to `now`.
    ///
    /// `target_attached` reports whether the animated element is still in
    /// the live tree; if not, the tween stops itself instead of producing
    /// values for an element that no longer exists.
    pub fn advance(&mut self, now: Instant, target_attached: bool) -> TweenFrame {
        if self.state != TweenState::Running {
            return TweenFrame::Stopped;
        }
        if !target_attached {
            log::debug!("Tween target detached; stopping");
            self.state = TweenState::Stopped;
            return TweenFrame::Stopped;
        }

        let elapsed_ms = now.saturating_duration_since(self.started_at).as_secs_f32() * 1000.0;
        let active_ms = elapsed_ms - self.transition.delay_ms;
        if active_ms < 0.0 {
            return TweenFrame::Delayed;
        }

        let progress = if self.transition.duration_ms <= 0.0 {
            1.0
        } else {
            (active_ms / self.transition.duration_ms).min(1.0)
        };

        if progress >= 1.0 {
            self.state = TweenState::Finished;
            TweenFrame::Finished(self.to)
        } else {
            TweenFrame::Step(self.values_at(progress))
        }
    }
}
