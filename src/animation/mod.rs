mod animatable;
mod easing;
mod spring;
mod timing;
mod tween;

pub use animatable::{Animatable, FlipValues};
pub use easing::{EasingRegistry, FALLBACK_EASE};
pub use spring::SpringConfig;
pub use timing::TimingFunction;
pub use tween::{Tween, TweenConfig, TweenFrame};

/// How a single tween moves over time
#[derive(Clone, Debug)]
pub struct Transition {
    /// Duration of the animation in milliseconds
    pub duration_ms: f32,
    /// Curve for the matrix channel; opacity is always linear
    pub timing: TimingFunction,
    /// Delay before animation starts in milliseconds
    pub delay_ms: f32,
}

impl Transition {
    /// Create a new transition with the given duration and timing function
    pub fn new(duration_ms: f32, timing: TimingFunction) -> Self {
        Self {
            duration_ms,
            timing,
            delay_ms: 0.0,
        }
    }

    /// Set the delay before the animation starts
    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Set the duration of the animation
    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set the timing function
    pub fn timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::new(250.0, TimingFunction::Linear)
    }
}
