use std::collections::HashMap;
use std::fmt;

use super::spring::SpringConfig;
use super::timing::{formulas, TimingFunction};

/// Curve substituted for unrecognized easing names.
pub const FALLBACK_EASE: &str = "easeOutSine";

/// Named easing curves available to transitions.
///
/// Each [`crate::Flipper`] owns its registry, so registering a custom curve
/// affects only that flipper.
///
/// # Example
/// ```ignore
/// let mut easings = EasingRegistry::new();
/// easings.register("snap", TimingFunction::CubicBezier(0.2, 0.9, 0.1, 1.0));
/// ```
#[derive(Clone)]
pub struct EasingRegistry {
    curves: HashMap<String, TimingFunction>,
}

impl EasingRegistry {
    /// Registry with the built-in curves and the spring presets
    /// (`noWobble`, `gentle`, `veryGentle`, `wobbly`, `stiff`).
    pub fn new() -> Self {
        let builtin: [(&str, fn(f32) -> f32); 24] = [
            ("easeInQuad", formulas::ease_in_quad),
            ("easeOutQuad", formulas::ease_out_quad),
            ("easeInOutQuad", formulas::ease_in_out_quad),
            ("easeInCubic", formulas::ease_in_cubic),
            ("easeOutCubic", formulas::ease_out_cubic),
            ("easeInOutCubic", formulas::ease_in_out_cubic),
            ("easeInQuart", formulas::ease_in_quart),
            ("easeOutQuart", formulas::ease_out_quart),
            ("easeInOutQuart", formulas::ease_in_out_quart),
            ("easeInQuint", formulas::ease_in_quint),
            ("easeOutQuint", formulas::ease_out_quint),
            ("easeInOutQuint", formulas::ease_in_out_quint),
            ("easeInSine", formulas::ease_in_sine),
            ("easeOutSine", formulas::ease_out_sine),
            ("easeInOutSine", formulas::ease_in_out_sine),
            ("easeInExpo", formulas::ease_in_expo),
            ("easeOutExpo", formulas::ease_out_expo),
            ("easeInOutExpo", formulas::ease_in_out_expo),
            ("easeInCirc", formulas::ease_in_circ),
            ("easeOutCirc", formulas::ease_out_circ),
            ("easeInOutCirc", formulas::ease_in_out_circ),
            ("easeInBack", formulas::ease_in_back),
            ("easeOutBack", formulas::ease_out_back),
            ("easeInOutBack", formulas::ease_in_out_back),
        ];

        let mut registry = Self::empty();
        registry.register("linear", TimingFunction::Linear);
        for (name, f) in builtin {
            registry.register(name, TimingFunction::Formula(f));
        }
        registry.register(
            "easeOutBounce",
            TimingFunction::Formula(formulas::ease_out_bounce),
        );
        registry.register(
            "easeOutElastic",
            TimingFunction::Formula(formulas::ease_out_elastic),
        );
        registry.register(
            "easeOutElasticBig",
            TimingFunction::Formula(formulas::ease_out_elastic_big),
        );
        for (name, config) in SpringConfig::PRESETS {
            registry.register(name, TimingFunction::Spring(config));
        }
        registry
    }

    /// Registry with no curves at all. Every lookup falls back to linear.
    pub fn empty() -> Self {
        Self {
            curves: HashMap::new(),
        }
    }

    /// Add or replace a named curve.
    pub fn register(&mut self, name: impl Into<String>, curve: TimingFunction) {
        self.curves.insert(name.into(), curve);
    }

    pub fn get(&self, name: &str) -> Option<&TimingFunction> {
        self.curves.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.curves.contains_key(name)
    }

    /// Look up a curve, substituting [`FALLBACK_EASE`] (or linear, if even
    /// that is missing) for unknown names.
    pub fn resolve(&self, name: &str) -> TimingFunction {
        if let Some(curve) = self.curves.get(name) {
            return curve.clone();
        }
        log::warn!(
            "{} was not recognized as a valid easing option, falling back to {}",
            name,
            FALLBACK_EASE
        );
        self.curves
            .get(FALLBACK_EASE)
            .cloned()
            .unwrap_or(TimingFunction::Linear)
    }
}

impl Default for EasingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EasingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.curves.keys().collect();
        names.sort();
        f.debug_struct("EasingRegistry").field("curves", &names).finish()
    }
}
