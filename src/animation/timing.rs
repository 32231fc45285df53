//! Timing functions (easing curves).
//!
//! A timing function maps normalized time `t` in `[0, 1]` to an
//! interpolation factor. Most curves end at exactly `1.0`; elastic and back
//! curves overshoot along the way.
//!
//! Named curves are looked up through [`super::EasingRegistry`]; this module
//! only knows how to evaluate them.

use std::f32::consts::PI;
use std::fmt;
use std::sync::Arc;

use super::spring::SpringConfig;

/// Timing function that controls the animation curve
#[derive(Clone)]
pub enum TimingFunction {
    /// Linear interpolation (constant speed)
    Linear,
    /// CSS cubic-bezier curve (x1, y1, x2, y2)
    CubicBezier(f32, f32, f32, f32),
    /// A plain formula, used for the built-in named curves
    Formula(fn(f32) -> f32),
    /// User-defined curve
    Custom(Arc<dyn Fn(f32) -> f32 + Send + Sync>),
    /// Damped spring stretched over the duration (can overshoot)
    Spring(SpringConfig),
}

impl TimingFunction {
    /// Evaluate the timing function at time t (0.0 to 1.0).
    /// The result can leave `[0, 1]` for overshooting curves.
    pub fn evaluate(&self, t: f32) -> f32 {
        match self {
            TimingFunction::Linear => t,
            TimingFunction::CubicBezier(x1, y1, x2, y2) => cubic_bezier(t, *x1, *y1, *x2, *y2),
            TimingFunction::Formula(f) => f(t),
            TimingFunction::Custom(f) => f(t),
            TimingFunction::Spring(config) => config.evaluate(t),
        }
    }

    /// Create a custom timing function from a closure
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f32) -> f32 + Send + Sync + 'static,
    {
        TimingFunction::Custom(Arc::new(f))
    }
}

impl fmt::Debug for TimingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimingFunction::Linear => write!(f, "Linear"),
            TimingFunction::CubicBezier(x1, y1, x2, y2) => {
                write!(f, "CubicBezier({}, {}, {}, {})", x1, y1, x2, y2)
            }
            TimingFunction::Formula(_) => write!(f, "Formula"),
            TimingFunction::Custom(_) => write!(f, "Custom"),
            TimingFunction::Spring(config) => write!(f, "Spring({:?})", config),
        }
    }
}

/// Robert Penner's easing equations, keyed by their conventional names.
pub(crate) mod formulas {
    use super::PI;

    pub fn ease_in_quad(t: f32) -> f32 {
        t * t
    }

    pub fn ease_out_quad(t: f32) -> f32 {
        t * (2.0 - t)
    }

    pub fn ease_in_out_quad(t: f32) -> f32 {
        if t < 0.5 {
            2.0 * t * t
        } else {
            -1.0 + (4.0 - 2.0 * t) * t
        }
    }

    pub fn ease_in_cubic(t: f32) -> f32 {
        t.powi(3)
    }

    pub fn ease_out_cubic(t: f32) -> f32 {
        (t - 1.0).powi(3) + 1.0
    }

    pub fn ease_in_out_cubic(t: f32) -> f32 {
        if t < 0.5 {
            4.0 * t.powi(3)
        } else {
            0.5 * (2.0 * t - 2.0).powi(3) + 1.0
        }
    }

    pub fn ease_in_quart(t: f32) -> f32 {
        t.powi(4)
    }

    pub fn ease_out_quart(t: f32) -> f32 {
        1.0 - (t - 1.0).powi(4)
    }

    pub fn ease_in_out_quart(t: f32) -> f32 {
        if t < 0.5 {
            8.0 * t.powi(4)
        } else {
            1.0 - 0.5 * (2.0 * t - 2.0).powi(4)
        }
    }

    pub fn ease_in_quint(t: f32) -> f32 {
        t.powi(5)
    }

    pub fn ease_out_quint(t: f32) -> f32 {
        (t - 1.0).powi(5) + 1.0
    }

    pub fn ease_in_out_quint(t: f32) -> f32 {
        if t < 0.5 {
            16.0 * t.powi(5)
        } else {
            0.5 * (2.0 * t - 2.0).powi(5) + 1.0
        }
    }

    pub fn ease_in_sine(t: f32) -> f32 {
        1.0 - (t * PI / 2.0).cos()
    }

    pub fn ease_out_sine(t: f32) -> f32 {
        (t * PI / 2.0).sin()
    }

    pub fn ease_in_out_sine(t: f32) -> f32 {
        -0.5 * ((PI * t).cos() - 1.0)
    }

    pub fn ease_in_expo(t: f32) -> f32 {
        if t <= 0.0 {
            0.0
        } else {
            2f32.powf(10.0 * (t - 1.0))
        }
    }

    pub fn ease_out_expo(t: f32) -> f32 {
        if t >= 1.0 {
            1.0
        } else {
            1.0 - 2f32.powf(-10.0 * t)
        }
    }

    pub fn ease_in_out_expo(t: f32) -> f32 {
        if t <= 0.0 {
            0.0
        } else if t >= 1.0 {
            1.0
        } else if t < 0.5 {
            0.5 * 2f32.powf(20.0 * t - 10.0)
        } else {
            1.0 - 0.5 * 2f32.powf(-20.0 * t + 10.0)
        }
    }

    pub fn ease_in_circ(t: f32) -> f32 {
        1.0 - (1.0 - t * t).sqrt()
    }

    pub fn ease_out_circ(t: f32) -> f32 {
        (1.0 - (t - 1.0).powi(2)).sqrt()
    }

    pub fn ease_in_out_circ(t: f32) -> f32 {
        if t < 0.5 {
            0.5 * (1.0 - (1.0 - 4.0 * t * t).sqrt())
        } else {
            0.5 * ((1.0 - (2.0 * t - 2.0).powi(2)).sqrt() + 1.0)
        }
    }

    const BACK: f32 = 1.70158;

    pub fn ease_in_back(t: f32) -> f32 {
        t * t * ((BACK + 1.0) * t - BACK)
    }

    pub fn ease_out_back(t: f32) -> f32 {
        let t = t - 1.0;
        t * t * ((BACK + 1.0) * t + BACK) + 1.0
    }

    pub fn ease_in_out_back(t: f32) -> f32 {
        let s = BACK * 1.525;
        let t = t * 2.0;
        if t < 1.0 {
            0.5 * (t * t * ((s + 1.0) * t - s))
        } else {
            let t = t - 2.0;
            0.5 * (t * t * ((s + 1.0) * t + s) + 2.0)
        }
    }

    pub fn ease_out_bounce(t: f32) -> f32 {
        if t < 1.0 / 2.75 {
            7.5625 * t * t
        } else if t < 2.0 / 2.75 {
            let t = t - 1.5 / 2.75;
            7.5625 * t * t + 0.75
        } else if t < 2.5 / 2.75 {
            let t = t - 2.25 / 2.75;
            7.5625 * t * t + 0.9375
        } else {
            let t = t - 2.625 / 2.75;
            7.5625 * t * t + 0.984375
        }
    }

    fn elastic_out(t: f32, period: f32) -> f32 {
        2f32.powf(-10.0 * t) * ((t - period / 4.0) * (2.0 * PI) / period).sin() + 1.0
    }

    pub fn ease_out_elastic(t: f32) -> f32 {
        elastic_out(t, 0.95)
    }

    pub fn ease_out_elastic_big(t: f32) -> f32 {
        elastic_out(t, 0.7)
    }
}

/// Cubic bezier curve evaluation
/// Simplified implementation assuming x1, x2 are in [0, 1]
fn cubic_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    // Newton-Raphson on x(t) = target
    let mut current_t = t;
    for _ in 0..8 {
        let current_x = cubic_bezier_x(current_t, x1, x2);
        let current_slope = cubic_bezier_slope(current_t, x1, x2);
        if current_slope.abs() < 1e-6 {
            break;
        }
        current_t -= (current_x - t) / current_slope;
    }
    cubic_bezier_y(current_t, y1, y2)
}

fn cubic_bezier_x(t: f32, x1: f32, x2: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    3.0 * mt2 * t * x1 + 3.0 * mt * t2 * x2 + t3
}

fn cubic_bezier_y(t: f32, y1: f32, y2: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    3.0 * mt2 * t * y1 + 3.0 * mt * t2 * y2 + t3
}

fn cubic_bezier_slope(t: f32, x1: f32, x2: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * x1 + 6.0 * mt * t * (x2 - x1) + 3.0 * t * t * (1.0 - x2)
}
