use crate::transform::Matrix2d;

/// Trait for types that can be animated by interpolating between values
pub trait Animatable: Clone + PartialEq {
    /// Linear interpolation between two values
    /// t = 0.0 returns `from`, t = 1.0 returns `to`
    /// t can exceed [0, 1] range for overshoot effects
    fn lerp(from: &Self, to: &Self, t: f32) -> Self;
}

impl Animatable for f32 {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        from + (to - from) * t
    }
}

impl Animatable for Matrix2d {
    /// Component-wise, the way the numbers of a `matrix()` string tween
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        let a = from.values();
        let b = to.values();
        Matrix2d::from_values(std::array::from_fn(|i| f32::lerp(&a[i], &b[i], t)))
    }
}

/// The two animated channels of a participant
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlipValues {
    pub matrix: Matrix2d,
    pub opacity: f32,
}

impl FlipValues {
    pub fn new(matrix: Matrix2d, opacity: f32) -> Self {
        Self { matrix, opacity }
    }
}
