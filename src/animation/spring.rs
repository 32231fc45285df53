/// Parameters of a damped spring used as an easing curve.
///
/// The spring is stretched over the transition's duration: normalized time
/// `1.0` is the moment its oscillation has decayed to a thousandth of the
/// distance travelled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    /// Mass of the spring (default: 1.0)
    pub mass: f32,
    pub stiffness: f32,
    /// Damping coefficient
    pub damping: f32,
}

/// Envelope ratio at which the spring counts as settled
const SETTLE_RATIO: f32 = 1000.0;

impl SpringConfig {
    /// Settles without visible overshoot
    pub const NO_WOBBLE: Self = Self {
        mass: 1.0,
        stiffness: 200.0,
        damping: 26.0,
    };

    pub const GENTLE: Self = Self {
        mass: 1.0,
        stiffness: 120.0,
        damping: 14.0,
    };

    pub const VERY_GENTLE: Self = Self {
        mass: 1.0,
        stiffness: 130.0,
        damping: 17.0,
    };

    /// Noticeable overshoot
    pub const WOBBLY: Self = Self {
        mass: 1.0,
        stiffness: 180.0,
        damping: 12.0,
    };

    pub const STIFF: Self = Self {
        mass: 1.0,
        stiffness: 260.0,
        damping: 26.0,
    };

    /// Presets under the names authors use for them.
    pub const PRESETS: [(&'static str, SpringConfig); 5] = [
        ("noWobble", Self::NO_WOBBLE),
        ("gentle", Self::GENTLE),
        ("veryGentle", Self::VERY_GENTLE),
        ("wobbly", Self::WOBBLY),
        ("stiff", Self::STIFF),
    ];

    fn natural_frequency(&self) -> f32 {
        (self.stiffness / self.mass.max(f32::EPSILON)).sqrt()
    }

    fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt().max(f32::EPSILON))
    }

    /// Seconds until the spring is considered at rest
    pub fn settle_secs(&self) -> f32 {
        let decay = self.damping_ratio().min(1.0) * self.natural_frequency();
        SETTLE_RATIO.ln() / decay.max(f32::EPSILON)
    }

    /// Displacement toward the target at normalized time `t`. Starts at
    /// `0.0`, ends at exactly `1.0` and may overshoot in between.
    pub fn evaluate(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        let tau = t * self.settle_secs();
        let omega = self.natural_frequency();
        let zeta = self.damping_ratio();

        if zeta < 1.0 {
            let omega_d = omega * (1.0 - zeta * zeta).sqrt();
            let envelope = (-zeta * omega * tau).exp();
            1.0 - envelope
                * ((omega_d * tau).cos() + (zeta * omega / omega_d) * (omega_d * tau).sin())
        } else {
            // Critically damped; overdamped springs are treated the same
            1.0 - (-omega * tau).exp() * (1.0 + omega * tau)
        }
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::NO_WOBBLE
    }
}
