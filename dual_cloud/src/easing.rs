//! Easing curves that reshape the raw blend progress.
//!
//! All curves map `[0, 1]` onto `[0, 1]`, fix both endpoints and are
//! monotonic non-decreasing.  Inputs outside the unit interval are clamped.

/// Quartic ease-in-out: `8t⁴` below the midpoint, `1 − (−2t + 2)⁴ / 2` above.
pub fn ease_in_out_quart(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        8.0 * t * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
    }
}

/// Hermite smoothstep `t²(3 − 2t)`.
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Scalar linear interpolation.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// A named easing curve, chosen per group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    #[default]
    QuartInOut,
    Smoothstep,
    /// `t²` — slow start, used for things that grow in late.
    Quadratic,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear     => t.clamp(0.0, 1.0),
            Easing::QuartInOut => ease_in_out_quart(t),
            Easing::Smoothstep => smoothstep(t),
            Easing::Quadratic  => { let t = t.clamp(0.0, 1.0); t * t }
        }
    }

    pub fn all() -> &'static [Easing] {
        &[Easing::Linear, Easing::QuartInOut, Easing::Smoothstep, Easing::Quadratic]
    }

    pub fn name(self) -> &'static str {
        match self {
            Easing::Linear     => "linear",
            Easing::QuartInOut => "quart in-out",
            Easing::Smoothstep => "smoothstep",
            Easing::Quadratic  => "quadratic",
        }
    }
}
