//! Easing curves for tweens.

/// A CSS-style cubic bezier from `(0, 0)` to `(1, 1)` with control points
/// `(x1, y1)` and `(x2, y2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl CubicBezier {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Maps a time fraction in `[0, 1]` to eased progress.
    pub fn transform(&self, fraction: f32) -> f32 {
        if fraction <= 0.0 {
            return 0.0;
        }
        if fraction >= 1.0 {
            return 1.0;
        }
        let t = self.solve_t(fraction);
        bezier(self.y1, self.y2, t)
    }

    /// Curve parameter whose x coordinate is `x`.
    fn solve_t(&self, x: f32) -> f32 {
        const EPSILON: f32 = 1e-6;

        let mut t = x;
        for _ in 0..8 {
            let error = bezier(self.x1, self.x2, t) - x;
            if error.abs() < EPSILON {
                return t;
            }
            let slope = bezier_slope(self.x1, self.x2, t);
            if slope.abs() < EPSILON {
                break;
            }
            t = (t - error / slope).clamp(0.0, 1.0);
        }

        // Newton stalled on a flat stretch; x(t) is monotonic, so bisect.
        let (mut low, mut high) = (0.0f32, 1.0f32);
        t = x;
        for _ in 0..20 {
            let error = bezier(self.x1, self.x2, t) - x;
            if error.abs() < EPSILON {
                break;
            }
            if error > 0.0 {
                high = t;
            } else {
                low = t;
            }
            t = (low + high) * 0.5;
        }
        t
    }
}

/// One coordinate of the curve at parameter `t`, in Bernstein form.
fn bezier(p1: f32, p2: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
}

fn bezier_slope(p1: f32, p2: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

/// Easing applied to a tween's time fraction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    Linear,
    /// Standard motion: quick start, gentle landing.
    #[default]
    FastOutSlowIn,
    /// Incoming elements: full speed in, decelerating to rest.
    LinearOutSlowIn,
    /// Outgoing elements: accelerating until they leave the screen.
    FastOutLinear,
    Cubic(CubicBezier),
}

impl Easing {
    pub const FAST_OUT_SLOW_IN: CubicBezier = CubicBezier::new(0.4, 0.0, 0.2, 1.0);
    pub const LINEAR_OUT_SLOW_IN: CubicBezier = CubicBezier::new(0.0, 0.0, 0.2, 1.0);
    pub const FAST_OUT_LINEAR: CubicBezier = CubicBezier::new(0.4, 0.0, 1.0, 1.0);

    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction.clamp(0.0, 1.0),
            Easing::FastOutSlowIn => Self::FAST_OUT_SLOW_IN.transform(fraction),
            Easing::LinearOutSlowIn => Self::LINEAR_OUT_SLOW_IN.transform(fraction),
            Easing::FastOutLinear => Self::FAST_OUT_LINEAR.transform(fraction),
            Easing::Cubic(curve) => curve.transform(fraction),
        }
    }
}

impl From<CubicBezier> for Easing {
    fn from(curve: CubicBezier) -> Self {
        Easing::Cubic(curve)
    }
}
