#![forbid(unsafe_code)]

//! Motion primitives for panel transitions.
//!
//! Everything here is time-based and host-driven: nothing reads a clock, the
//! caller advances animations with [`Animation::tick`]. A panel transition is
//! described by [`Motion`] descriptors grouped into a [`MotionSet`] and played
//! back by a [`MotionPlayer`], which yields the panel's affine matrix and alpha
//! for the current instant.
//!
//! ```ignore
//! use std::time::Duration;
//! use fstack_core::animation::{Interpolator, MotionLibrary, MotionPlayer, MotionSet};
//!
//! let mut lib = MotionLibrary::new();
//! lib.set_interpolator(Interpolator::Linear);
//! let set = MotionSet::new()
//!     .with(lib.from_right_of_parent(Duration::from_millis(400), false))
//!     .with(lib.show(Duration::from_millis(400), false));
//!
//! let mut player = MotionPlayer::new(set);
//! player.tick(Duration::from_millis(200));
//! let t = player.transformation(bounds);
//! ```

pub mod motion;
pub mod player;
pub mod presets;
pub mod set;

pub use motion::{Motion, MotionKind, Offset, Pivot, Relative, Transformation};
pub use player::MotionPlayer;
pub use presets::{MotionLibrary, TranslateMode};
pub use set::MotionSet;

use std::f64::consts::PI;
use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Interpolation curves
// ---------------------------------------------------------------------------

/// Maps normalized time `t` in [0, 1] to an interpolated fraction.
///
/// Most curves stay within [0, 1]; `Anticipate`, `Overshoot`,
/// `AnticipateOvershoot` and `Cycle` intentionally leave that range.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolator {
    Accelerate,
    Decelerate,
    AccelerateDecelerate,
    Anticipate,
    Overshoot,
    AnticipateOvershoot,
    Bounce,
    /// Sine wave repeated `n` times over the duration.
    Cycle(u32),
    Linear,
    FastOutLinearIn,
    /// Standard curve for discrete moves.
    #[default]
    FastOutSlowIn,
    LinearOutSlowIn,
}

const ANTICIPATE_TENSION: f64 = 2.0;
const OVERSHOOT_TENSION: f64 = 2.0;
const ANTICIPATE_OVERSHOOT_TENSION: f64 = 2.0 * 1.5;

impl Interpolator {
    /// Interpolated fraction for normalized time `t` (clamped to [0, 1]).
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Accelerate => t * t,
            Self::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
            Self::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
            Self::Anticipate => anticipate(t, ANTICIPATE_TENSION),
            Self::Overshoot => {
                let u = t - 1.0;
                u * u * ((OVERSHOOT_TENSION + 1.0) * u + OVERSHOOT_TENSION) + 1.0
            }
            Self::AnticipateOvershoot => {
                let s = ANTICIPATE_OVERSHOOT_TENSION;
                if t < 0.5 {
                    0.5 * anticipate(t * 2.0, s)
                } else {
                    let u = t * 2.0 - 2.0;
                    0.5 * (u * u * ((s + 1.0) * u + s) + 2.0)
                }
            }
            Self::Bounce => bounce(t),
            Self::Cycle(cycles) => (2.0 * f64::from(cycles.max(1)) * PI * t).sin(),
            Self::Linear => t,
            Self::FastOutLinearIn => cubic_bezier(0.4, 0.0, 1.0, 1.0, t),
            Self::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, t),
            Self::LinearOutSlowIn => cubic_bezier(0.0, 0.0, 0.2, 1.0, t),
        }
    }

    /// Whether the curve can produce values outside [0, 1].
    pub fn can_overshoot(self) -> bool {
        matches!(
            self,
            Self::Anticipate | Self::Overshoot | Self::AnticipateOvershoot | Self::Cycle(_)
        )
    }
}

fn anticipate(t: f64, tension: f64) -> f64 {
    t * t * ((tension + 1.0) * t - tension)
}

fn bounce(t: f64) -> f64 {
    fn arc(t: f64) -> f64 {
        t * t * 8.0
    }
    let t = t * 1.1226;
    if t < 0.3535 {
        arc(t)
    } else if t < 0.7408 {
        arc(t - 0.54719) + 0.7
    } else if t < 0.9644 {
        arc(t - 0.8526) + 0.9
    } else {
        arc(t - 1.0435) + 0.95
    }
}

/// Evaluate a unit cubic Bézier `(0,0) (x1,y1) (x2,y2) (1,1)` at `x = t`.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, t: f64) -> f64 {
    let coord = |a: f64, b: f64, s: f64| {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a + 3.0 * inv * s * s * b + s * s * s
    };
    let slope = |a: f64, b: f64, s: f64| {
        let inv = 1.0 - s;
        3.0 * inv * inv * a + 6.0 * inv * s * (b - a) + 3.0 * s * s * (1.0 - b)
    };

    // Newton first, bisection if the slope flattens out.
    let mut s = t;
    for _ in 0..8 {
        let err = coord(x1, x2, s) - t;
        if err.abs() < 1e-7 {
            return coord(y1, y2, s);
        }
        let d = slope(x1, x2, s);
        if d.abs() < 1e-6 {
            break;
        }
        s -= err / d;
    }

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    s = t;
    for _ in 0..48 {
        let x = coord(x1, x2, s);
        if (x - t).abs() < 1e-7 {
            break;
        }
        if x < t {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    coord(y1, y2, s)
}

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// A host-ticked animation.
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Normalized (uninterpolated) progress in [0.0, 1.0].
    fn value(&self) -> f64;

    /// Reset the animation to its initial state.
    fn reset(&mut self);

    /// Time elapsed past completion.
    fn overshoot(&self) -> Duration {
        Duration::ZERO
    }

    /// Time left until completion. [`Duration::ZERO`] once complete.
    fn remaining(&self) -> Duration;
}

/// Normalized progress of `elapsed` over `duration`, clamped to [0, 1].
///
/// A zero duration is already complete.
pub fn normalized(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}
