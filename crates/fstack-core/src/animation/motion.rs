#![forbid(unsafe_code)]

//! Single motion descriptors: translate, scale, rotate and alpha.
//!
//! A [`Motion`] is pure data. It never holds a clock; callers sample it with
//! [`Motion::transformation_at`] for an elapsed time and the [`Bounds`] it
//! should be resolved against.
//!
//! # Invariants
//!
//! 1. Sampling at `elapsed >= duration` yields the `to` end of the motion.
//! 2. A zero-duration motion is always sampled at its end.
//! 3. Relative-to-self values scale by `bounds.own`, relative-to-parent by
//!    `bounds.parent`, absolute values are surface pixels.

use std::time::Duration;

use kurbo::{Affine, Vec2};

use super::{Interpolator, normalized};
use crate::geometry::Bounds;

/// What a coordinate is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Relative {
    /// Surface pixels.
    Absolute,
    /// Multiples of the animated panel's own size.
    #[default]
    ToSelf,
    /// Multiples of the surface size.
    ToParent,
}

impl Relative {
    fn resolve(self, value: f64, own: f64, parent: f64) -> f64 {
        match self {
            Self::Absolute => value,
            Self::ToSelf => value * own,
            Self::ToParent => value * parent,
        }
    }
}

/// One translate coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub relative: Relative,
    pub value: f64,
}

impl Offset {
    pub const fn of_self(value: f64) -> Self {
        Self {
            relative: Relative::ToSelf,
            value,
        }
    }

    pub const fn of_parent(value: f64) -> Self {
        Self {
            relative: Relative::ToParent,
            value,
        }
    }

    pub const fn absolute(value: f64) -> Self {
        Self {
            relative: Relative::Absolute,
            value,
        }
    }

    fn resolve_x(self, bounds: &Bounds) -> f64 {
        self.relative
            .resolve(self.value, bounds.own.width, bounds.parent.width)
    }

    fn resolve_y(self, bounds: &Bounds) -> f64 {
        self.relative
            .resolve(self.value, bounds.own.height, bounds.parent.height)
    }
}

/// Fixed point for scale and rotate motions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pivot {
    pub x: f64,
    pub y: f64,
    pub relative: Relative,
}

impl Pivot {
    pub const CENTER: Self = Self::of_self(0.5, 0.5);
    pub const TOP_LEFT: Self = Self::of_self(0.0, 0.0);

    /// Pivot as a fraction of the panel's own size.
    pub const fn of_self(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            relative: Relative::ToSelf,
        }
    }

    /// Pivot as a fraction of the surface size.
    pub const fn of_parent(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            relative: Relative::ToParent,
        }
    }

    fn resolve(self, bounds: &Bounds) -> Vec2 {
        Vec2::new(
            self.relative
                .resolve(self.x, bounds.own.width, bounds.parent.width),
            self.relative
                .resolve(self.y, bounds.own.height, bounds.parent.height),
        )
    }
}

impl Default for Pivot {
    fn default() -> Self {
        Self::TOP_LEFT
    }
}

/// The shape of a motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionKind {
    Translate {
        from_x: Offset,
        to_x: Offset,
        from_y: Offset,
        to_y: Offset,
    },
    Scale {
        from_x: f64,
        to_x: f64,
        from_y: f64,
        to_y: f64,
        pivot: Pivot,
    },
    /// Degrees, clockwise on a y-down surface.
    Rotate {
        from_degrees: f64,
        to_degrees: f64,
        pivot: Pivot,
    },
    Alpha {
        from: f64,
        to: f64,
    },
}

/// Matrix and opacity of a panel at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transformation {
    pub matrix: Affine,
    pub alpha: f64,
}

impl Transformation {
    pub const IDENTITY: Self = Self {
        matrix: Affine::IDENTITY,
        alpha: 1.0,
    };

    /// Apply `self` first, then `after`.
    #[must_use]
    pub fn then(self, after: Self) -> Self {
        Self {
            matrix: after.matrix * self.matrix,
            alpha: self.alpha * after.alpha,
        }
    }

    /// Whether this is (numerically) the identity.
    pub fn is_identity(&self) -> bool {
        let a = self.matrix.as_coeffs();
        let id = Affine::IDENTITY.as_coeffs();
        a.iter().zip(id.iter()).all(|(x, y)| (x - y).abs() < 1e-9)
            && (self.alpha - 1.0).abs() < 1e-9
    }
}

impl Default for Transformation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A single timed motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub kind: MotionKind,
    pub duration: Duration,
    /// Hold the end state after `duration` when played inside a longer set.
    pub fill_after: bool,
    pub interpolator: Interpolator,
}

impl Motion {
    #[must_use]
    pub fn new(kind: MotionKind, duration: Duration) -> Self {
        Self {
            kind,
            duration,
            fill_after: false,
            interpolator: Interpolator::default(),
        }
    }

    pub fn translate(
        from_x: Offset,
        to_x: Offset,
        from_y: Offset,
        to_y: Offset,
        duration: Duration,
    ) -> Self {
        Self::new(
            MotionKind::Translate {
                from_x,
                to_x,
                from_y,
                to_y,
            },
            duration,
        )
    }

    pub fn scale(
        from_x: f64,
        to_x: f64,
        from_y: f64,
        to_y: f64,
        pivot: Pivot,
        duration: Duration,
    ) -> Self {
        Self::new(
            MotionKind::Scale {
                from_x,
                to_x,
                from_y,
                to_y,
                pivot,
            },
            duration,
        )
    }

    pub fn rotate(from_degrees: f64, to_degrees: f64, pivot: Pivot, duration: Duration) -> Self {
        Self::new(
            MotionKind::Rotate {
                from_degrees,
                to_degrees,
                pivot,
            },
            duration,
        )
    }

    pub fn alpha(from: f64, to: f64, duration: Duration) -> Self {
        Self::new(MotionKind::Alpha { from, to }, duration)
    }

    #[must_use]
    pub fn fill_after(mut self, fill_after: bool) -> Self {
        self.fill_after = fill_after;
        self
    }

    #[must_use]
    pub fn interpolator(mut self, interpolator: Interpolator) -> Self {
        self.interpolator = interpolator;
        self
    }

    /// Interpolated fraction at `elapsed`.
    pub fn fraction_at(&self, elapsed: Duration) -> f64 {
        self.interpolator.apply(normalized(elapsed, self.duration))
    }

    /// Sample the motion `elapsed` after it started.
    pub fn transformation_at(&self, elapsed: Duration, bounds: &Bounds) -> Transformation {
        self.transformation(self.fraction_at(elapsed), bounds)
    }

    /// Transformation for an already-interpolated fraction `t`.
    pub fn transformation(&self, t: f64, bounds: &Bounds) -> Transformation {
        let lerp = |a: f64, b: f64| a + (b - a) * t;
        match self.kind {
            MotionKind::Translate {
                from_x,
                to_x,
                from_y,
                to_y,
            } => {
                let dx = lerp(from_x.resolve_x(bounds), to_x.resolve_x(bounds));
                let dy = lerp(from_y.resolve_y(bounds), to_y.resolve_y(bounds));
                Transformation {
                    matrix: Affine::translate((dx, dy)),
                    alpha: 1.0,
                }
            }
            MotionKind::Scale {
                from_x,
                to_x,
                from_y,
                to_y,
                pivot,
            } => {
                let p = pivot.resolve(bounds);
                let scale = Affine::scale_non_uniform(lerp(from_x, to_x), lerp(from_y, to_y));
                Transformation {
                    matrix: about(p, scale),
                    alpha: 1.0,
                }
            }
            MotionKind::Rotate {
                from_degrees,
                to_degrees,
                pivot,
            } => {
                let p = pivot.resolve(bounds);
                let rotation = Affine::rotate(lerp(from_degrees, to_degrees).to_radians());
                Transformation {
                    matrix: about(p, rotation),
                    alpha: 1.0,
                }
            }
            MotionKind::Alpha { from, to } => Transformation {
                matrix: Affine::IDENTITY,
                alpha: lerp(from, to),
            },
        }
    }
}

fn about(pivot: Vec2, inner: Affine) -> Affine {
    Affine::translate(pivot) * inner * Affine::translate(-pivot)
}
