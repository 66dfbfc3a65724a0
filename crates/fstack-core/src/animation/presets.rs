#![forbid(unsafe_code)]

//! Named motion presets.
//!
//! [`MotionLibrary`] is a small factory: it remembers one [`Interpolator`]
//! and stamps it onto every motion it builds. Each call returns a fresh
//! [`Motion`]; nothing is shared between calls.
//!
//! Side presets come in two flavors. `to_left` / `from_left` move by the
//! panel's own width, while `to_left_of_parent` / `from_left_of_parent` move
//! by the surface width so the panel fully leaves (or enters) the surface
//! even when it is inset by margins.

use std::time::Duration;

use super::{Interpolator, Motion, Offset, Pivot};

/// Reference frames for the `from` and `to` ends of a translate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranslateMode {
    #[default]
    SelfToSelf,
    ParentToParent,
    SelfToParent,
    ParentToSelf,
}

impl TranslateMode {
    fn offsets(self, from: f64, to: f64) -> (Offset, Offset) {
        match self {
            Self::SelfToSelf => (Offset::of_self(from), Offset::of_self(to)),
            Self::ParentToParent => (Offset::of_parent(from), Offset::of_parent(to)),
            Self::SelfToParent => (Offset::of_self(from), Offset::of_parent(to)),
            Self::ParentToSelf => (Offset::of_parent(from), Offset::of_self(to)),
        }
    }
}

/// Motion factory with a current interpolation curve.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionLibrary {
    interpolator: Interpolator,
}

const S0: Offset = Offset::of_self(0.0);
const P0: Offset = Offset::of_parent(0.0);

impl MotionLibrary {
    /// A library using [`Interpolator::FastOutSlowIn`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_interpolator(interpolator: Interpolator) -> Self {
        Self { interpolator }
    }

    pub fn set_interpolator(&mut self, interpolator: Interpolator) {
        self.interpolator = interpolator;
    }

    pub fn interpolator(&self) -> Interpolator {
        self.interpolator
    }

    fn finish(&self, motion: Motion, fill_after: bool) -> Motion {
        motion
            .interpolator(self.interpolator)
            .fill_after(fill_after)
    }

    fn shift(
        &self,
        x: (Offset, Offset),
        y: (Offset, Offset),
        duration: Duration,
        fill_after: bool,
    ) -> Motion {
        self.finish(Motion::translate(x.0, x.1, y.0, y.1, duration), fill_after)
    }

    // -----------------------------------------------------------------------
    // Translate
    // -----------------------------------------------------------------------

    /// Translate with explicit reference frames for each end.
    #[allow(clippy::too_many_arguments)]
    pub fn translate(
        &self,
        mode: TranslateMode,
        from_x: f64,
        to_x: f64,
        from_y: f64,
        to_y: f64,
        duration: Duration,
        fill_after: bool,
    ) -> Motion {
        self.shift(
            mode.offsets(from_x, to_x),
            mode.offsets(from_y, to_y),
            duration,
            fill_after,
        )
    }

    pub fn to_left(&self, duration: Duration, fill_after: bool) -> Motion {
        self.shift((S0, Offset::of_self(-1.0)), (S0, S0), duration, fill_after)
    }

    pub fn to_left_of_parent(&self, duration: Duration, fill_after: bool) -> Motion {
        self.shift((S0, Offset::of_parent(-1.0)), (S0, S0), duration, fill_after)
    }

    pub fn from_left(&self, duration: Duration, fill_after: bool) -> Motion {
        self.shift((Offset::of_self(-1.0), S0), (S0, S0), duration, fill_after)
    }

    pub fn from_left_of_parent(&self, duration: Duration, fill_after: bool) -> Motion {
        self.shift((Offset::of_parent(-1.0), S0), (S0, S0), duration, fill_after)
    }

    pub fn to_right(&self, duration: Duration, fill_after: bool) -> Motion {
        self.shift((S0, Offset::of_self(1.0)), (S0, S0), duration, fill_after)
    }

    pub fn to_right_of_parent(&self, duration: Duration, fill_after: bool) -> Motion {
        self.shift((S0, Offset::of_parent(1.0)), (S0, S0), duration, fill_after)
    }

    pub fn from_right(&self, duration: Duration, fill_after: bool) -> Motion {
        self.shift((Offset::of_self(1.0), S0), (S0, S0), duration, fill_after)
    }

    pub fn from_right_of_parent(&self, duration: Duration, fill_after: bool) -> Motion {
        self.shift((Offset::of_parent(1.0), S0), (S0, S0), duration, fill_after)
    }

    pub fn to_bottom(&self, duration: Duration, fill_after: bool) -> Motion {
        self.shift((S0, S0), (S0, Offset::of_self(1.0)), duration, fill_after)
    }

    pub fn to_bottom_of_parent(&self, duration: Duration, fill_after: bool) -> Motion {
        self.shift((P0, P0), (S0, Offset::of_parent(1.0)), duration, fill_after)
    }

    pub fn from_bottom(&self, duration: Duration, fill_after: bool) -> Motion {
        self.shift((S0, S0), (Offset::of_self(1.0), S0), duration, fill_after)
    }

    pub fn from_bottom_of_parent(&self, duration: Duration, fill_after: bool) -> Motion {
        self.shift((P0, P0), (Offset::of_parent(1.0), S0), duration, fill_after)
    }

    pub fn to_top(&self, duration: Duration, fill_after: bool) -> Motion {
        self.shift((S0, S0), (S0, Offset::of_self(-1.0)), duration, fill_after)
    }

    pub fn to_top_of_parent(&self, duration: Duration, fill_after: bool) -> Motion {
        self.shift((P0, P0), (S0, Offset::of_parent(-1.0)), duration, fill_after)
    }

    pub fn from_top(&self, duration: Duration, fill_after: bool) -> Motion {
        self.shift((S0, S0), (Offset::of_self(-1.0), S0), duration, fill_after)
    }

    pub fn from_top_of_parent(&self, duration: Duration, fill_after: bool) -> Motion {
        self.shift((P0, P0), (Offset::of_parent(-1.0), S0), duration, fill_after)
    }

    // -----------------------------------------------------------------------
    // Alpha
    // -----------------------------------------------------------------------

    /// Fade out (alpha 1 to 0).
    pub fn hide(&self, duration: Duration, fill_after: bool) -> Motion {
        self.change_alpha(1.0, 0.0, duration, fill_after)
    }

    /// Fade in (alpha 0 to 1).
    pub fn show(&self, duration: Duration, fill_after: bool) -> Motion {
        self.change_alpha(0.0, 1.0, duration, fill_after)
    }

    pub fn change_alpha(&self, from: f64, to: f64, duration: Duration, fill_after: bool) -> Motion {
        self.finish(Motion::alpha(from, to, duration), fill_after)
    }

    // -----------------------------------------------------------------------
    // Scale and rotate
    // -----------------------------------------------------------------------

    /// Scale around a pivot given as a fraction of the panel's own size.
    #[allow(clippy::too_many_arguments)]
    pub fn scale(
        &self,
        from_x: f64,
        to_x: f64,
        from_y: f64,
        to_y: f64,
        pivot_x: f64,
        pivot_y: f64,
        duration: Duration,
        fill_after: bool,
    ) -> Motion {
        self.finish(
            Motion::scale(
                from_x,
                to_x,
                from_y,
                to_y,
                Pivot::of_self(pivot_x, pivot_y),
                duration,
            ),
            fill_after,
        )
    }

    /// Uniform scale around a self-relative pivot.
    pub fn scale_uniform(
        &self,
        from: f64,
        to: f64,
        pivot: (f64, f64),
        duration: Duration,
        fill_after: bool,
    ) -> Motion {
        self.scale(from, to, from, to, pivot.0, pivot.1, duration, fill_after)
    }

    pub fn scale_from_0_to_1(&self, duration: Duration, fill_after: bool) -> Motion {
        self.scale_uniform(0.0, 1.0, (0.5, 0.5), duration, fill_after)
    }

    pub fn scale_from_1_to_0(&self, duration: Duration, fill_after: bool) -> Motion {
        self.scale_uniform(1.0, 0.0, (0.5, 0.5), duration, fill_after)
    }

    pub fn scale_from_1_to_2(&self, duration: Duration, fill_after: bool) -> Motion {
        self.scale_uniform(1.0, 2.0, (0.5, 0.5), duration, fill_after)
    }

    pub fn scale_from_2_to_1(&self, duration: Duration, fill_after: bool) -> Motion {
        self.scale_uniform(2.0, 1.0, (0.5, 0.5), duration, fill_after)
    }

    /// Rotate around a pivot given as a fraction of the panel's own size.
    pub fn rotate(
        &self,
        from_degrees: f64,
        to_degrees: f64,
        pivot_x: f64,
        pivot_y: f64,
        duration: Duration,
        fill_after: bool,
    ) -> Motion {
        self.finish(
            Motion::rotate(
                from_degrees,
                to_degrees,
                Pivot::of_self(pivot_x, pivot_y),
                duration,
            ),
            fill_after,
        )
    }

    /// Rotate around a pivot given as a fraction of the surface size.
    pub fn rotate_to_parent(
        &self,
        from_degrees: f64,
        to_degrees: f64,
        pivot_x: f64,
        pivot_y: f64,
        duration: Duration,
        fill_after: bool,
    ) -> Motion {
        self.finish(
            Motion::rotate(
                from_degrees,
                to_degrees,
                Pivot::of_parent(pivot_x, pivot_y),
                duration,
            ),
            fill_after,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Bounds;
    use kurbo::{Point, Size};

    const D: Duration = Duration::from_millis(100);

    fn inset() -> Bounds {
        Bounds::new(Size::new(300.0, 200.0), Size::new(400.0, 300.0))
    }

    fn origin_after(motion: Motion, t: f64) -> Point {
        motion.transformation(t, &inset()).matrix * Point::ORIGIN
    }

    #[test]
    fn library_stamps_its_interpolator() {
        let lib = MotionLibrary::with_interpolator(Interpolator::Linear);
        assert_eq!(lib.show(D, false).interpolator, Interpolator::Linear);
        assert_eq!(MotionLibrary::new().show(D, false).interpolator, Interpolator::FastOutSlowIn);
    }

    #[test]
    fn of_parent_presets_travel_the_surface() {
        let lib = MotionLibrary::new();
        assert_eq!(origin_after(lib.to_left_of_parent(D, false), 1.0), Point::new(-400.0, 0.0));
        assert_eq!(origin_after(lib.from_right_of_parent(D, false), 0.0), Point::new(400.0, 0.0));
        assert_eq!(origin_after(lib.to_bottom_of_parent(D, false), 1.0), Point::new(0.0, 300.0));
        assert_eq!(origin_after(lib.from_top_of_parent(D, false), 0.0), Point::new(0.0, -300.0));
    }

    #[test]
    fn self_presets_travel_own_size() {
        let lib = MotionLibrary::new();
        assert_eq!(origin_after(lib.to_right(D, false), 1.0), Point::new(300.0, 0.0));
        assert_eq!(origin_after(lib.from_bottom(D, false), 0.0), Point::new(0.0, 200.0));
    }

    #[test]
    fn entering_presets_end_at_rest() {
        let lib = MotionLibrary::new();
        for m in [
            lib.from_left_of_parent(D, false),
            lib.from_right_of_parent(D, false),
            lib.from_top_of_parent(D, false),
            lib.from_bottom_of_parent(D, false),
            lib.scale_from_0_to_1(D, false),
            lib.scale_from_2_to_1(D, false),
            lib.show(D, false),
        ] {
            assert!(m.transformation(1.0, &inset()).is_identity(), "{m:?}");
        }
    }

    #[test]
    fn translate_mode_picks_frames() {
        let lib = MotionLibrary::new();
        let m = lib.translate(TranslateMode::SelfToParent, 0.0, 1.0, 0.0, 0.0, D, true);
        assert!(m.fill_after);
        assert_eq!(origin_after(m, 1.0), Point::new(400.0, 0.0));
    }

    #[test]
    fn hide_fades_out() {
        let m = MotionLibrary::new().hide(D, false);
        assert_eq!(m.transformation(1.0, &inset()).alpha, 0.0);
    }
}
