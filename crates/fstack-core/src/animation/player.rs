#![forbid(unsafe_code)]

//! Tickable playback of a [`MotionSet`].

use std::time::Duration;

use super::{Animation, MotionSet, Transformation, normalized};
use crate::geometry::Bounds;

/// Plays a [`MotionSet`] forward in host time.
///
/// Once complete the player reports [`Transformation::IDENTITY`], or the
/// set's end state when the set was built with `fill_after(true)`.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionPlayer {
    set: MotionSet,
    duration: Duration,
    elapsed: Duration,
}

impl MotionPlayer {
    #[must_use]
    pub fn new(set: impl Into<MotionSet>) -> Self {
        let set = set.into();
        let duration = set.duration();
        Self {
            set,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    pub fn set(&self) -> &MotionSet {
        &self.set
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Jump straight to the end.
    pub fn finish(&mut self) {
        self.elapsed = self.elapsed.max(self.duration);
    }

    /// Current matrix and alpha for a panel with `bounds`.
    pub fn transformation(&self, bounds: &Bounds) -> Transformation {
        if self.is_complete() {
            if self.set.holds_after_end() {
                return self.set.transformation_at(self.duration, bounds);
            }
            return Transformation::IDENTITY;
        }
        self.set.transformation_at(self.elapsed, bounds)
    }
}

impl Animation for MotionPlayer {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f64 {
        normalized(self.elapsed, self.duration)
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn overshoot(&self) -> Duration {
        self.elapsed.saturating_sub(self.duration)
    }

    fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Interpolator, Motion};
    use kurbo::Size;

    const MS_100: Duration = Duration::from_millis(100);

    fn bounds() -> Bounds {
        Bounds::new(Size::new(10.0, 10.0), Size::new(10.0, 10.0))
    }

    fn fade_in() -> MotionPlayer {
        MotionPlayer::new(Motion::alpha(0.0, 1.0, MS_100).interpolator(Interpolator::Linear))
    }

    #[test]
    fn progresses_and_completes() {
        let mut p = fade_in();
        assert!(!p.is_complete());
        p.tick(Duration::from_millis(40));
        assert!((p.value() - 0.4).abs() < 1e-9);
        assert!((p.transformation(&bounds()).alpha - 0.4).abs() < 1e-9);
        assert_eq!(p.remaining(), Duration::from_millis(60));
        p.tick(Duration::from_millis(70));
        assert!(p.is_complete());
        assert_eq!(p.overshoot(), Duration::from_millis(10));
    }

    #[test]
    fn completed_player_reverts_without_fill() {
        let mut p = MotionPlayer::new(Motion::alpha(1.0, 0.0, MS_100));
        p.finish();
        assert!(p.transformation(&bounds()).is_identity());
    }

    #[test]
    fn completed_player_holds_with_fill() {
        let set = MotionSet::from(Motion::alpha(1.0, 0.0, MS_100)).fill_after(true);
        let mut p = MotionPlayer::new(set);
        p.finish();
        assert!(p.transformation(&bounds()).alpha.abs() < 1e-9);
    }

    #[test]
    fn empty_set_is_complete_immediately() {
        let p = MotionPlayer::new(MotionSet::new());
        assert!(p.is_complete());
        assert_eq!(p.value(), 1.0);
    }

    #[test]
    fn reset_restarts() {
        let mut p = fade_in();
        p.tick(MS_100);
        p.reset();
        assert_eq!(p.elapsed(), Duration::ZERO);
        assert!(!p.is_complete());
    }
}
