#![forbid(unsafe_code)]

//! Ordered groups of motions that play together and finish together.
//!
//! # Invariants
//!
//! 1. The set's duration is the longest member duration.
//! 2. Members are composed in insertion order: the first member is applied
//!    to the panel first, the last member is applied on top.
//! 3. A member shorter than the set contributes identity after it ends,
//!    unless its `fill_after` flag is set, in which case it holds its end.
//! 4. An empty set has zero duration and an identity transformation.

use std::time::Duration;

use super::{Motion, Transformation};
use crate::geometry::Bounds;

/// A collection of motions sharing one completion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MotionSet {
    motions: Vec<Motion>,
    fill_after: bool,
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl MotionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a motion (builder pattern).
    #[must_use]
    pub fn with(mut self, motion: Motion) -> Self {
        self.motions.push(motion);
        self
    }

    /// Add a motion when `condition` holds.
    #[must_use]
    pub fn with_if(self, condition: bool, motion: impl FnOnce() -> Motion) -> Self {
        if condition { self.with(motion()) } else { self }
    }

    pub fn push(&mut self, motion: Motion) {
        self.motions.push(motion);
    }

    /// Keep the final transformation once the whole set has finished.
    #[must_use]
    pub fn fill_after(mut self, fill_after: bool) -> Self {
        self.fill_after = fill_after;
        self
    }
}

impl From<Motion> for MotionSet {
    fn from(motion: Motion) -> Self {
        Self::new().with(motion)
    }
}

impl FromIterator<Motion> for MotionSet {
    fn from_iter<I: IntoIterator<Item = Motion>>(iter: I) -> Self {
        Self {
            motions: iter.into_iter().collect(),
            fill_after: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

impl MotionSet {
    pub fn motions(&self) -> &[Motion] {
        &self.motions
    }

    pub fn len(&self) -> usize {
        self.motions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motions.is_empty()
    }

    pub fn holds_after_end(&self) -> bool {
        self.fill_after
    }

    /// Longest member duration.
    pub fn duration(&self) -> Duration {
        self.motions
            .iter()
            .map(|m| m.duration)
            .max()
            .unwrap_or(Duration::ZERO)
    }

    /// Composite transformation `elapsed` after the set started.
    pub fn transformation_at(&self, elapsed: Duration, bounds: &Bounds) -> Transformation {
        self.motions
            .iter()
            .filter(|m| elapsed <= m.duration || m.fill_after)
            .fold(Transformation::IDENTITY, |acc, m| {
                acc.then(m.transformation_at(elapsed, bounds))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Interpolator, Pivot};
    use kurbo::{Point, Size};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn bounds() -> Bounds {
        Bounds::new(Size::new(100.0, 100.0), Size::new(100.0, 100.0))
    }

    #[test]
    fn empty_set_is_identity() {
        let set = MotionSet::new();
        assert!(set.is_empty());
        assert_eq!(set.duration(), Duration::ZERO);
        assert!(set.transformation_at(ms(10), &bounds()).is_identity());
    }

    #[test]
    fn duration_is_longest_member() {
        let set = MotionSet::new()
            .with(Motion::alpha(0.0, 1.0, ms(300)))
            .with(Motion::alpha(0.0, 1.0, ms(500)));
        assert_eq!(set.duration(), ms(500));
    }

    #[test]
    fn expired_member_reverts_unless_filled() {
        let shrink = Motion::scale(1.0, 0.5, 1.0, 0.5, Pivot::TOP_LEFT, ms(80))
            .interpolator(Interpolator::Linear);
        let fade = Motion::alpha(1.0, 0.0, ms(100)).interpolator(Interpolator::Linear);

        let plain = MotionSet::new().with(shrink).with(fade);
        let t = plain.transformation_at(ms(90), &bounds());
        assert!(((t.matrix * Point::new(10.0, 0.0)).x - 10.0).abs() < 1e-9);

        let held = MotionSet::new().with(shrink.fill_after(true)).with(fade);
        let t = held.transformation_at(ms(90), &bounds());
        assert!(((t.matrix * Point::new(10.0, 0.0)).x - 5.0).abs() < 1e-9);
    }

    #[test]
    fn members_compose_first_to_last() {
        let set = MotionSet::new()
            .with(Motion::scale(2.0, 2.0, 2.0, 2.0, Pivot::TOP_LEFT, ms(10)))
            .with(Motion::translate(
                crate::animation::Offset::absolute(5.0),
                crate::animation::Offset::absolute(5.0),
                crate::animation::Offset::absolute(0.0),
                crate::animation::Offset::absolute(0.0),
                ms(10),
            ));
        let t = set.transformation_at(ms(5), &bounds());
        assert!(((t.matrix * Point::new(1.0, 0.0)).x - 7.0).abs() < 1e-9);
    }
}
