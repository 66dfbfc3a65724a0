#![forbid(unsafe_code)]

//! Geometric primitives: panel margins/padding and motion bounds.

use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Sides for padding/margin, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Sides {
    pub left: u16,
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
}

impl Sides {
    /// Create new sides with equal values.
    pub const fn all(val: u16) -> Self {
        Self {
            left: val,
            top: val,
            right: val,
            bottom: val,
        }
    }

    /// Create new sides in `left, top, right, bottom` order.
    pub const fn new(left: u16, top: u16, right: u16, bottom: u16) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Sum of left and right.
    #[inline]
    pub const fn horizontal_sum(&self) -> u16 {
        self.left.saturating_add(self.right)
    }

    /// Sum of top and bottom.
    #[inline]
    pub const fn vertical_sum(&self) -> u16 {
        self.top.saturating_add(self.bottom)
    }
}

impl From<u16> for Sides {
    fn from(val: u16) -> Self {
        Self::all(val)
    }
}

impl From<(u16, u16, u16, u16)> for Sides {
    fn from((left, top, right, bottom): (u16, u16, u16, u16)) -> Self {
        Self::new(left, top, right, bottom)
    }
}

/// The two reference sizes a motion resolves against.
///
/// `own` is the animated panel's size, `parent` the surface the panels are
/// stacked in. Relative-to-self offsets and pivots scale by `own`,
/// relative-to-parent offsets scale by `parent`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub own: Size,
    pub parent: Size,
}

impl Bounds {
    pub const fn new(own: Size, parent: Size) -> Self {
        Self { own, parent }
    }

    /// Bounds of a match-parent panel inset by `margins` inside `surface`.
    pub fn inset(surface: Size, margins: Sides) -> Self {
        let width = (surface.width - f64::from(margins.horizontal_sum())).max(0.0);
        let height = (surface.height - f64::from(margins.vertical_sum())).max(0.0);
        Self {
            own: Size::new(width, height),
            parent: surface,
        }
    }

    /// Whether the animated panel has no area.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.own.width <= 0.0 || self.own.height <= 0.0
    }
}
