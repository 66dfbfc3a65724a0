#![forbid(unsafe_code)]

//! Per-strategy motion durations and step delays.

use std::time::Duration;

use crate::config::{SwitchSpeed, SwitchStrategy};

/// Duration of each step's motions and the delay before the next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Timing {
    pub duration: Duration,
    pub delay: Duration,
}

impl Timing {
    pub const INSTANT: Self = Self {
        duration: Duration::ZERO,
        delay: Duration::ZERO,
    };

    const fn ms(duration: u64, delay: u64) -> Self {
        Self {
            duration: Duration::from_millis(duration),
            delay: Duration::from_millis(delay),
        }
    }

    /// Timing table lookup.
    pub const fn for_switch(strategy: SwitchStrategy, speed: SwitchSpeed) -> Self {
        use SwitchSpeed::{Fast, Normal, Slow};
        use SwitchStrategy as S;

        match (strategy, speed) {
            (S::None, _) => Self::INSTANT,
            (S::Fade | S::Scale, Fast) => Self::ms(350, 140),
            (S::Fade | S::Scale, Normal) => Self::ms(600, 240),
            (S::Fade | S::Scale, Slow) => Self::ms(1000, 400),
            (S::Swipe | S::ScrollVertical | S::ScrollHorizontal, Fast) => Self::ms(200, 200),
            (S::Swipe | S::ScrollVertical | S::ScrollHorizontal, Normal) => Self::ms(400, 400),
            (S::Swipe | S::ScrollVertical | S::ScrollHorizontal, Slow) => Self::ms(600, 600),
            (S::MoveRight | S::MoveBottom | S::MoveLeft | S::MoveTop, Fast) => Self::ms(350, 140),
            (S::MoveRight | S::MoveBottom | S::MoveLeft | S::MoveTop, Normal) => {
                Self::ms(500, 200)
            }
            (S::MoveRight | S::MoveBottom | S::MoveLeft | S::MoveTop, Slow) => Self::ms(800, 300),
        }
    }
}
