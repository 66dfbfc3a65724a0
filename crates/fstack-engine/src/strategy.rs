#![forbid(unsafe_code)]

//! Strategy descriptors: which motions a single step plays.
//!
//! Every strategy is reduced to a [`StepPlan`]: an optional motion set for
//! the incoming panel (the one at the step position), an optional set for
//! the outgoing panel (the one being vacated), and the [`Carrier`] that owns
//! the step's completion. The engine runs every strategy through the same
//! stepper; only the plan differs.
//!
//! | Strategy | Forward | Backward | Carrier |
//! |---|---|---|---|
//! | None | nothing | nothing | immediate |
//! | Fade | incoming fades in | outgoing fades out | the animated one |
//! | Scale | incoming grows | outgoing shrinks | the animated one |
//! | Swipe | both, incoming from the right | both, mirrored | outgoing, else incoming |
//! | Move* | incoming enters from the side | outgoing leaves to the side | the animated one |
//! | Scroll* | both, from bottom/right | both, mirrored | outgoing, else incoming |

use std::time::Duration;

use fstack_core::animation::{MotionLibrary, MotionSet};

use crate::config::{SwitchConfig, SwitchStrategy};
use crate::timing::Timing;

/// Direction of travel through positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    /// Direction from `from` to `to`; equal positions count as backward.
    pub const fn between(from: isize, to: isize) -> Self {
        if from < to {
            Self::Forward
        } else {
            Self::Backward
        }
    }

    pub const fn sign(self) -> isize {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// Which motion of a step owns the step's completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Carrier {
    Incoming,
    Outgoing,
    /// Outgoing when there is an outgoing panel, otherwise incoming.
    OutgoingElseIncoming,
}

/// The side a carrier resolved to for one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Incoming,
    Outgoing,
}

impl Carrier {
    pub const fn resolve(self, has_outgoing: bool) -> Side {
        match self {
            Self::Incoming => Side::Incoming,
            Self::Outgoing => Side::Outgoing,
            Self::OutgoingElseIncoming => {
                if has_outgoing {
                    Side::Outgoing
                } else {
                    Side::Incoming
                }
            }
        }
    }
}

/// Motions for one step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepPlan {
    pub incoming: Option<MotionSet>,
    pub outgoing: Option<MotionSet>,
    pub carrier: Carrier,
}

impl StepPlan {
    fn incoming(set: MotionSet) -> Self {
        Self {
            incoming: Some(set),
            outgoing: None,
            carrier: Carrier::Incoming,
        }
    }

    fn outgoing(set: MotionSet) -> Self {
        Self {
            incoming: None,
            outgoing: Some(set),
            carrier: Carrier::Outgoing,
        }
    }

    fn both(incoming: MotionSet, outgoing: MotionSet) -> Self {
        Self {
            incoming: Some(incoming),
            outgoing: Some(outgoing),
            carrier: Carrier::OutgoingElseIncoming,
        }
    }
}

/// Build the plan for one step of `config.strategy`.
pub fn plan(config: &SwitchConfig, timing: Timing, direction: Direction) -> StepPlan {
    let lib = MotionLibrary::with_interpolator(config.strategy.interpolator());
    let d = timing.duration;
    let m = config.scale_modifier;
    let fwd = direction == Direction::Forward;

    match config.strategy {
        SwitchStrategy::None => StepPlan {
            incoming: None,
            outgoing: None,
            carrier: Carrier::Incoming,
        },
        SwitchStrategy::Fade if fwd => StepPlan::incoming(
            MotionSet::new()
                .with_if(m, || lib.scale_from_0_to_1(d, false))
                .with(lib.show(d, false)),
        ),
        SwitchStrategy::Fade => StepPlan::outgoing(
            MotionSet::new()
                .with_if(m, || lib.scale_from_1_to_0(d, false))
                .with(lib.hide(d, false)),
        ),
        SwitchStrategy::Scale if fwd => StepPlan::incoming(lib.scale_from_0_to_1(d, false).into()),
        SwitchStrategy::Scale => StepPlan::outgoing(lib.scale_from_1_to_0(d, false).into()),
        SwitchStrategy::Swipe => swipe(&lib, d, m, fwd),
        SwitchStrategy::MoveRight
        | SwitchStrategy::MoveBottom
        | SwitchStrategy::MoveLeft
        | SwitchStrategy::MoveTop => movement(&lib, config.strategy, d, m, fwd),
        SwitchStrategy::ScrollVertical | SwitchStrategy::ScrollHorizontal => {
            scroll(&lib, config.strategy, d, m, fwd)
        }
    }
}

fn swipe(lib: &MotionLibrary, d: Duration, m: bool, fwd: bool) -> StepPlan {
    // Incoming pivots on the leading bottom corner, outgoing on the trailing one.
    let (lead, trail, tilt) = if fwd {
        ((1.0, 1.0), (0.0, 1.0), 20.0)
    } else {
        ((0.0, 1.0), (1.0, 1.0), -20.0)
    };
    let shrink = d * 4 / 5;

    let incoming = MotionSet::new()
        .with_if(m, || lib.scale_uniform(0.3, 1.0, lead, d, false))
        .with(if fwd {
            lib.from_right_of_parent(d, false)
        } else {
            lib.from_left_of_parent(d, false)
        })
        .with(lib.rotate(tilt, 0.0, 0.5, 1.0, d, false))
        .with_if(m, || lib.scale_uniform(0.3, 1.0, (0.5, 0.5), d, false));

    let outgoing = MotionSet::new()
        .with_if(m, || lib.scale_uniform(1.0, 0.2, trail, shrink, true))
        .with(if fwd {
            lib.to_left_of_parent(d, false)
        } else {
            lib.to_right_of_parent(d, false)
        })
        .with(lib.rotate(0.0, -tilt, 0.5, 1.0, d, false))
        .with_if(m, || lib.scale_uniform(1.0, 0.3, (0.5, 0.5), d, false));

    StepPlan::both(incoming, outgoing)
}

fn movement(
    lib: &MotionLibrary,
    strategy: SwitchStrategy,
    d: Duration,
    m: bool,
    fwd: bool,
) -> StepPlan {
    let pivot = match strategy {
        SwitchStrategy::MoveBottom => (0.5, 1.0),
        SwitchStrategy::MoveLeft => (0.0, 0.5),
        SwitchStrategy::MoveTop => (0.5, 0.0),
        _ => (1.0, 0.5),
    };
    if fwd {
        let enter = match strategy {
            SwitchStrategy::MoveBottom => lib.from_bottom_of_parent(d, false),
            SwitchStrategy::MoveLeft => lib.from_left_of_parent(d, false),
            SwitchStrategy::MoveTop => lib.from_top_of_parent(d, false),
            _ => lib.from_right_of_parent(d, false),
        };
        StepPlan::incoming(
            MotionSet::new()
                .with(enter)
                .with_if(m, || lib.scale_uniform(0.6, 1.0, pivot, d, false)),
        )
    } else {
        let leave = match strategy {
            SwitchStrategy::MoveBottom => lib.to_bottom_of_parent(d, false),
            SwitchStrategy::MoveLeft => lib.to_left_of_parent(d, false),
            SwitchStrategy::MoveTop => lib.to_top_of_parent(d, false),
            _ => lib.to_right_of_parent(d, false),
        };
        StepPlan::outgoing(
            MotionSet::new()
                .with(leave)
                .with_if(m, || lib.scale_uniform(1.0, 0.6, pivot, d, false)),
        )
    }
}

fn scroll(
    lib: &MotionLibrary,
    strategy: SwitchStrategy,
    d: Duration,
    m: bool,
    fwd: bool,
) -> StepPlan {
    let vertical = strategy == SwitchStrategy::ScrollVertical;
    let (enter, leave, enter_pivot, leave_pivot) = match (vertical, fwd) {
        (true, true) => (
            lib.from_bottom_of_parent(d, false),
            lib.to_top_of_parent(d, false),
            (0.5, 1.0),
            (0.5, 0.0),
        ),
        (true, false) => (
            lib.from_top_of_parent(d, false),
            lib.to_bottom_of_parent(d, false),
            (0.5, 0.0),
            (0.5, 1.0),
        ),
        (false, true) => (
            lib.from_right_of_parent(d, false),
            lib.to_left_of_parent(d, false),
            (1.0, 0.5),
            (0.0, 0.5),
        ),
        (false, false) => (
            lib.from_left_of_parent(d, false),
            lib.to_right_of_parent(d, false),
            (0.0, 0.5),
            (1.0, 0.5),
        ),
    };

    StepPlan::both(
        MotionSet::new()
            .with(enter)
            .with_if(m, || lib.scale_uniform(0.7, 1.0, enter_pivot, d, false)),
        MotionSet::new()
            .with(leave)
            .with_if(m, || lib.scale_uniform(1.0, 0.7, leave_pivot, d, false)),
    )
}
