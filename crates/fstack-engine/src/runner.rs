#![forbid(unsafe_code)]

//! Running motions, one track per panel.
//!
//! The runner only keeps time. It never touches panels or listeners; when a
//! track ends it hands back a [`Finished`] record and the engine applies it.
//!
//! # Invariants
//!
//! 1. At most one track exists per panel. Starting a motion on a panel that
//!    is still animating finishes the old track immediately.
//! 2. A motion set with zero duration never becomes a running track; it
//!    finishes as soon as it starts.
//! 3. Finished tracks are reported in the order they were started.

use std::time::Duration;

use fstack_core::animation::{Animation, MotionPlayer, MotionSet, Transformation};
use fstack_core::geometry::Bounds;

use crate::panel::PanelId;

/// What the end of a request's last motion must do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Terminal {
    pub is_exit: bool,
    pub collapse_surface: bool,
}

/// Completion attached to the carrier motion of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Completion {
    pub request: u64,
    /// Panel vacated by the step; collapsed when the carrier ends.
    pub vacated: Option<PanelId>,
    pub terminal: Option<Terminal>,
}

/// A track that ended, to be applied by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Finished {
    pub request: u64,
    pub panel: Option<PanelId>,
    pub completion: Option<Completion>,
    /// The track was the terminal step's incoming motion.
    pub settles: bool,
}

#[derive(Debug, Clone)]
struct Track {
    panel: PanelId,
    player: MotionPlayer,
    request: u64,
    completion: Option<Completion>,
    settles: bool,
    /// Ended, kept only to hold a fill-after end state.
    resting: bool,
}

impl Track {
    fn finished(&self) -> Finished {
        Finished {
            request: self.request,
            panel: Some(self.panel),
            completion: self.completion,
            settles: self.settles,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct MotionRunner {
    tracks: Vec<Track>,
}

impl MotionRunner {
    /// Start `set` on `panel`. Returns every track that ended because of it,
    /// including the new one if it has no duration.
    pub fn start(
        &mut self,
        panel: PanelId,
        set: MotionSet,
        request: u64,
        completion: Option<Completion>,
        settles: bool,
    ) -> Vec<Finished> {
        let mut ended = self.detach(panel);
        let track = Track {
            panel,
            player: MotionPlayer::new(set),
            request,
            completion,
            settles,
            resting: false,
        };
        if track.player.is_complete() {
            ended.push(track.finished());
            if track.player.set().holds_after_end() {
                self.tracks.push(Track {
                    resting: true,
                    ..track
                });
            }
        } else {
            self.tracks.push(track);
        }
        ended
    }

    /// Drop every track on `panel`; running ones are reported as finished.
    pub fn detach(&mut self, panel: PanelId) -> Vec<Finished> {
        let mut ended = Vec::new();
        self.tracks.retain(|t| {
            if t.panel != panel {
                return true;
            }
            if !t.resting {
                ended.push(t.finished());
            }
            false
        });
        ended
    }

    /// Drop everything without reporting.
    pub fn cancel_all(&mut self) {
        self.tracks.clear();
    }

    /// Time until the earliest running track ends.
    pub fn next_due(&self) -> Option<Duration> {
        self.tracks
            .iter()
            .filter(|t| !t.resting)
            .map(|t| t.player.remaining())
            .min()
    }

    pub fn advance(&mut self, dt: Duration) {
        for track in self.tracks.iter_mut().filter(|t| !t.resting) {
            track.player.tick(dt);
        }
    }

    /// Collect tracks that have reached their end.
    pub fn take_finished(&mut self) -> Vec<Finished> {
        let mut ended = Vec::new();
        self.tracks.retain_mut(|t| {
            if t.resting || !t.player.is_complete() {
                return true;
            }
            ended.push(t.finished());
            if t.player.set().holds_after_end() {
                t.resting = true;
                return true;
            }
            false
        });
        ended
    }

    pub fn is_running(&self) -> bool {
        self.tracks.iter().any(|t| !t.resting)
    }

    pub fn is_animating(&self, panel: PanelId) -> bool {
        self.tracks.iter().any(|t| t.panel == panel && !t.resting)
    }

    /// Current transformation of `panel`, identity when nothing applies.
    pub fn transformation(&self, panel: PanelId, bounds: &Bounds) -> Transformation {
        self.tracks
            .iter()
            .find(|t| t.panel == panel)
            .map_or(Transformation::IDENTITY, |t| t.player.transformation(bounds))
    }
}
