#![forbid(unsafe_code)]

//! The transition engine: request arbitration and the generic stepper.
//!
//! The engine decides, for each accepted navigation request, which panels
//! animate, in which order, and when the lifecycle notifications fire. It
//! owns its [`EngineState`] exclusively and borrows the [`PanelStack`] for
//! each call.
//!
//! # State machine
//!
//! ```text
//! Idle --accept--> Stepping --step == target--> Terminal --carrier ends--> Idle
//!                     ^   |
//!                     +---+ after the strategy's delay, step moves by one
//! ```
//!
//! A request is accepted synchronously and its first step runs before
//! [`TransitionEngine::request_navigate`] returns. Later steps and motion
//! completions happen inside [`TransitionEngine::tick`], which the host
//! calls with elapsed time.
//!
//! # Invariants
//!
//! 1. `current` is `None` exactly in the out state.
//! 2. While `blocked`, every request is rejected without side effects.
//! 3. `step` moves one position per step toward `target` and stops there.
//! 4. `switch-started`, `target-reached` and `animation-ends` fire at most
//!    once per request, in that order.
//! 5. `None` and `Fade` never leave the engine blocked; every other strategy
//!    stays blocked until the terminal step's carrier ends.
//!
//! # Failure Modes
//!
//! - A carrier with no panel or no motion completes immediately.
//! - A motion replaced by a newer motion on the same panel completes
//!   immediately.
//! - Motions on a removed panel complete immediately.
//! - [`TransitionEngine::reset`] drops everything in flight without
//!   notifications.

use std::fmt;
use std::time::Duration;

use fstack_core::animation::Transformation;
use fstack_core::geometry::Bounds;

use crate::config::{SwitchConfig, SwitchSpeed, SwitchStrategy};
use crate::listener::SwitchListener;
use crate::panel::{PanelId, Visibility};
use crate::panel_stack::PanelStack;
use crate::runner::{Completion, Finished, MotionRunner, Terminal};
use crate::strategy::{self, Direction, Side, StepPlan};
use crate::timing::Timing;

/// Position value of the out state.
const OUT: isize = -1;

fn signed(position: usize) -> isize {
    isize::try_from(position).unwrap_or(isize::MAX)
}

fn unsigned(position: isize) -> Option<usize> {
    usize::try_from(position).ok()
}

// ---------------------------------------------------------------------------
// Requests and state
// ---------------------------------------------------------------------------

/// Where a navigation request goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavTarget {
    Position(usize),
    /// No panel current.
    Out,
}

/// A single navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NavRequest {
    pub target: NavTarget,
    /// Jump straight to the target instead of visiting every position between.
    pub fast: bool,
    /// Collapse the surface once an exit finishes.
    pub collapse_on_exit: bool,
}

impl NavRequest {
    /// Stepped navigation to `position`.
    pub const fn to(position: usize) -> Self {
        Self {
            target: NavTarget::Position(position),
            fast: false,
            collapse_on_exit: false,
        }
    }

    /// Single-hop navigation to `position`.
    pub const fn fast_to(position: usize) -> Self {
        Self {
            target: NavTarget::Position(position),
            fast: true,
            collapse_on_exit: false,
        }
    }

    /// Navigation to the out state.
    pub const fn out(fast: bool, collapse_on_exit: bool) -> Self {
        Self {
            target: NavTarget::Out,
            fast,
            collapse_on_exit,
        }
    }

    pub const fn is_exit(&self) -> bool {
        matches!(self.target, NavTarget::Out)
    }
}

/// Lifecycle phase of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// No request in flight.
    #[default]
    Idle,
    /// Intermediate steps remain.
    Stepping,
    /// The terminal step has run; waiting for its carrier.
    Terminal,
}

/// Everything the engine tracks between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineState {
    pub current: Option<PanelId>,
    /// Panel the next step vacates.
    pub previous: Option<PanelId>,
    /// Target position, `-1` for out.
    pub target: isize,
    /// Position the next step brings in.
    pub step: isize,
    pub direction: Direction,
    pub blocked: bool,
    pub exit_requested: bool,
    pub collapse_on_exit: bool,
    pub phase: Phase,
}

impl Default for EngineState {
    fn default() -> Self {
        Self {
            current: None,
            previous: None,
            target: OUT,
            step: OUT,
            direction: Direction::Forward,
            blocked: false,
            exit_requested: false,
            collapse_on_exit: false,
            phase: Phase::Idle,
        }
    }
}

/// A pending `target-reached` notification.
#[derive(Debug, Clone, Copy)]
struct Arrival {
    request: u64,
    panel: Option<PanelId>,
    position: Option<usize>,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Drives panel switches for one [`PanelStack`].
pub struct TransitionEngine {
    state: EngineState,
    config: SwitchConfig,
    /// Configuration snapshot of the request in flight.
    active: SwitchConfig,
    request: u64,
    /// Time left until the next step.
    timer: Option<Duration>,
    runner: MotionRunner,
    arrivals: Vec<Arrival>,
    listener: Option<Box<dyn SwitchListener>>,
}

impl fmt::Debug for TransitionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionEngine")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("request", &self.request)
            .field("timer", &self.timer)
            .field("running", &self.runner.is_running())
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl Default for TransitionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SwitchConfig::default())
    }

    #[must_use]
    pub fn with_config(config: SwitchConfig) -> Self {
        Self {
            state: EngineState::default(),
            config,
            active: config,
            request: 0,
            timer: None,
            runner: MotionRunner::default(),
            arrivals: Vec::new(),
            listener: None,
        }
    }

    // -----------------------------------------------------------------------
    // Configuration and listener
    // -----------------------------------------------------------------------

    pub fn config(&self) -> &SwitchConfig {
        &self.config
    }

    /// Takes effect from the next accepted request.
    pub fn set_config(&mut self, config: SwitchConfig) {
        self.config = config;
    }

    pub fn set_strategy(&mut self, strategy: SwitchStrategy, scale_modifier: bool) {
        self.config.strategy = strategy;
        self.config.scale_modifier = scale_modifier;
    }

    pub fn set_speed(&mut self, speed: SwitchSpeed) {
        self.config.speed = speed;
    }

    pub fn set_listener(&mut self, listener: impl SwitchListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn is_blocked(&self) -> bool {
        self.state.blocked
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn current(&self) -> Option<PanelId> {
        self.state.current
    }

    pub fn is_out(&self) -> bool {
        self.state.current.is_none()
    }

    pub fn current_position(&self, panels: &PanelStack) -> Option<usize> {
        self.state.current.and_then(|id| panels.position_of(id))
    }

    /// No motion running and no step pending.
    pub fn is_idle(&self) -> bool {
        self.timer.is_none() && !self.runner.is_running()
    }

    /// Time until the next motion completion or step, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        match (self.runner.next_due(), self.timer) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Matrix and alpha of `panel` right now.
    pub fn transformation(&self, panel: PanelId, bounds: &Bounds) -> Transformation {
        self.runner.transformation(panel, bounds)
    }

    pub fn is_animating(&self, panel: PanelId) -> bool {
        self.runner.is_animating(panel)
    }

    // -----------------------------------------------------------------------
    // Request arbitration
    // -----------------------------------------------------------------------

    /// Accept or reject a navigation request.
    ///
    /// Returns `false`, with no side effects, when the engine is blocked,
    /// when the target position does not exist, or when the target is
    /// already current. Otherwise fires `switch-started`, runs the first
    /// step and returns `true`.
    pub fn request_navigate(&mut self, panels: &mut PanelStack, request: NavRequest) -> bool {
        let _span = fstack_core::debug_span!(
            "fstack.navigate",
            to = ?request.target,
            fast = request.fast,
            strategy = ?self.config.strategy
        )
        .entered();

        if self.state.blocked {
            fstack_core::debug!(reason = "blocked", "navigation rejected");
            return false;
        }

        let target = match request.target {
            NavTarget::Position(position) if position < panels.len() => signed(position),
            NavTarget::Position(_) => {
                fstack_core::debug!(
                    reason = "out_of_range",
                    to = ?request.target,
                    len = panels.len(),
                    "navigation rejected"
                );
                return false;
            }
            NavTarget::Out => OUT,
        };
        let from = self.current_position(panels).map_or(OUT, signed);
        if from == target {
            fstack_core::debug!(reason = "already_current", position = target, "navigation rejected");
            return false;
        }

        self.request += 1;
        self.active = self.config;
        let fast = request.fast || self.active.strategy.forces_fast();
        let direction = Direction::between(from, target);
        let previous = self.state.current;

        panels.set_surface_visibility(Visibility::Visible);
        self.timer = None;
        self.state.previous = previous;
        self.state.target = target;
        self.state.direction = direction;
        self.state.step = if fast { target } else { from + direction.sign() };
        self.state.exit_requested = request.is_exit();
        self.state.collapse_on_exit = request.collapse_on_exit;
        self.state.blocked = self.active.strategy.blocks();
        self.state.phase = Phase::Stepping;

        fstack_core::info!(
            request = self.request,
            from,
            to = target,
            fast,
            strategy = ?self.active.strategy,
            "navigation accepted"
        );

        if let Some(listener) = self.listener.as_mut() {
            let panel = previous.and_then(|id| panels.panel(id));
            let position = previous.and_then(|id| panels.position_of(id));
            listener.on_switch_started(panel, position);
        }

        self.state.current = unsigned(target).and_then(|p| panels.id_at(p));
        self.run_step(panels);
        true
    }

    // -----------------------------------------------------------------------
    // Stepper
    // -----------------------------------------------------------------------

    fn run_step(&mut self, panels: &mut PanelStack) {
        let request = self.request;
        let step = self.state.step;
        let terminal = step == self.state.target;
        let incoming = unsigned(step).and_then(|p| panels.id_at(p));
        let outgoing = self.state.previous.filter(|&id| panels.is_attached(id));

        if terminal {
            self.state.phase = Phase::Terminal;
        } else {
            self.state.step += self.state.direction.sign();
        }
        fstack_core::debug!(request, step, to = self.state.target, terminal, "step");

        let timing = Timing::for_switch(self.active.strategy, self.active.speed);
        let StepPlan {
            incoming: incoming_set,
            outgoing: outgoing_set,
            carrier,
        } = strategy::plan(&self.active, timing, self.state.direction);
        let carrier = carrier.resolve(outgoing.is_some());
        let completion = Completion {
            request,
            vacated: outgoing,
            terminal: terminal.then_some(Terminal {
                is_exit: self.state.exit_requested,
                collapse_surface: self.state.exit_requested && self.state.collapse_on_exit,
            }),
        };

        // Carrier start: the incoming panel shows and becomes the next to vacate.
        if let Some(id) = incoming {
            panels.set_visibility(id, Visibility::Visible);
        }
        self.state.previous = incoming;

        if terminal {
            self.arrivals.push(Arrival {
                request,
                panel: self.state.current,
                position: unsigned(self.state.target),
            });
        }

        let mut ended = Vec::new();
        let mut carried = false;
        let mut settling = false;
        for (side, panel, set) in [
            (Side::Incoming, incoming, incoming_set),
            (Side::Outgoing, outgoing, outgoing_set),
        ] {
            let (Some(panel), Some(set)) = (panel, set) else {
                continue;
            };
            let is_carrier = side == carrier;
            let settles = terminal && side == Side::Incoming;
            carried |= is_carrier;
            settling |= settles;
            ended.extend(self.runner.start(
                panel,
                set,
                request,
                is_carrier.then_some(completion),
                settles,
            ));
        }

        // Motions cut short on a restarted panel belong to older requests and
        // report before this step's arrival.
        let (stale, own): (Vec<_>, Vec<_>) = ended.into_iter().partition(|f| f.request != request);
        for finished in stale {
            self.apply(panels, finished);
        }
        if terminal && !settling {
            self.fire_arrival(panels, request);
        }
        for finished in own {
            self.apply(panels, finished);
        }
        if !carried {
            fstack_core::debug!(request, "no carrier motion, completing step immediately");
            self.apply(
                panels,
                Finished {
                    request,
                    panel: None,
                    completion: Some(completion),
                    settles: false,
                },
            );
        }

        if !terminal {
            self.timer = Some(timing.delay);
        }
    }

    fn apply(&mut self, panels: &mut PanelStack, finished: Finished) {
        if finished.settles {
            self.fire_arrival(panels, finished.request);
        }
        let Some(completion) = finished.completion else {
            return;
        };
        fstack_core::trace!(
            request = completion.request,
            panel = ?finished.panel,
            terminal = completion.terminal.is_some(),
            "carrier finished"
        );

        // A newer request may have made the vacated panel current again.
        if let Some(id) = completion.vacated.filter(|&id| Some(id) != self.state.current) {
            panels.set_visibility(id, Visibility::Collapsed);
        }

        let Some(end) = completion.terminal else {
            return;
        };
        self.fire_arrival(panels, completion.request);
        if completion.request == self.request {
            self.state.blocked = false;
            self.state.phase = Phase::Idle;
        }
        fstack_core::debug!(request = completion.request, is_out = end.is_exit, "switch finished");
        if let Some(listener) = self.listener.as_mut() {
            listener.on_animation_ends(end.is_exit);
        }
        // Only the latest request decides the surface; a newer one may have
        // shown a panel since this exit started.
        if end.collapse_surface && completion.request == self.request {
            panels.set_surface_visibility(Visibility::Collapsed);
        }
    }

    fn fire_arrival(&mut self, panels: &PanelStack, request: u64) {
        let Some(index) = self.arrivals.iter().position(|a| a.request == request) else {
            return;
        };
        let arrival = self.arrivals.remove(index);
        if let Some(listener) = self.listener.as_mut() {
            listener.on_target_reached(arrival.panel.and_then(|id| panels.panel(id)), arrival.position);
        }
    }

    // -----------------------------------------------------------------------
    // Clock
    // -----------------------------------------------------------------------

    /// Advance host time by `dt`.
    ///
    /// `dt` is split at every motion end and step so events fire in time
    /// order. Motion ends due at the same instant as a step run first.
    pub fn tick(&mut self, panels: &mut PanelStack, dt: Duration) {
        let _span = fstack_core::debug_span!(
            "fstack.tick",
            dt_us = u64::try_from(dt.as_micros()).unwrap_or(u64::MAX),
            phase = ?self.state.phase
        )
        .entered();

        let mut left = dt;
        loop {
            let Some(due) = self.next_deadline().filter(|&due| due <= left) else {
                self.advance(left);
                return;
            };
            self.advance(due);
            left -= due;

            for finished in self.runner.take_finished() {
                self.apply(panels, finished);
            }
            if self.timer == Some(Duration::ZERO) {
                self.timer = None;
                self.run_step(panels);
            }
        }
    }

    fn advance(&mut self, dt: Duration) {
        self.runner.advance(dt);
        if let Some(timer) = self.timer.as_mut() {
            *timer = timer.saturating_sub(dt);
        }
    }

    // -----------------------------------------------------------------------
    // Panel lifecycle hooks
    // -----------------------------------------------------------------------

    /// Finish every motion on a panel that left the stack.
    pub fn panel_removed(&mut self, panels: &mut PanelStack, panel: PanelId) {
        let ended = self.runner.detach(panel);
        if !ended.is_empty() {
            fstack_core::debug!(%panel, count = ended.len(), "completing motions of removed panel");
        }
        for finished in ended {
            self.apply(panels, finished);
        }
        if self.state.previous == Some(panel) {
            self.state.previous = None;
        }
    }

    /// Drop the current panel without navigating.
    pub fn forget_current(&mut self) {
        self.state.current = None;
    }

    /// Cancel everything in flight without notifications and return to the
    /// out state.
    pub fn reset(&mut self) {
        fstack_core::info!(request = self.request, blocked = self.state.blocked, "engine reset");
        self.runner.cancel_all();
        self.arrivals.clear();
        self.timer = None;
        self.state = EngineState::default();
    }
}
