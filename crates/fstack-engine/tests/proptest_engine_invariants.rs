//! Property-based invariant tests for the transition engine.
//!
//! These hold for any strategy and any interleaving of requests and ticks:
//!
//! 1. A request made while blocked is rejected and changes nothing.
//! 2. Out-of-range positions are always rejected.
//! 3. Every accepted request fires exactly one start, one target-reached and
//!    one animation-end once the engine is idle again.
//! 4. The step position only moves toward the target.
//! 5. Once idle, the engine is unblocked and rests on the last accepted target.

use std::time::Duration;

use fstack_engine::{
    EngineState, EventLog, NavRequest, NavTarget, PanelStack, Phase, SwitchConfig, SwitchEvent,
    SwitchSpeed, SwitchStrategy, TransitionEngine,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum Op {
    Go(usize),
    GoFast(usize),
    Out(bool),
    Tick(u64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..10).prop_map(Op::Go),
        (0usize..10).prop_map(Op::GoFast),
        any::<bool>().prop_map(Op::Out),
        (0u64..900).prop_map(Op::Tick),
    ]
}

fn strategy() -> impl Strategy<Value = SwitchStrategy> {
    proptest::sample::select(SwitchStrategy::ALL.to_vec())
}

fn speed() -> impl Strategy<Value = SwitchSpeed> {
    prop_oneof![
        Just(SwitchSpeed::Slow),
        Just(SwitchSpeed::Normal),
        Just(SwitchSpeed::Fast),
    ]
}

fn setup(
    panels: usize,
    strategy: SwitchStrategy,
    speed: SwitchSpeed,
    modifier: bool,
) -> (TransitionEngine, PanelStack, EventLog) {
    let mut stack = PanelStack::new();
    for _ in 0..panels {
        stack.push(None);
    }
    let config = SwitchConfig::new(strategy)
        .speed(speed)
        .scale_modifier(modifier);
    let mut engine = TransitionEngine::with_config(config);
    let log = EventLog::new();
    engine.set_listener(log.clone());
    (engine, stack, log)
}

fn settle(engine: &mut TransitionEngine, panels: &mut PanelStack) -> bool {
    for _ in 0..2000 {
        if engine.is_idle() {
            return true;
        }
        engine.tick(panels, Duration::from_millis(16));
    }
    false
}

fn count(events: &[SwitchEvent], f: impl Fn(&SwitchEvent) -> bool) -> usize {
    events.iter().filter(|&e| f(e)).count()
}

fn distance(state: &EngineState) -> isize {
    (state.target - state.step).abs()
}

// ═════════════════════════════════════════════════════════════════════════
// Request serialization and callbacks
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn requests_serialize_and_callbacks_balance(
        panels in 1usize..7,
        strategy in strategy(),
        speed in speed(),
        modifier in any::<bool>(),
        ops in proptest::collection::vec(op(), 1..40),
    ) {
        let (mut engine, mut stack, log) = setup(panels, strategy, speed, modifier);
        let mut accepted = 0usize;
        let mut last: Option<NavTarget> = None;

        for op in ops {
            let request = match op {
                Op::Tick(ms) => {
                    engine.tick(&mut stack, Duration::from_millis(ms));
                    prop_assert_eq!(engine.is_out(), engine.current_position(&stack).is_none());
                    continue;
                }
                Op::Go(p) => NavRequest::to(p),
                Op::GoFast(p) => NavRequest::fast_to(p),
                Op::Out(fast) => NavRequest::out(fast, false),
            };

            let before = engine.state().clone();
            let events_before = log.len();
            let ok = engine.request_navigate(&mut stack, request);

            if before.blocked {
                prop_assert!(!ok);
                prop_assert_eq!(engine.state(), &before);
                prop_assert_eq!(log.len(), events_before);
            }
            if let NavTarget::Position(p) = request.target {
                if p >= panels {
                    prop_assert!(!ok, "position {} accepted with {} panels", p, panels);
                }
            }
            if ok {
                accepted += 1;
                last = Some(request.target);
            }
        }

        prop_assert!(settle(&mut engine, &mut stack), "engine never went idle");
        prop_assert!(!engine.is_blocked());
        prop_assert_eq!(engine.phase(), Phase::Idle);

        let events = log.drain();
        let started = count(&events, |e| matches!(e, SwitchEvent::SwitchStarted { .. }));
        let reached = count(&events, |e| matches!(e, SwitchEvent::TargetReached { .. }));
        let ended = count(&events, |e| matches!(e, SwitchEvent::AnimationEnds { .. }));
        prop_assert_eq!(started, accepted);
        prop_assert_eq!(reached, accepted);
        prop_assert_eq!(ended, accepted);

        match last {
            Some(NavTarget::Position(p)) => {
                prop_assert_eq!(engine.current_position(&stack), Some(p));
            }
            Some(NavTarget::Out) | None => {
                prop_assert!(engine.is_out());
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Stepping
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn step_moves_monotonically_toward_target(
        panels in 2usize..9,
        from in 0usize..8,
        to in 0usize..8,
        strategy in strategy(),
        dts in proptest::collection::vec(1u64..300, 1..80),
    ) {
        let from = from % panels;
        let to = to % panels;
        prop_assume!(from != to);
        let (mut engine, mut stack, log) = setup(panels, strategy, SwitchSpeed::Fast, false);
        prop_assert!(engine.request_navigate(&mut stack, NavRequest::fast_to(from)));
        prop_assert!(settle(&mut engine, &mut stack));
        log.drain();

        prop_assert!(engine.request_navigate(&mut stack, NavRequest::to(to)));
        let mut gap = distance(engine.state());
        for dt in dts {
            engine.tick(&mut stack, Duration::from_millis(dt));
            let now = distance(engine.state());
            prop_assert!(now <= gap, "step moved away: {} -> {}", gap, now);
            gap = now;
            if engine.is_blocked() {
                prop_assert!(engine.phase() != Phase::Idle);
            }
        }
        prop_assert!(settle(&mut engine, &mut stack));
        prop_assert_eq!(engine.current_position(&stack), Some(to));

        let reached: Vec<_> = log
            .drain()
            .into_iter()
            .filter_map(|e| match e {
                SwitchEvent::TargetReached { position, .. } => Some(position),
                _ => None,
            })
            .collect();
        prop_assert_eq!(reached, vec![Some(to)]);
    }

    #[test]
    fn out_of_range_is_always_rejected(
        panels in 0usize..6,
        extra in 0usize..100,
        strategy in strategy(),
    ) {
        let (mut engine, mut stack, log) = setup(panels, strategy, SwitchSpeed::Normal, false);
        let state = engine.state().clone();
        prop_assert!(!engine.request_navigate(&mut stack, NavRequest::to(panels + extra)));
        prop_assert!(!engine.request_navigate(&mut stack, NavRequest::fast_to(panels + extra)));
        prop_assert_eq!(engine.state(), &state);
        prop_assert!(log.is_empty());
    }
}
