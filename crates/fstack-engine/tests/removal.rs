#![forbid(unsafe_code)]

//! Panel removal while idle and while a switch is running.

use std::time::Duration;

use fstack_engine::{
    EventLog, FrameController, Panel, PanelError, SwitchEvent, SwitchStrategy, Visibility,
};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn setup(panels: usize, strategy: SwitchStrategy) -> (FrameController, EventLog) {
    let mut c = FrameController::new();
    c.set_switch_animation(strategy, false);
    for _ in 0..panels {
        c.add_panel();
    }
    let log = EventLog::new();
    c.set_switch_listener(log.clone());
    (c, log)
}

fn settle(c: &mut FrameController) {
    for _ in 0..1000 {
        if c.is_idle() {
            return;
        }
        c.tick(ms(16));
    }
    panic!("controller never went idle");
}

fn ends(events: &[SwitchEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, SwitchEvent::AnimationEnds { .. }))
        .count()
}

#[test]
fn removing_current_first_panel_navigates_to_the_next() {
    let (mut c, log) = setup(3, SwitchStrategy::Scale);
    assert!(c.go_to(0));
    settle(&mut c);
    log.drain();
    let next = c.panel_at(1).map(Panel::id).expect("second panel");

    let removed = c.remove_panel_at(0).expect("in range");
    assert!(c.position_of(removed).is_none());
    assert!(c.is_blocked());
    assert!(c.is_out());
    settle(&mut c);

    let events = log.drain();
    assert!(matches!(events[0], SwitchEvent::SwitchStarted { position: Some(0), .. }));
    assert_eq!(
        events[1],
        SwitchEvent::TargetReached {
            panel: Some(next),
            position: Some(1)
        }
    );
    assert_eq!(ends(&events), 1);
    assert_eq!(c.position_of(next), Some(0));
    assert_eq!(c.panel_at(0).map(Panel::visibility), Some(Visibility::Visible));
    assert!(!c.is_blocked());
}

#[test]
fn removing_current_later_panel_navigates_to_the_previous() {
    let (mut c, log) = setup(4, SwitchStrategy::None);
    assert!(c.go_to(2));
    log.drain();

    c.remove_panel_at(2).expect("in range");
    let events = log.drain();
    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], SwitchEvent::SwitchStarted { position: Some(2), .. }));
    assert!(matches!(events[1], SwitchEvent::TargetReached { position: Some(1), .. }));
    assert_eq!(c.panel_count(), 3);
    assert_eq!(c.panel_at(1).map(Panel::visibility), Some(Visibility::Visible));
}

#[test]
fn removing_a_panel_that_is_not_current_does_not_navigate() {
    let (mut c, log) = setup(3, SwitchStrategy::None);
    assert!(c.go_to(2));
    let current = c.current_panel().map(Panel::id);
    log.drain();

    c.remove_panel_at(0).expect("in range");
    assert!(log.is_empty());
    assert_eq!(c.current_panel().map(Panel::id), current);
    assert_eq!(c.current_position(), Some(1));
}

#[test]
fn removal_out_of_range_fails() {
    let (mut c, _) = setup(2, SwitchStrategy::None);
    assert_eq!(
        c.remove_panel_at(2),
        Err(PanelError::PositionOutOfRange { position: 2, len: 2 })
    );
}

#[test]
fn removing_a_running_carrier_completes_it() {
    let (mut c, log) = setup(2, SwitchStrategy::Swipe);
    assert!(c.go_to(0));
    settle(&mut c);
    assert!(c.go_to(1));
    c.tick(ms(100));
    log.drain();

    // The outgoing panel carries the swipe's completion.
    c.remove_panel_at(0).expect("in range");
    assert!(!c.is_blocked());
    let events = log.drain();
    assert!(matches!(events[0], SwitchEvent::TargetReached { position: Some(1), .. }));
    assert_eq!(events[1], SwitchEvent::AnimationEnds { is_out: false });
    assert_eq!(events.len(), 2);

    settle(&mut c);
    assert!(log.is_empty());
    assert_eq!(c.current_position(), Some(0));
}

#[test]
fn removing_the_target_while_blocked_does_not_stall() {
    let (mut c, log) = setup(3, SwitchStrategy::Scale);
    assert!(c.go_to(2));
    assert!(c.is_blocked());

    // The fallback navigation is rejected while blocked; removal still happens.
    c.remove_panel_at(2).expect("in range");
    assert_eq!(c.panel_count(), 2);
    settle(&mut c);
    assert!(!c.is_blocked());
    assert_eq!(ends(&log.drain()), 1);
    assert!(c.go_to(0));
}

#[test]
fn removing_all_panels_mid_switch_still_finishes() {
    let (mut c, log) = setup(4, SwitchStrategy::ScrollHorizontal);
    assert!(c.go_to(3));
    c.tick(ms(500));
    c.remove_all_panels();
    assert_eq!(c.panel_count(), 0);
    assert!(c.is_out());
    settle(&mut c);
    assert!(!c.is_blocked());
    assert_eq!(ends(&log.drain()), 1);

    assert_eq!(c.restore_saved_panels(), 4);
    assert!(c.go_fast_to(1));
}

#[test]
fn inserting_before_current_shifts_its_position() {
    let (mut c, _) = setup(2, SwitchStrategy::None);
    assert!(c.go_to(1));
    let id = c.add_panel_at(0, Some("intro".into())).expect("in range");
    assert_eq!(c.current_position(), Some(2));
    assert_eq!(c.panel_with_tag("intro").map(Panel::id), Some(id));
    assert!(c.add_panel_at(9, None).is_err());
}
