#![forbid(unsafe_code)]

//! Switch lifecycle notifications.
//!
//! Each accepted navigation request produces, in order:
//!
//! 1. `on_switch_started` while the request is being accepted,
//! 2. `on_target_reached` once the panel that stays visible has settled,
//! 3. `on_animation_ends` after the last motion of the request.
//!
//! Each fires at most once per request. Hosts that prefer polling can use
//! [`EventLog`] instead of implementing [`SwitchListener`].

use std::cell::RefCell;
use std::rc::Rc;

use crate::panel::{Panel, PanelId};

/// Receiver for switch lifecycle notifications. All methods default to no-ops.
pub trait SwitchListener {
    /// A request was accepted. `previous` is the panel being left, `None`
    /// when leaving the out state.
    fn on_switch_started(&mut self, previous: Option<&Panel>, position: Option<usize>) {
        let _ = (previous, position);
    }

    /// The requested panel is in place. `None` when the target is the out
    /// state.
    fn on_target_reached(&mut self, target: Option<&Panel>, position: Option<usize>) {
        let _ = (target, position);
    }

    /// Every motion of the request has finished.
    fn on_animation_ends(&mut self, is_out: bool) {
        let _ = is_out;
    }
}

/// A recorded notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitchEvent {
    SwitchStarted {
        panel: Option<PanelId>,
        position: Option<usize>,
    },
    TargetReached {
        panel: Option<PanelId>,
        position: Option<usize>,
    },
    AnimationEnds {
        is_out: bool,
    },
}

/// Shared, cloneable recorder of [`SwitchEvent`]s.
///
/// Hand one clone to the controller and keep another to read from.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<SwitchEvent>>>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every event recorded so far.
    pub fn drain(&self) -> Vec<SwitchEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Copy of the recorded events, leaving them in place.
    pub fn snapshot(&self) -> Vec<SwitchEvent> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    fn record(&self, event: SwitchEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl SwitchListener for EventLog {
    fn on_switch_started(&mut self, previous: Option<&Panel>, position: Option<usize>) {
        self.record(SwitchEvent::SwitchStarted {
            panel: previous.map(Panel::id),
            position,
        });
    }

    fn on_target_reached(&mut self, target: Option<&Panel>, position: Option<usize>) {
        self.record(SwitchEvent::TargetReached {
            panel: target.map(Panel::id),
            position,
        });
    }

    fn on_animation_ends(&mut self, is_out: bool) {
        self.record(SwitchEvent::AnimationEnds { is_out });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::PanelStyle;

    #[test]
    fn clones_share_one_log() {
        let log = EventLog::new();
        let mut writer = log.clone();
        let panel = Panel::new(PanelId::new(4), None, PanelStyle::default());

        writer.on_switch_started(None, None);
        writer.on_target_reached(Some(&panel), Some(2));
        writer.on_animation_ends(false);

        assert_eq!(log.len(), 3);
        assert_eq!(
            log.drain(),
            vec![
                SwitchEvent::SwitchStarted {
                    panel: None,
                    position: None
                },
                SwitchEvent::TargetReached {
                    panel: Some(PanelId::new(4)),
                    position: Some(2)
                },
                SwitchEvent::AnimationEnds { is_out: false },
            ]
        );
        assert!(writer.is_empty());
    }

    #[test]
    fn default_methods_are_no_ops() {
        struct Silent;
        impl SwitchListener for Silent {}
        let mut s = Silent;
        s.on_switch_started(None, None);
        s.on_animation_ends(true);
    }
}
