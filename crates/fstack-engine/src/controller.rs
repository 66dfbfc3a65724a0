#![forbid(unsafe_code)]

//! Host-facing frame controller.
//!
//! [`FrameController`] owns a [`PanelStack`] and a [`TransitionEngine`] and
//! exposes the navigation surface a host works with: adding and removing
//! panels, styling them, choosing the switch animation, navigating by
//! position, identity or tag, and reading back per-panel frames to draw.
//!
//! Navigation methods return `false` when a request is rejected or a tag or
//! panel cannot be resolved. They never fail otherwise.

use std::time::Duration;

use fstack_core::animation::Transformation;
use fstack_core::geometry::{Bounds, Sides};
use kurbo::{Affine, Size};

use crate::config::{ControllerConfig, SwitchConfig, SwitchSpeed, SwitchStrategy};
use crate::engine::{NavRequest, TransitionEngine};
use crate::listener::SwitchListener;
use crate::panel::{Background, Panel, PanelId, PanelStyle, PanelTag, Visibility};
use crate::panel_stack::{PanelError, PanelStack};

/// What a host draws for one attached panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelFrame {
    pub id: PanelId,
    pub position: usize,
    pub visibility: Visibility,
    /// Panel-local to surface transform, margins included.
    pub transform: Affine,
    pub alpha: f64,
}

/// A stack of mutually exclusive panels with animated switching.
#[derive(Debug, Default)]
pub struct FrameController {
    panels: PanelStack,
    engine: TransitionEngine,
    surface: Size,
}

impl FrameController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller with `config` applied.
    #[must_use]
    pub fn with_config(config: &ControllerConfig) -> Self {
        Self {
            panels: PanelStack::with_style(config.style.clone()),
            engine: TransitionEngine::with_config(config.switch),
            surface: Size::ZERO,
        }
    }

    /// Apply a loaded configuration. Switch settings take effect from the
    /// next navigation; the style is re-applied to every panel now.
    pub fn apply_config(&mut self, config: &ControllerConfig) {
        fstack_core::debug!(strategy = ?config.switch.strategy, "applying controller config");
        self.engine.set_config(config.switch);
        self.panels.set_style(config.style.clone());
    }

    pub fn panels(&self) -> &PanelStack {
        &self.panels
    }

    pub fn engine(&self) -> &TransitionEngine {
        &self.engine
    }

    // -----------------------------------------------------------------------
    // Panels
    // -----------------------------------------------------------------------

    /// Add an invisible panel on top of the stack.
    pub fn add_panel(&mut self) -> PanelId {
        self.panels.push(None)
    }

    pub fn add_panel_with_tag(&mut self, tag: impl Into<PanelTag>) -> PanelId {
        self.panels.push(Some(tag.into()))
    }

    /// Add an invisible panel at `position`; `position == panel_count()`
    /// appends.
    pub fn add_panel_at(
        &mut self,
        position: usize,
        tag: Option<PanelTag>,
    ) -> Result<PanelId, PanelError> {
        self.panels.insert(position, tag)
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    pub fn current_panel(&self) -> Option<&Panel> {
        self.engine.current().and_then(|id| self.panels.panel(id))
    }

    pub fn current_position(&self) -> Option<usize> {
        self.engine.current_position(&self.panels)
    }

    pub fn is_current_first(&self) -> bool {
        self.current_position() == Some(0)
    }

    pub fn is_current_last(&self) -> bool {
        match self.current_position() {
            Some(position) => position + 1 == self.panels.len(),
            None => false,
        }
    }

    pub fn is_out(&self) -> bool {
        self.engine.is_out()
    }

    pub fn panel_with_tag(&self, tag: &str) -> Option<&Panel> {
        self.panels.panel_with_tag(tag)
    }

    pub fn panel_at(&self, position: usize) -> Option<&Panel> {
        self.panels.panel_at(position)
    }

    pub fn position_of(&self, id: PanelId) -> Option<usize> {
        self.panels.position_of(id)
    }

    /// Remove the panel at `position`.
    ///
    /// Removing the current panel first navigates away from it: to the next
    /// panel when it is first, otherwise to the previous one. The controller
    /// then has no current panel until the next navigation settles on one.
    pub fn remove_panel_at(&mut self, position: usize) -> Result<PanelId, PanelError> {
        let was_current = self.current_position() == Some(position);
        if was_current {
            let moved = if position == 0 {
                self.go_to_next()
            } else {
                self.go_to_previous()
            };
            if !moved {
                fstack_core::debug!(position, "fallback navigation rejected");
            }
        }
        let id = self.panels.remove(position)?;
        self.engine.panel_removed(&mut self.panels, id);
        if was_current {
            self.engine.forget_current();
        }
        Ok(id)
    }

    /// Detach every panel. They stay registered for
    /// [`restore_saved_panels`](Self::restore_saved_panels).
    pub fn remove_all_panels(&mut self) {
        for id in self.panels.detach_all() {
            self.engine.panel_removed(&mut self.panels, id);
        }
        self.engine.forget_current();
    }

    /// Drop every panel and cancel anything in flight without notifications.
    pub fn clear(&mut self) {
        self.engine.reset();
        let dropped = self.panels.clear();
        if !dropped.is_empty() {
            fstack_core::info!(count = dropped.len(), "controller cleared");
        }
    }

    /// Re-attach registered panels that were detached, as invisible.
    pub fn restore_saved_panels(&mut self) -> usize {
        self.panels.restore_saved()
    }

    // -----------------------------------------------------------------------
    // Style and switch configuration
    // -----------------------------------------------------------------------

    pub fn style(&self) -> &PanelStyle {
        self.panels.style()
    }

    pub fn set_background(&mut self, background: Background) {
        self.panels.set_background(background);
    }

    /// Accepts a single value for all sides or `(left, top, right, bottom)`.
    pub fn set_margins(&mut self, margins: impl Into<Sides>) {
        self.panels.set_margins(margins.into());
    }

    pub fn set_padding(&mut self, padding: impl Into<Sides>) {
        self.panels.set_padding(padding.into());
    }

    pub fn set_switch_animation(&mut self, strategy: SwitchStrategy, scale_modifier: bool) {
        self.engine.set_strategy(strategy, scale_modifier);
    }

    pub fn switch_strategy(&self) -> SwitchStrategy {
        self.engine.config().strategy
    }

    pub fn is_scale_modifier_enabled(&self) -> bool {
        self.engine.config().scale_modifier
    }

    pub fn set_animation_speed(&mut self, speed: SwitchSpeed) {
        self.engine.set_speed(speed);
    }

    pub fn animation_speed(&self) -> SwitchSpeed {
        self.engine.config().speed
    }

    pub fn switch_config(&self) -> &SwitchConfig {
        self.engine.config()
    }

    pub fn set_switch_listener(&mut self, listener: impl SwitchListener + 'static) {
        self.engine.set_listener(listener);
    }

    pub fn clear_switch_listener(&mut self) {
        self.engine.clear_listener();
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    fn navigate(&mut self, request: NavRequest) -> bool {
        self.engine.request_navigate(&mut self.panels, request)
    }

    /// Stepped navigation to `position`.
    pub fn go_to(&mut self, position: usize) -> bool {
        self.navigate(NavRequest::to(position))
    }

    pub fn go_to_panel(&mut self, id: PanelId) -> bool {
        self.position_of(id).is_some_and(|p| self.go_to(p))
    }

    pub fn go_to_tag(&mut self, tag: &str) -> bool {
        let position = self.panel_with_tag(tag).and_then(|p| self.position_of(p.id()));
        position.is_some_and(|p| self.go_to(p))
    }

    /// Single-hop navigation to `position`.
    pub fn go_fast_to(&mut self, position: usize) -> bool {
        self.navigate(NavRequest::fast_to(position))
    }

    pub fn go_fast_to_panel(&mut self, id: PanelId) -> bool {
        self.position_of(id).is_some_and(|p| self.go_fast_to(p))
    }

    pub fn go_fast_to_tag(&mut self, tag: &str) -> bool {
        let position = self.panel_with_tag(tag).and_then(|p| self.position_of(p.id()));
        position.is_some_and(|p| self.go_fast_to(p))
    }

    pub fn go_to_first(&mut self, fast: bool) -> bool {
        self.navigate(NavRequest {
            fast,
            ..NavRequest::to(0)
        })
    }

    pub fn go_to_last(&mut self, fast: bool) -> bool {
        let Some(last) = self.panels.len().checked_sub(1) else {
            return false;
        };
        self.navigate(NavRequest {
            fast,
            ..NavRequest::to(last)
        })
    }

    /// From the out state this goes to the first panel.
    pub fn go_to_next(&mut self) -> bool {
        let next = self.current_position().map_or(0, |p| p + 1);
        self.go_to(next)
    }

    pub fn go_to_previous(&mut self) -> bool {
        match self.current_position().and_then(|p| p.checked_sub(1)) {
            Some(previous) => self.go_to(previous),
            None => false,
        }
    }

    /// Animate the current panel away, leaving no panel current.
    /// `collapse_surface` collapses the host surface once the exit ends.
    pub fn go_out(&mut self, fast: bool, collapse_surface: bool) -> bool {
        if self.is_out() {
            return false;
        }
        self.navigate(NavRequest::out(fast, collapse_surface))
    }

    pub fn is_blocked(&self) -> bool {
        self.engine.is_blocked()
    }

    // -----------------------------------------------------------------------
    // Clock and output
    // -----------------------------------------------------------------------

    /// Advance time by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        self.engine.tick(&mut self.panels, dt);
    }

    /// Whether nothing is animating or scheduled.
    pub fn is_idle(&self) -> bool {
        self.engine.is_idle()
    }

    /// Time until something changes on its own, if anything will.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.engine.next_deadline()
    }

    pub fn surface_size(&self) -> Size {
        self.surface
    }

    pub fn set_surface_size(&mut self, size: Size) {
        self.surface = size;
    }

    pub fn surface_visibility(&self) -> Visibility {
        self.panels.surface_visibility()
    }

    /// One frame per attached panel, bottom to top.
    pub fn frames(&self) -> Vec<PanelFrame> {
        self.panels
            .iter()
            .enumerate()
            .map(|(position, panel)| {
                let margins = panel.style().margins;
                let bounds = Bounds::inset(self.surface, margins);
                let Transformation { matrix, alpha } = if bounds.is_degenerate() {
                    Transformation::IDENTITY
                } else {
                    self.engine.transformation(panel.id(), &bounds)
                };
                let offset = Affine::translate((f64::from(margins.left), f64::from(margins.top)));
                PanelFrame {
                    id: panel.id(),
                    position,
                    visibility: panel.visibility(),
                    transform: offset * matrix,
                    alpha,
                }
            })
            .collect()
    }
}
