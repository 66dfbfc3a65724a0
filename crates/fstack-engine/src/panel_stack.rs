#![forbid(unsafe_code)]

//! The ordered panel collection behind a frame controller.
//!
//! [`PanelStack`] keeps two views of its panels:
//!
//! - the **registry**: every panel ever created and not explicitly removed,
//!   in creation order;
//! - the **attached order**: the panels currently stacked in the surface, in
//!   position (z) order. Positions are 0-based and contiguous.
//!
//! Detaching all panels keeps the registry, so they can be re-attached with
//! [`PanelStack::restore_saved`].
//!
//! # Invariants
//!
//! 1. Every attached id is present in the registry exactly once.
//! 2. Ids are allocated from a monotone counter and never reused.
//! 3. Changing the style re-applies it to every registered panel.

use fstack_core::geometry::Sides;

use crate::panel::{Background, Panel, PanelId, PanelStyle, PanelTag, Visibility};

/// Errors from positional panel operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PanelError {
    #[error("panel position {position} out of range (len {len})")]
    PositionOutOfRange { position: usize, len: usize },
}

/// Ordered collection of panels plus the host surface state.
#[derive(Debug, Clone)]
pub struct PanelStack {
    registry: Vec<Panel>,
    order: Vec<PanelId>,
    style: PanelStyle,
    surface: Visibility,
    next_id: u64,
}

impl Default for PanelStack {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Construction and insertion
// ---------------------------------------------------------------------------

impl PanelStack {
    #[must_use]
    pub fn new() -> Self {
        Self::with_style(PanelStyle::default())
    }

    #[must_use]
    pub fn with_style(style: PanelStyle) -> Self {
        Self {
            registry: Vec::new(),
            order: Vec::new(),
            style,
            surface: Visibility::Visible,
            next_id: 1,
        }
    }

    fn create(&mut self, tag: Option<PanelTag>) -> PanelId {
        let id = PanelId::new(self.next_id);
        self.next_id += 1;
        self.registry.push(Panel::new(id, tag, self.style.clone()));
        id
    }

    /// Create an invisible panel on top of the stack.
    pub fn push(&mut self, tag: Option<PanelTag>) -> PanelId {
        let id = self.create(tag);
        self.order.push(id);
        id
    }

    /// Create an invisible panel at `position`, shifting later panels up.
    ///
    /// `position == len()` appends.
    pub fn insert(
        &mut self,
        position: usize,
        tag: Option<PanelTag>,
    ) -> Result<PanelId, PanelError> {
        let len = self.order.len();
        if position > len {
            return Err(PanelError::PositionOutOfRange { position, len });
        }
        let id = self.create(tag);
        self.order.insert(position, id);
        Ok(id)
    }
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

impl PanelStack {
    /// Number of attached panels.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of registered panels, attached or not.
    pub fn saved_len(&self) -> usize {
        self.registry.len()
    }

    pub fn id_at(&self, position: usize) -> Option<PanelId> {
        self.order.get(position).copied()
    }

    pub fn panel_at(&self, position: usize) -> Option<&Panel> {
        self.id_at(position).and_then(|id| self.panel(id))
    }

    pub fn position_of(&self, id: PanelId) -> Option<usize> {
        self.order.iter().position(|&p| p == id)
    }

    pub fn is_attached(&self, id: PanelId) -> bool {
        self.order.contains(&id)
    }

    /// Registered panel by id, attached or not.
    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.registry.iter().find(|p| p.id() == id)
    }

    fn panel_mut(&mut self, id: PanelId) -> Option<&mut Panel> {
        self.registry.iter_mut().find(|p| p.id() == id)
    }

    /// Lowest-positioned attached panel carrying `tag`.
    pub fn panel_with_tag(&self, tag: &str) -> Option<&Panel> {
        self.order
            .iter()
            .filter_map(|&id| self.panel(id))
            .find(|p| p.has_tag(tag))
    }

    /// Attached panels in position order.
    pub fn iter(&self) -> impl Iterator<Item = &Panel> + '_ {
        self.order.iter().filter_map(|&id| self.panel(id))
    }

    /// Registered panels in creation order.
    pub fn saved(&self) -> impl Iterator<Item = &Panel> + '_ {
        self.registry.iter()
    }
}

// ---------------------------------------------------------------------------
// Removal and restore
// ---------------------------------------------------------------------------

impl PanelStack {
    /// Detach the panel at `position` and drop it from the registry.
    pub fn remove(&mut self, position: usize) -> Result<PanelId, PanelError> {
        let len = self.order.len();
        if position >= len {
            return Err(PanelError::PositionOutOfRange { position, len });
        }
        let id = self.order.remove(position);
        self.registry.retain(|p| p.id() != id);
        Ok(id)
    }

    /// Detach every panel, keeping the registry. Returns the detached ids.
    pub fn detach_all(&mut self) -> Vec<PanelId> {
        std::mem::take(&mut self.order)
    }

    /// Detach every panel and empty the registry.
    pub fn clear(&mut self) -> Vec<PanelId> {
        self.registry.clear();
        std::mem::take(&mut self.order)
    }

    /// Re-attach registered panels that are not attached, as invisible, in
    /// creation order. Returns how many were attached.
    pub fn restore_saved(&mut self) -> usize {
        let mut restored = 0;
        for panel in &mut self.registry {
            if self.order.contains(&panel.id()) {
                continue;
            }
            panel.set_visibility(Visibility::Invisible);
            self.order.push(panel.id());
            restored += 1;
        }
        restored
    }
}

// ---------------------------------------------------------------------------
// Visibility and style
// ---------------------------------------------------------------------------

impl PanelStack {
    /// Set a panel's visibility. Unknown ids are ignored.
    pub fn set_visibility(&mut self, id: PanelId, visibility: Visibility) {
        if let Some(panel) = self.panel_mut(id) {
            panel.set_visibility(visibility);
        }
    }

    pub fn surface_visibility(&self) -> Visibility {
        self.surface
    }

    pub fn set_surface_visibility(&mut self, visibility: Visibility) {
        self.surface = visibility;
    }

    pub fn style(&self) -> &PanelStyle {
        &self.style
    }

    /// Replace the style and re-apply it to every registered panel.
    pub fn set_style(&mut self, style: PanelStyle) {
        for panel in &mut self.registry {
            panel.set_style(style.clone());
        }
        self.style = style;
    }

    pub fn set_background(&mut self, background: Background) {
        let style = PanelStyle {
            background,
            ..self.style.clone()
        };
        self.set_style(style);
    }

    pub fn set_margins(&mut self, margins: Sides) {
        let style = PanelStyle {
            margins,
            ..self.style.clone()
        };
        self.set_style(style);
    }

    pub fn set_padding(&mut self, padding: Sides) {
        let style = PanelStyle {
            padding,
            ..self.style.clone()
        };
        self.set_style(style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::Rgba;

    fn stack_of(n: usize) -> (PanelStack, Vec<PanelId>) {
        let mut stack = PanelStack::new();
        let ids = (0..n).map(|_| stack.push(None)).collect();
        (stack, ids)
    }

    #[test]
    fn push_appends_invisible_panels() {
        let (stack, ids) = stack_of(3);
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.position_of(ids[2]), Some(2));
        assert!(stack.iter().all(|p| p.visibility() == Visibility::Invisible));
    }

    #[test]
    fn insert_shifts_later_positions() {
        let (mut stack, ids) = stack_of(2);
        let mid = stack.insert(1, Some("mid".into())).expect("in range");
        assert_eq!(stack.position_of(mid), Some(1));
        assert_eq!(stack.position_of(ids[1]), Some(2));
        assert_eq!(
            stack.insert(4, None),
            Err(PanelError::PositionOutOfRange { position: 4, len: 3 })
        );
    }

    #[test]
    fn ids_are_never_reused() {
        let (mut stack, ids) = stack_of(2);
        stack.remove(1).expect("in range");
        let fresh = stack.push(None);
        assert!(!ids.contains(&fresh));
    }

    #[test]
    fn tag_lookup_returns_lowest_position() {
        let mut stack = PanelStack::new();
        stack.push(None);
        let first = stack.push(Some("dup".into()));
        stack.push(Some("dup".into()));
        assert_eq!(stack.panel_with_tag("dup").map(Panel::id), Some(first));
        assert!(stack.panel_with_tag("missing").is_none());
    }

    #[test]
    fn remove_drops_from_registry() {
        let (mut stack, ids) = stack_of(3);
        assert_eq!(stack.remove(0), Ok(ids[0]));
        assert_eq!(stack.saved_len(), 2);
        assert!(stack.panel(ids[0]).is_none());
        assert_eq!(
            stack.remove(5),
            Err(PanelError::PositionOutOfRange { position: 5, len: 2 })
        );
    }

    #[test]
    fn detach_all_then_restore_reattaches_invisible() {
        let (mut stack, ids) = stack_of(3);
        stack.set_visibility(ids[1], Visibility::Visible);
        assert_eq!(stack.detach_all(), ids);
        assert!(stack.is_empty());
        assert_eq!(stack.saved_len(), 3);
        assert_eq!(stack.saved().map(Panel::id).collect::<Vec<_>>(), ids);

        assert_eq!(stack.restore_saved(), 3);
        assert_eq!(stack.id_at(1), Some(ids[1]));
        assert!(stack.iter().all(|p| p.visibility() == Visibility::Invisible));
        assert_eq!(stack.restore_saved(), 0);
    }

    #[test]
    fn clear_forgets_registry() {
        let (mut stack, _) = stack_of(2);
        stack.clear();
        assert_eq!(stack.restore_saved(), 0);
        assert_eq!(stack.saved_len(), 0);
    }

    #[test]
    fn style_changes_reapply_to_registered_panels() {
        let (mut stack, ids) = stack_of(2);
        stack.detach_all();
        stack.set_margins(Sides::all(4));
        stack.set_background(Background::Color(Rgba::TRANSPARENT));
        for id in &ids {
            let style = stack.panel(*id).map(|p| p.style().clone()).unwrap_or_default();
            assert_eq!(style.margins, Sides::all(4));
            assert_eq!(style.background, Background::Color(Rgba::TRANSPARENT));
        }
        let late = stack.push(None);
        assert_eq!(stack.panel(late).map(|p| p.style().margins), Some(Sides::all(4)));
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let (mut stack, ids) = stack_of(1);
        stack.remove(0).expect("in range");
        stack.set_visibility(ids[0], Visibility::Visible);
        assert!(stack.panel(ids[0]).is_none());
    }
}
