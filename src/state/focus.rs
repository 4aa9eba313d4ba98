//! Focus System - focus stack of the current scene layer.
//!
//! The focused component receives every button press first (see
//! [`crate::state::input`]). Focus history is a stack: popping the focus
//! returns it to whatever was focused before.
//!
//! # Example
//!
//! ```ignore
//! ui.focus(list, false);
//! ui.focus(dialog, false);
//! ui.pop_focus(); // back to `list`
//! ```
//!
//! All operations are no-ops when the current layer has no UI state.

use crate::engine::node::{Hook, NodeId};
use crate::ui::Ui;

impl Ui {
    /// Currently focused component of the current layer.
    pub fn focused(&self) -> Option<NodeId> {
        self.scenes.current().and_then(|s| s.focus)
    }

    /// Focus history of the current layer, bottom first.
    pub fn focus_stack(&self) -> &[NodeId] {
        self.scenes
            .current()
            .map_or(&[], |s| s.focus_stack.as_slice())
    }

    /// Focus `id`, blurring the current focus.
    ///
    /// With `clear_stack` the history is collapsed to just `id`.
    pub fn focus(&mut self, id: NodeId, clear_stack: bool) {
        let Some(state) = self.scenes.current_mut() else {
            return;
        };
        if let Some(previous) = state.focus.take() {
            self.run_hook(previous, Hook::Blur);
        }

        let Some(state) = self.scenes.current_mut() else {
            return;
        };
        state.focus = Some(id);
        state.focus_stack.push(id);
        if clear_stack {
            state.focus_stack.clear();
            state.focus_stack.push(id);
        }
        tracing::debug!(node = ?id, clear_stack, "focus");
        self.run_hook(id, Hook::Focus);
    }

    /// Blur and drop the current focus, then refocus the previous entry.
    pub fn pop_focus(&mut self) {
        let Some(state) = self.scenes.current_mut() else {
            return;
        };
        if let Some(current) = state.focus.take() {
            state.focus_stack.pop();
            self.run_hook(current, Hook::Blur);
        }

        let Some(state) = self.scenes.current_mut() else {
            return;
        };
        if let Some(next) = state.focus_stack.pop() {
            tracing::debug!(node = ?next, "focus restored");
            self.focus(next, false);
        }
    }

    /// Remove a component that is going away from the focus stack.
    ///
    /// If it held the focus, it is blurred and focus returns to the previous
    /// entry.
    pub(crate) fn dispose_component(&mut self, id: NodeId) {
        let Some(state) = self.scenes.current_mut() else {
            return;
        };
        if state.focus == Some(id) {
            state.focus = None;
            state.focus_stack.pop();
            self.run_hook(id, Hook::Blur);
            self.pop_focus();
        }
        if let Some(state) = self.scenes.current_mut() {
            state.focus_stack.retain(|&c| c != id);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
