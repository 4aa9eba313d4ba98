//! Input Module - button routing and terminal key conversion.
//!
//! Buttons enter the tree at the focused component of the current layer and
//! bubble up the parent chain. Every component on the way gets the button,
//! whatever the previous handlers returned.
//!
//! # API
//!
//! - `Ui::handle_button` - route one button press
//! - `Ui::dispatch_key` - translate a crossterm key event and route it
//! - `button_from_key` - crossterm `KeyEvent` to [`Button`] via a [`KeyMap`]
//! - `poll_event` / `read_event` - terminal event polling for hosts
//!
//! # Example
//!
//! ```ignore
//! loop {
//!     if let Ok(Some(event)) = poll_event(&keys, Duration::from_millis(16)) {
//!         route_event(&mut ui, event);
//!     }
//! }
//! ```

use std::time::Duration;

use crossterm::event::{poll, read, Event as CrosstermEvent, KeyEvent, KeyEventKind};

use crate::config::KeyMap;
use crate::engine::node::{NodeId, NodeKind};
use crate::types::Button;
use crate::ui::Ui;

// =============================================================================
// INPUT EVENT ENUM
// =============================================================================

/// Terminal event reduced to what the toolkit understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Button(Button),
    /// Terminal resize (columns, rows).
    Resize(u16, u16),
    /// Unmapped key or unhandled event.
    None,
}

// =============================================================================
// KEY CONVERSION
// =============================================================================

/// Map a key press to a button. Releases map to nothing.
pub fn button_from_key(keys: &KeyMap, event: KeyEvent) -> Option<Button> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    keys.button_for(event.code)
}

/// Convert a crossterm event.
pub fn convert_event(keys: &KeyMap, event: CrosstermEvent) -> InputEvent {
    match event {
        CrosstermEvent::Key(key) => button_from_key(keys, key).map_or(InputEvent::None, InputEvent::Button),
        CrosstermEvent::Resize(w, h) => InputEvent::Resize(w, h),
        _ => InputEvent::None,
    }
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for an event with timeout.
/// Returns None if no event within timeout.
pub fn poll_event(keys: &KeyMap, timeout: Duration) -> std::io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(read_event(keys)?))
    } else {
        Ok(None)
    }
}

/// Read the next event (blocking).
pub fn read_event(keys: &KeyMap) -> std::io::Result<InputEvent> {
    Ok(convert_event(keys, read()?))
}

// =============================================================================
// ROUTING
// =============================================================================

impl Ui {
    /// Route a button press from the focused component up to the root.
    pub fn handle_button(&mut self, button: Button) {
        let Some(focus) = self.focused() else {
            tracing::debug!(?button, "button dropped, nothing focused");
            return;
        };
        tracing::debug!(?button, focus = ?focus, "routing button");

        let mut current = Some(focus);
        while let Some(id) = current {
            if !self.contains(id) {
                break;
            }
            // Handlers may dispose the node; read the parent first.
            current = self.parent(id);
            if self.is_component(id) {
                self.handle_input(id, button);
            }
        }
    }

    /// Translate and route a key event. Returns the routed button.
    pub fn dispatch_key(&mut self, event: KeyEvent) -> Option<Button> {
        let button = button_from_key(&self.config.keys, event)?;
        self.handle_button(button);
        Some(button)
    }

    /// Input contract of a single component. Returns whether it consumed
    /// the button.
    pub(crate) fn handle_input(&mut self, id: NodeId, button: Button) -> bool {
        match self.node(id).map(|n| &n.kind) {
            Some(NodeKind::VerticalList(_)) => self.list_handle_input(id, button),
            Some(NodeKind::Menu(_)) => self.menu_handle_input(id, button),
            Some(NodeKind::Panel) => self.panel_handle_input(id, button),
            Some(_) => true,
            None => false,
        }
    }

    fn panel_handle_input(&mut self, id: NodeId, button: Button) -> bool {
        let Some(node) = self.node_mut(id) else { return false };
        match node.hooks.on_input.as_mut() {
            Some(handler) => handler(button),
            None => true,
        }
    }
}

/// Apply a converted event. Returns true if a button was routed.
pub fn route_event(ui: &mut Ui, event: InputEvent) -> bool {
    match event {
        InputEvent::Button(button) => {
            ui.handle_button(button);
            true
        }
        InputEvent::Resize(..) | InputEvent::None => false,
    }
}

// =============================================================================
// TESTS
// =============================================================================
