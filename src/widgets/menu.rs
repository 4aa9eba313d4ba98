//! Menu - a framed list that grows open on its own scene layer.
//!
//! ```text
//! Menu (component, full screen)
//! └── Justified (center, center)
//!     └── Bounds (animated size)
//!         └── RoundedFrame
//!             └── VerticalList
//! ```
//!
//! # Lifecycle
//!
//! - `show` pushes a scene layer with the menu as root and focuses the
//!   menu, then grows the bounds: height first, then width. When the grow
//!   ends the list appears and its selected item takes the focus.
//! - `hide` (also bound to `B` and the menu button) cancels a running grow,
//!   shrinks width then height from the current size, then disposes the
//!   menu, which pops its scene layer, and runs the `on_did_hide` callback.

use crate::engine::node::{set_height, set_width, Hook, Node, NodeId, NodeKind};
use crate::state::animate::{Animation, AnimationId};
use crate::types::{Alignment, Button, Font, NodeFlags};
use crate::ui::Ui;

use super::list::{ListItem, VerticalList};

/// Run once after the menu finished hiding and was disposed.
pub type HideCallback = Box<dyn FnOnce(&mut Ui)>;

pub(crate) struct MenuState {
    pub(crate) list: VerticalList,
    /// Animated bounds holding the frame.
    pub(crate) bounds: NodeId,
    /// Grow stages, dropped when the menu closes early.
    pub(crate) grow: Vec<AnimationId>,
    /// Set while the shrink animation runs.
    pub(crate) closing: bool,
    pub(crate) on_did_hide: Option<HideCallback>,
}

/// Handle to a menu component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Menu(NodeId);

impl Menu {
    /// Build a hidden menu. `font` defaults to the configured menu font.
    pub fn new(ui: &mut Ui, font: Option<Font>) -> Self {
        let style = ui.config.menu;
        let final_width = ui.config.screen_width - style.margin;
        let final_height = ui.config.screen_height - style.margin;

        let bounds = ui.create_bounds(style.margin, style.margin);
        ui.set_left(bounds, 30);
        ui.set_top(bounds, 30);
        let frame = ui.create_rounded_frame(style.corner_radius, style.border_color, style.fill_color);
        ui.append_child(bounds, frame);

        let list = VerticalList::new(
            ui,
            (final_width - style.list_inset, final_height - style.list_inset),
            (final_width - style.flow_inset, final_height - style.flow_inset),
            font.unwrap_or(style.font),
        );
        ui.append_child(frame, list.node());

        let root = ui.create_justified(Alignment::Center, Alignment::Center);
        ui.append_child(root, bounds);

        let state = MenuState {
            list,
            bounds,
            grow: Vec::new(),
            closing: false,
            on_did_hide: None,
        };
        let menu = ui.insert_node(Node::component(NodeKind::Menu(state)));
        ui.append_child(menu, root);
        Self(menu)
    }

    pub fn node(self) -> NodeId {
        self.0
    }

    pub fn list(self, ui: &Ui) -> Option<VerticalList> {
        self.state(ui).map(|s| s.list)
    }

    /// Append an item and reset the selection to the first item.
    pub fn add_item(
        self,
        ui: &mut Ui,
        name: &str,
        handler: impl FnMut(&mut Ui) + 'static,
    ) -> Option<ListItem> {
        let list = self.list(ui)?;
        let id = list.len(ui) as i32;
        let item = list.add_item(ui, name, id)?;
        list.set_selected_index(ui, 0);
        item.set_handler(ui, handler);
        Some(item)
    }

    pub fn set_on_did_hide(self, ui: &mut Ui, callback: impl FnOnce(&mut Ui) + 'static) {
        if let Some(state) = self.state_mut(ui) {
            state.on_did_hide = Some(Box::new(callback));
        }
    }

    pub fn is_visible(self, ui: &Ui) -> bool {
        ui.is_visible(self.0)
    }

    pub fn is_closing(self, ui: &Ui) -> bool {
        self.state(ui).is_some_and(|s| s.closing)
    }

    /// Open the menu on a new scene layer. No-op if already visible.
    pub fn show(self, ui: &mut Ui) {
        let Some(node) = ui.node_mut(self.0) else { return };
        if node.flags.contains(NodeFlags::VISIBLE) {
            return;
        }
        node.flags.insert(NodeFlags::VISIBLE);
        ui.notify_change(self.0);
        tracing::debug!(menu = ?self.0, "menu show");
        ui.set_root(self.0);
        // Holds the focus until the list takes it
        ui.focus(self.0, true);
        self.grow(ui);
    }

    /// Close the menu. No-op if hidden or already closing.
    pub fn hide(self, ui: &mut Ui) {
        if !self.is_visible(ui) {
            return;
        }
        let Some(state) = self.state_mut(ui) else { return };
        if state.closing {
            return;
        }
        state.closing = true;
        let (list, bounds) = (state.list, state.bounds);
        let grow = std::mem::take(&mut state.grow);
        tracing::debug!(menu = ?self.0, "menu hide");

        for id in grow {
            ui.remove_animation(id);
        }
        let style = ui.config.menu;
        let (width, height) = (ui.width(bounds), ui.height(bounds));
        ui.hide(list.node());

        let menu = self;
        let vertical = ui.add_animation(
            Animation::new(bounds, set_height)
                .from(height)
                .to(style.margin)
                .duration(style.stage_duration_ms)
                .on_ended(move |ui| menu.finish_hide(ui)),
        );
        let horizontal = ui.add_animation(
            Animation::new(bounds, set_width)
                .from(width)
                .to(style.margin)
                .duration(style.stage_duration_ms)
                .chain(vertical),
        );
        ui.start_animation(horizontal);
    }

    fn grow(self, ui: &mut Ui) {
        let Some(state) = self.state(ui) else { return };
        let (list, bounds) = (state.list, state.bounds);
        let style = ui.config.menu;
        let (width, height) = (ui.config.screen_width, ui.config.screen_height);
        ui.hide(list.node());

        let menu = self;
        let horizontal = ui.add_animation(
            Animation::new(bounds, set_width)
                .from(style.margin)
                .to(width - style.margin)
                .duration(style.stage_duration_ms)
                .on_ended(move |ui| menu.finish_grow(ui)),
        );
        let vertical = ui.add_animation(
            Animation::new(bounds, set_height)
                .from(style.margin)
                .to(height - style.margin)
                .duration(style.stage_duration_ms)
                .chain(horizontal),
        );
        if let Some(state) = self.state_mut(ui) {
            state.grow = vec![vertical, horizontal];
        }
        ui.start_animation(vertical);
    }

    fn finish_grow(self, ui: &mut Ui) {
        let Some(state) = self.state_mut(ui) else { return };
        state.grow.clear();
        if state.closing {
            return;
        }
        let list = state.list;
        ui.show(list.node());
        if let Some(item) = list.selected_item(ui) {
            ui.focus(item.node(), true);
        }
        ui.run_hook(self.0, Hook::Shown);
        ui.notify_change(self.0);
        tracing::debug!(menu = ?self.0, "menu shown");
    }

    fn finish_hide(self, ui: &mut Ui) {
        let callback = self.state_mut(ui).and_then(|s| s.on_did_hide.take());
        ui.hide(self.0);
        ui.dispose(self.0);
        tracing::debug!(menu = ?self.0, "menu hidden");
        if let Some(callback) = callback {
            callback(ui);
        }
    }

    fn state(self, ui: &Ui) -> Option<&MenuState> {
        match ui.node(self.0).map(|n| &n.kind) {
            Some(NodeKind::Menu(state)) => Some(state),
            _ => None,
        }
    }

    fn state_mut(self, ui: &mut Ui) -> Option<&mut MenuState> {
        match ui.node_mut(self.0).map(|n| &mut n.kind) {
            Some(NodeKind::Menu(state)) => Some(state),
            _ => None,
        }
    }
}

impl Ui {
    /// `B` and the menu button close the menu.
    pub(crate) fn menu_handle_input(&mut self, id: NodeId, button: Button) -> bool {
        tracing::debug!(?button, menu = ?id, "menu input");
        if matches!(button, Button::B | Button::Menu) {
            Menu(id).hide(self);
        }
        true
    }
}
