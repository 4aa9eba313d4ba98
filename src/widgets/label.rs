//! Scrolling label - single-line text that scrolls when it overflows.
//!
//! A caching container one text line tall holding a text node. If the text
//! is wider than the label, the label subscribes to the update tick and
//! scrolls the text left until its end is visible, pauses, jumps back to
//! the start, pauses, and repeats:
//!
//! ```text
//! pause -> scroll to max_offset -> pause -> reset to 0 -> pause -> ...
//! ```
//!
//! Text that fits stays put and never subscribes. A label subscribes with
//! the layer whose tree it is drawn in, so a label built before its layer
//! exists registers on its first draw.

use crate::engine::node::{Node, NodeId, NodeKind};
use crate::primitives::types::{ContainerCache, Flow};
use crate::state::scene::Updater;
use crate::types::{Color, Font};
use crate::ui::Ui;

/// Scroll state of a label node.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LabelState {
    pub(crate) text: NodeId,
    /// Fractional scroll position in pixels.
    pub(crate) offset: f64,
    /// Text width minus label width; the label scrolls only when positive.
    pub(crate) max_offset: i32,
    /// Remaining pause in milliseconds.
    pub(crate) timer: f64,
    pub(crate) pause: f64,
    /// Pixels per millisecond.
    pub(crate) speed: f64,
}

/// Handle to a scrolling label node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScrollingLabel(NodeId);

impl ScrollingLabel {
    /// Create a label `width` pixels wide showing `content`.
    pub fn new(ui: &mut Ui, width: i32, font: Font, content: &str) -> Self {
        let style = ui.config.label;
        let text = ui.create_text(content, font, style.color);
        let state = LabelState {
            text,
            offset: 0.0,
            max_offset: 0,
            timer: style.pause_ms,
            pause: style.pause_ms,
            speed: style.speed,
        };
        let node = Node::new(NodeKind::ScrollingLabel {
            cache: ContainerCache::new(Flow::None),
            state,
        })
        .with_size(width, font.char_height);
        let id = ui.insert_node(node);
        ui.append_child(id, text);

        let label = Self(id);
        label.measure(ui);
        label
    }

    pub fn id(self) -> NodeId {
        self.0
    }

    /// The text node inside the label.
    pub fn text_node(self, ui: &Ui) -> Option<NodeId> {
        self.state(ui).map(|s| s.text)
    }

    pub fn text(self, ui: &Ui) -> Option<&str> {
        self.text_node(ui).and_then(|t| ui.text(t))
    }

    /// Replace the content and restart scrolling from the start.
    pub fn set_text(self, ui: &mut Ui, content: &str) {
        let Some(text) = self.text_node(ui) else { return };
        ui.set_text(text, content);
        if let Some(state) = self.state_mut(ui) {
            state.offset = 0.0;
            state.timer = state.pause;
        }
        ui.set_left(text, 0);
        self.measure(ui);
    }

    pub fn color(self, ui: &Ui) -> Option<Color> {
        self.text_node(ui).and_then(|t| ui.text_color(t))
    }

    pub fn set_color(self, ui: &mut Ui, color: Color) {
        if let Some(text) = self.text_node(ui) {
            ui.set_text_color(text, color);
        }
    }

    /// Current scroll position in pixels.
    pub fn offset(self, ui: &Ui) -> f64 {
        self.state(ui).map_or(0.0, |s| s.offset)
    }

    pub fn max_offset(self, ui: &Ui) -> i32 {
        self.state(ui).map_or(0, |s| s.max_offset)
    }

    pub fn is_scrolling(self, ui: &Ui) -> bool {
        self.max_offset(ui) > 0
    }

    /// Recompute `max_offset` and (un)subscribe accordingly. Only labels
    /// already in the current layer's tree subscribe here.
    fn measure(self, ui: &mut Ui) {
        let id = self.0;
        let width = ui.width(id);
        let Some(text) = self.text_node(ui) else { return };
        let max_offset = ui.width(text) - width;
        if let Some(state) = self.state_mut(ui) {
            state.max_offset = max_offset;
        }

        // Detached labels subscribe on their first draw instead.
        let updater = Updater::Label(id);
        if max_offset > 0 {
            if ui.in_current_scene(id) && !ui.is_subscribed(updater) {
                ui.subscribe(updater);
            }
        } else {
            ui.unsubscribe(updater);
        }
    }

    fn state(self, ui: &Ui) -> Option<&LabelState> {
        match ui.node(self.0).map(|n| &n.kind) {
            Some(NodeKind::ScrollingLabel { state, .. }) => Some(state),
            _ => None,
        }
    }

    fn state_mut(self, ui: &mut Ui) -> Option<&mut LabelState> {
        match ui.node_mut(self.0).map(|n| &mut n.kind) {
            Some(NodeKind::ScrollingLabel { state, .. }) => Some(state),
            _ => None,
        }
    }
}

impl Ui {
    /// Labels built before their scene layer existed subscribe on first draw.
    pub(crate) fn label_will_draw(&mut self, id: NodeId) {
        let label = ScrollingLabel(id);
        if label.is_scrolling(self) && !self.is_subscribed(Updater::Label(id)) {
            tracing::trace!(node = ?id, "label subscribed on draw");
            self.subscribe(Updater::Label(id));
        }
    }

    /// One scroll step.
    pub(crate) fn update_label(&mut self, id: NodeId, dt: f64) {
        let Some(state) = ScrollingLabel(id).state_mut(self) else {
            return;
        };
        if state.max_offset <= 0 {
            return;
        }

        if state.timer > 0.0 {
            state.timer -= dt;
            if state.timer <= 0.0 && state.offset != 0.0 {
                state.offset = 0.0;
                state.timer = state.pause;
            }
        } else {
            state.offset += dt * state.speed;
            if state.offset > f64::from(state.max_offset) {
                state.offset = f64::from(state.max_offset);
                state.timer = state.pause;
            }
        }

        let text = state.text;
        let left = -(state.offset as i32);
        self.set_left(text, left);
    }
}
