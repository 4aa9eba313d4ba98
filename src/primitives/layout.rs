//! Layout nodes - groups, fixed-size bounds, justification and panels.
//!
//! # Example
//!
//! ```ignore
//! let centered = ui.create_justified(Alignment::Center, Alignment::Center);
//! let box_ = ui.create_bounds(40, 20);
//! ui.append_child(centered, box_);
//! ```

use crate::engine::node::{Node, NodeId, NodeKind};
use crate::types::Alignment;
use crate::ui::Ui;

impl Ui {
    /// Plain node that draws its children in its own bounds.
    pub fn create_group(&mut self) -> NodeId {
        self.insert_node(Node::new(NodeKind::Group))
    }

    /// Fixed-size anchor for its children.
    pub fn create_bounds(&mut self, width: i32, height: i32) -> NodeId {
        self.insert_node(Node::new(NodeKind::Bounds).with_size(width, height))
    }

    /// Node that places each child per axis inside its bounds before drawing.
    ///
    /// Children are positioned by their effective width and height, so they
    /// should carry a fixed size.
    pub fn create_justified(&mut self, x: Alignment, y: Alignment) -> NodeId {
        self.insert_node(Node::new(NodeKind::Justified { x, y }))
    }

    pub fn set_justification(&mut self, id: NodeId, x: Alignment, y: Alignment) {
        let Some(node) = self.node_mut(id) else { return };
        let NodeKind::Justified { x: nx, y: ny } = &mut node.kind else {
            return;
        };
        if (*nx, *ny) == (x, y) {
            return;
        }
        *nx = x;
        *ny = y;
        self.notify_change(id);
    }

    /// Hidden component driven by user hooks.
    ///
    /// Input reaches `on_input` when the panel or one of its descendants has
    /// focus.
    pub fn create_panel(&mut self) -> NodeId {
        self.insert_node(Node::component(NodeKind::Panel))
    }
}
