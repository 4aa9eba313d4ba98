//! Shape primitives - filled rectangles and nine-slice frames.

use std::rc::Rc;

use crate::engine::node::{Node, NodeId, NodeKind};
use crate::renderer::FrameSource;
use crate::types::Color;
use crate::ui::Ui;

impl Ui {
    /// Rectangle filling its bounds.
    pub fn create_rect(&mut self, color: Color) -> NodeId {
        self.insert_node(Node::new(NodeKind::Rect { color }))
    }

    pub fn rect_color(&self, id: NodeId) -> Option<Color> {
        match self.node(id).map(|n| &n.kind) {
            Some(NodeKind::Rect { color }) => Some(*color),
            _ => None,
        }
    }

    pub fn set_rect_color(&mut self, id: NodeId, color: Color) {
        let Some(node) = self.node_mut(id) else { return };
        let NodeKind::Rect { color: current } = &mut node.kind else {
            return;
        };
        if *current == color {
            return;
        }
        *current = color;
        self.notify_change(id);
    }

    /// Frame drawn from a nine-slice source. Children are laid out inside
    /// the frame's borders; `fill` paints the center.
    pub fn create_frame(&mut self, source: Rc<FrameSource>, fill: Color) -> NodeId {
        self.insert_node(Node::new(NodeKind::Frame { source, fill }))
    }

    /// Frame with rounded corners built from a generated template.
    pub fn create_rounded_frame(&mut self, radius: i32, border: Color, fill: Color) -> NodeId {
        let source = Rc::new(FrameSource::rounded(radius, border, fill));
        self.create_frame(source, fill)
    }
}
