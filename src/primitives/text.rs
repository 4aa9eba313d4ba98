//! Text primitive - a single line in a fixed-cell font.
//!
//! The node's fixed size tracks its content: `char_width * chars` wide and
//! one `char_height` tall. Text is printed at the node's bounds origin and
//! clipped by the surface.

use crate::engine::node::{Node, NodeId, NodeKind};
use crate::types::{Color, Font};
use crate::ui::Ui;

impl Ui {
    pub fn create_text(&mut self, content: impl Into<String>, font: Font, color: Color) -> NodeId {
        let content = content.into();
        let node = Node::new(NodeKind::Text {
            font,
            content: String::new(),
            color,
        })
        .with_size(0, font.char_height);
        let id = self.insert_node(node);
        self.set_text(id, content);
        id
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.node(id).map(|n| &n.kind) {
            Some(NodeKind::Text { content, .. }) => Some(content),
            _ => None,
        }
    }

    /// Replace the content, resizing the node to fit.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        let text = text.into();
        let Some(node) = self.node_mut(id) else { return };
        let NodeKind::Text { font, content, .. } = &mut node.kind else {
            return;
        };
        let width = font.text_width(&text);
        *content = text;
        node.fixed_width = Some(width);
        self.notify_change(id);
    }

    pub fn text_color(&self, id: NodeId) -> Option<Color> {
        match self.node(id).map(|n| &n.kind) {
            Some(NodeKind::Text { color, .. }) => Some(*color),
            _ => None,
        }
    }

    pub fn set_text_color(&mut self, id: NodeId, color: Color) {
        let Some(node) = self.node_mut(id) else { return };
        let NodeKind::Text { color: current, .. } = &mut node.kind else {
            return;
        };
        if *current == color {
            return;
        }
        *current = color;
        self.notify_change(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{Image, Surface};
    use crate::types::BoundingBox;

    #[test]
    fn test_text_size_tracks_content() {
        let mut ui = Ui::default();
        let t = ui.create_text("Play", Font::FONT5, 1);
        assert_eq!(ui.width(t), 24);
        assert_eq!(ui.height(t), 5);

        ui.set_text(t, "Options");
        assert_eq!(ui.width(t), 42);
        assert_eq!(ui.text(t), Some("Options"));
    }

    #[test]
    fn test_text_prints_at_origin() {
        let mut ui = Ui::default();
        let mut screen = Image::new(30, 10);
        let t = ui.create_text("ab", Font::FONT5, 4);
        ui.set_left(t, 2);
        ui.draw(t, &mut screen, BoundingBox::new(1, 1, 30, 10));

        assert_eq!(screen.get_pixel(3, 2), 4);
        assert_eq!(screen.get_pixel(2, 2), 0);
        assert_eq!(ui.bounds(t), Some(BoundingBox::new(3, 1, 12, 5)));
    }

    #[test]
    fn test_text_color() {
        let mut ui = Ui::default();
        let t = ui.create_text("x", Font::FONT8, 1);
        ui.set_text_color(t, 9);
        assert_eq!(ui.text_color(t), Some(9));

        let g = ui.create_group();
        assert_eq!(ui.text_color(g), None);
    }
}
