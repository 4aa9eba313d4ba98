//! Container primitives - cached subtrees and flows.
//!
//! A container owns an offscreen image of its own size. Its subtree is only
//! re-rendered into that image after something below it changed; otherwise
//! the cached image is blitted as is. Flows are containers that stack their
//! children instead of overlaying them.

use crate::engine::node::{Node, NodeId, NodeKind};
use crate::types::Color;
use crate::ui::Ui;

use super::types::{ContainerCache, Flow};

impl Ui {
    /// Caching container of a fixed size.
    pub fn create_container(&mut self, width: i32, height: i32) -> NodeId {
        self.create_flow_container(Flow::None, width, height)
    }

    /// Container stacking its children top to bottom.
    pub fn create_vertical_flow(&mut self, width: i32, height: i32) -> NodeId {
        self.create_flow_container(Flow::Vertical, width, height)
    }

    /// Container stacking its children left to right.
    pub fn create_horizontal_flow(&mut self, width: i32, height: i32) -> NodeId {
        self.create_flow_container(Flow::Horizontal, width, height)
    }

    fn create_flow_container(&mut self, flow: Flow, width: i32, height: i32) -> NodeId {
        let node = Node::new(NodeKind::Container(ContainerCache::new(flow))).with_size(width, height);
        self.insert_node(node)
    }

    /// Set the color the cache is cleared to before children draw.
    pub fn set_container_background(&mut self, id: NodeId, background: Option<Color>) {
        let Some(cache) = self.node_mut(id).and_then(|n| n.kind.cache_mut()) else {
            return;
        };
        if cache.background == background {
            return;
        }
        cache.background = background;
        self.notify_change(id);
    }

    /// How many times a container re-rendered its subtree. Zero for
    /// non-containers.
    pub fn cache_render_count(&self, id: NodeId) -> u32 {
        self.node(id)
            .and_then(|n| n.kind.cache())
            .map_or(0, |cache| cache.render_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{Image, Surface};
    use crate::types::BoundingBox;

    #[test]
    fn test_transparent_cache_keeps_background() {
        let mut ui = Ui::default();
        let mut screen = Image::new(10, 10);
        screen.fill(8);
        let container = ui.create_container(5, 5);
        ui.draw(container, &mut screen, BoundingBox::sized(10, 10));
        assert_eq!(screen.get_pixel(2, 2), 8);
    }

    #[test]
    fn test_background_change_rerenders() {
        let mut ui = Ui::default();
        let mut screen = Image::new(10, 10);
        let container = ui.create_container(5, 5);
        ui.draw(container, &mut screen, BoundingBox::sized(10, 10));

        ui.set_container_background(container, Some(2));
        ui.draw(container, &mut screen, BoundingBox::sized(10, 10));
        assert_eq!(ui.cache_render_count(container), 2);
        assert_eq!(screen.get_pixel(4, 4), 2);
    }

    #[test]
    fn test_resize_rerenders() {
        let mut ui = Ui::default();
        let mut screen = Image::new(10, 10);
        let container = ui.create_container(5, 5);
        ui.set_container_background(container, Some(2));
        ui.draw(container, &mut screen, BoundingBox::sized(10, 10));

        ui.set_fixed_width(container, Some(8));
        ui.draw(container, &mut screen, BoundingBox::sized(10, 10));
        assert_eq!(screen.get_pixel(7, 0), 2);
    }

    #[test]
    fn test_render_count_non_container() {
        let mut ui = Ui::default();
        let g = ui.create_group();
        assert_eq!(ui.cache_render_count(g), 0);
    }
}
