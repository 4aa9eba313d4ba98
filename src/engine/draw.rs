//! Draw - top-down layout and painting.
//!
//! A draw call hands each node the region its parent allotted. The node
//! computes its own bounds from that region, paints, and hands regions down
//! to its children. Dirty flags are cleared on the way back up.
//!
//! # Bounds
//!
//! A node with any of `fixed_width`, `fixed_height`, `left` or `top` set is
//! placed at `(available + left/top)` with its fixed size, falling back to the
//! available size per axis. Otherwise it takes the available region as is.
//! Nothing is clamped: surfaces clip.
//!
//! # Caching containers
//!
//! Containers render their subtree into an owned image only while dirty, and
//! blit that image with transparency on every draw.

use crate::engine::node::{Node, NodeId, NodeKind};
use crate::primitives::types::Flow;
use crate::renderer::{Image, Surface};
use crate::types::{BoundingBox, NodeFlags};
use crate::ui::Ui;

/// Default placement of a node inside `available`.
pub(crate) fn default_bounds(node: &Node, available: BoundingBox) -> BoundingBox {
    let positioned = node.fixed_width.is_some()
        || node.fixed_height.is_some()
        || node.left != 0
        || node.top != 0;
    if !positioned {
        return available;
    }
    BoundingBox::new(
        available.origin_x + node.left,
        available.origin_y + node.top,
        node.fixed_width.unwrap_or(available.width),
        node.fixed_height.unwrap_or(available.height),
    )
}

/// What a node does after computing its bounds.
enum Step {
    /// Draw children into the same bounds.
    Children,
    Justify,
    Frame,
    Cached(Flow),
}

impl Ui {
    /// Draw `id` and its subtree onto `surface` within `available`.
    pub fn draw(&mut self, id: NodeId, surface: &mut dyn Surface, available: BoundingBox) {
        let is_label = matches!(self.node(id).map(|n| &n.kind), Some(NodeKind::ScrollingLabel { .. }));
        if is_label {
            self.label_will_draw(id);
        }

        let Some(node) = self.node_mut(id) else { return };
        let bounds = default_bounds(node, available);

        if node.is_component() && !node.flags.contains(NodeFlags::VISIBLE) {
            node.flags.remove(NodeFlags::DIRTY);
            return;
        }
        node.bounds = Some(bounds);

        let step = match &node.kind {
            NodeKind::Rect { color } => {
                surface.fill_rect(bounds.origin_x, bounds.origin_y, bounds.width, bounds.height, *color);
                Step::Children
            }
            NodeKind::Text {
                font,
                content,
                color,
            } => {
                surface.print(content, bounds.origin_x, bounds.origin_y, *color, font);
                Step::Children
            }
            NodeKind::Frame { source, fill } => {
                source.draw(surface, bounds, *fill);
                Step::Frame
            }
            NodeKind::Justified { .. } => Step::Justify,
            NodeKind::Container(cache) => Step::Cached(cache.flow),
            NodeKind::ScrollingLabel { .. } => Step::Cached(Flow::None),
            NodeKind::Group
            | NodeKind::Bounds
            | NodeKind::Panel
            | NodeKind::ListItem(_)
            | NodeKind::VerticalList(_)
            | NodeKind::Menu(_) => Step::Children,
        };

        match step {
            Step::Children => self.draw_children(id, surface, bounds),
            Step::Justify => self.draw_justified(id, surface, bounds),
            Step::Frame => {
                let inner = match self.node(id).map(|n| &n.kind) {
                    Some(NodeKind::Frame { source, .. }) => source.content_bounds(bounds),
                    _ => bounds,
                };
                self.draw_children(id, surface, inner);
            }
            Step::Cached(flow) => self.draw_cached(id, surface, bounds, flow),
        }

        if let Some(node) = self.node_mut(id) {
            node.flags.remove(NodeFlags::DIRTY);
        }
    }

    fn draw_children(&mut self, id: NodeId, surface: &mut dyn Surface, region: BoundingBox) {
        let children = self.children(id).to_vec();
        for child in children {
            self.draw(child, surface, region);
        }
    }

    fn draw_justified(&mut self, id: NodeId, surface: &mut dyn Surface, region: BoundingBox) {
        let Some(NodeKind::Justified { x, y }) = self.node(id).map(|n| &n.kind) else {
            return;
        };
        let (x, y) = (*x, *y);
        let children = self.children(id).to_vec();
        for child in children {
            let left = x.offset(region.width, self.width(child));
            let top = y.offset(region.height, self.height(child));
            self.set_left(child, left);
            self.set_top(child, top);
            self.draw(child, surface, region);
        }
    }

    fn draw_cached(&mut self, id: NodeId, surface: &mut dyn Surface, bounds: BoundingBox, flow: Flow) {
        let Some(node) = self.node_mut(id) else { return };
        let dirty = node.is_dirty();
        let Some(cache) = node.kind.cache_mut() else { return };

        let stale_size = cache.image.width() != bounds.width || cache.image.height() != bounds.height;
        if dirty || stale_size {
            let mut image = std::mem::take(&mut cache.image);
            if stale_size {
                image = Image::new(bounds.width, bounds.height);
            }
            image.fill(0);
            if let Some(background) = cache.background {
                image.fill(background);
            }

            let region = BoundingBox::sized(bounds.width, bounds.height);
            match flow {
                Flow::None => self.draw_children(id, &mut image, region),
                Flow::Vertical => self.draw_vertical_flow(id, &mut image, region),
                Flow::Horizontal => self.draw_horizontal_flow(id, &mut image, region),
            }

            let Some(cache) = self.node_mut(id).and_then(|n| n.kind.cache_mut()) else {
                return;
            };
            cache.image = image;
            cache.render_count += 1;
            tracing::trace!(node = ?id, renders = cache.render_count, "container cache rendered");
        }

        if let Some(cache) = self.node(id).and_then(|n| n.kind.cache()) {
            surface.draw_transparent_image(&cache.image, bounds.origin_x, bounds.origin_y);
        }
    }

    fn draw_vertical_flow(&mut self, id: NodeId, surface: &mut dyn Surface, region: BoundingBox) {
        let mut offset = region.origin_y;
        let children = self.children(id).to_vec();
        for child in children {
            let height = self.height(child);
            self.draw(child, surface, BoundingBox::new(region.origin_x, offset, region.width, height));
            offset += self.height(child);
        }
    }

    fn draw_horizontal_flow(&mut self, id: NodeId, surface: &mut dyn Surface, region: BoundingBox) {
        let mut offset = region.origin_x;
        let children = self.children(id).to_vec();
        for child in children {
            let width = self.width(child);
            self.draw(child, surface, BoundingBox::new(offset, region.origin_y, width, region.height));
            offset += self.width(child);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
