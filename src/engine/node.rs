//! Node - geometry, tree ownership and invalidation.
//!
//! Every drawable entity is a [`Node`] stored in the [`Ui`] arena and
//! addressed by a [`NodeId`]. A node owns its children exclusively; a child
//! has exactly one parent, set when it is appended.
//!
//! # Invalidation
//!
//! `notify_change` marks a node dirty and walks up the parent chain through
//! `on_child_did_change`. Each ancestor is marked at most once per dirty
//! period: the walk stops at the first ancestor that is already dirty, or
//! where `should_bubble_change` says not to continue.
//!
//! # Components
//!
//! Nodes flagged [`NodeFlags::COMPONENT`] additionally carry visibility,
//! focus hooks and take part in input routing. Hidden components draw
//! nothing.

use std::rc::Rc;

use crate::engine::registry::Key;
use crate::primitives::types::ContainerCache;
use crate::renderer::FrameSource;
use crate::state::scene::Updater;
use crate::types::{Alignment, BoundingBox, Button, Color, Font, NodeFlags};
use crate::ui::Ui;
use crate::widgets::label::LabelState;
use crate::widgets::list::{ListItemState, ListState};
use crate::widgets::menu::MenuState;

// =============================================================================
// NodeId
// =============================================================================

/// Handle to a node in a [`Ui`]. Stale handles resolve to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) Key);

// =============================================================================
// NodeKind
// =============================================================================

/// Drawing and layout strategy of a node.
pub(crate) enum NodeKind {
    /// Plain node: no drawing, children share its bounds.
    Group,
    /// Fixed-size layout anchor.
    Bounds,
    /// Positions its single child inside its bounds.
    Justified { x: Alignment, y: Alignment },
    Rect { color: Color },
    Text { font: Font, content: String, color: Color },
    /// Nine-slice frame; children get the inset region.
    Frame { source: Rc<FrameSource>, fill: Color },
    /// Caching container, optionally flowing its children.
    Container(ContainerCache),
    /// Caching container holding one text node that scrolls when it overflows.
    ScrollingLabel { cache: ContainerCache, state: LabelState },
    /// Generic component with user hooks.
    Panel,
    ListItem(ListItemState),
    VerticalList(ListState),
    Menu(MenuState),
}

impl NodeKind {
    pub(crate) fn cache(&self) -> Option<&ContainerCache> {
        match self {
            NodeKind::Container(cache) | NodeKind::ScrollingLabel { cache, .. } => Some(cache),
            _ => None,
        }
    }

    pub(crate) fn cache_mut(&mut self) -> Option<&mut ContainerCache> {
        match self {
            NodeKind::Container(cache) | NodeKind::ScrollingLabel { cache, .. } => Some(cache),
            _ => None,
        }
    }
}

// =============================================================================
// Component hooks
// =============================================================================

/// Optional callbacks fired on component lifecycle and input events.
#[derive(Default)]
pub struct ComponentHooks {
    pub on_focus: Option<Box<dyn FnMut()>>,
    pub on_blur: Option<Box<dyn FnMut()>>,
    pub on_shown: Option<Box<dyn FnMut()>>,
    pub on_hidden: Option<Box<dyn FnMut()>>,
    /// Input handler for panels. Returns whether the input was consumed.
    pub on_input: Option<Box<dyn FnMut(Button) -> bool>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Hook {
    Focus,
    Blur,
    Shown,
    Hidden,
}

// =============================================================================
// Node
// =============================================================================

pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) top: i32,
    pub(crate) left: i32,
    pub(crate) fixed_width: Option<i32>,
    pub(crate) fixed_height: Option<i32>,
    /// Bounds from the last layout pass.
    pub(crate) bounds: Option<BoundingBox>,
    pub(crate) flags: NodeFlags,
    pub(crate) hooks: ComponentHooks,
    pub(crate) kind: NodeKind,
}

impl Node {
    /// A dirty, parentless node.
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            top: 0,
            left: 0,
            fixed_width: None,
            fixed_height: None,
            bounds: None,
            flags: NodeFlags::DIRTY,
            hooks: ComponentHooks::default(),
            kind,
        }
    }

    /// A hidden component.
    pub(crate) fn component(kind: NodeKind) -> Self {
        let mut node = Self::new(kind);
        node.flags.insert(NodeFlags::COMPONENT);
        node
    }

    pub(crate) fn with_size(mut self, width: i32, height: i32) -> Self {
        self.fixed_width = Some(width);
        self.fixed_height = Some(height);
        self
    }

    /// Fixed width, else the width of the last computed bounds.
    pub(crate) fn width(&self) -> i32 {
        self.fixed_width
            .or(self.bounds.map(|b| b.width))
            .unwrap_or(0)
    }

    /// Fixed height, else the height of the last computed bounds.
    pub(crate) fn height(&self) -> i32 {
        self.fixed_height
            .or(self.bounds.map(|b| b.height))
            .unwrap_or(0)
    }

    #[inline]
    pub(crate) fn is_dirty(&self) -> bool {
        self.flags.contains(NodeFlags::DIRTY)
    }

    #[inline]
    pub(crate) fn is_component(&self) -> bool {
        self.flags.contains(NodeFlags::COMPONENT)
    }

    fn hook_mut(&mut self, hook: Hook) -> Option<&mut Box<dyn FnMut()>> {
        match hook {
            Hook::Focus => self.hooks.on_focus.as_mut(),
            Hook::Blur => self.hooks.on_blur.as_mut(),
            Hook::Shown => self.hooks.on_shown.as_mut(),
            Hook::Hidden => self.hooks.on_hidden.as_mut(),
        }
    }
}

// =============================================================================
// Tree
// =============================================================================

impl Ui {
    pub(crate) fn insert_node(&mut self, node: Node) -> NodeId {
        NodeId(self.nodes.allocate(node))
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Check if `id` still refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(id.0)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Children in draw order (empty for stale ids).
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Append `child` to `parent`, detaching it from any previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || !self.contains(parent) || !self.contains(child) {
            return;
        }
        self.detach(child);
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
        self.notify_change(parent);
    }

    /// Remove `child` from its parent's child list.
    pub(crate) fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.node_mut(child).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(node) = self.node_mut(parent) {
            node.children.retain(|&c| c != child);
        }
        self.notify_change(parent);
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    pub fn top(&self, id: NodeId) -> i32 {
        self.node(id).map_or(0, |n| n.top)
    }

    pub fn left(&self, id: NodeId) -> i32 {
        self.node(id).map_or(0, |n| n.left)
    }

    pub fn set_top(&mut self, id: NodeId, top: i32) {
        let Some(node) = self.node_mut(id) else { return };
        if node.top == top {
            return;
        }
        node.top = top;
        self.notify_change(id);
    }

    pub fn set_left(&mut self, id: NodeId, left: i32) {
        let Some(node) = self.node_mut(id) else { return };
        if node.left == left {
            return;
        }
        node.left = left;
        self.notify_change(id);
    }

    /// `top + fixed_height`.
    pub fn bottom(&self, id: NodeId) -> i32 {
        self.node(id)
            .map_or(0, |n| n.top + n.fixed_height.unwrap_or(0))
    }

    /// Move the node so its bottom edge lands on `bottom`.
    pub fn set_bottom(&mut self, id: NodeId, bottom: i32) {
        let Some(height) = self.node(id).map(|n| n.fixed_height.unwrap_or(0)) else {
            return;
        };
        self.set_top(id, bottom - height);
    }

    /// `left + fixed_width`.
    pub fn right(&self, id: NodeId) -> i32 {
        self.node(id)
            .map_or(0, |n| n.left + n.fixed_width.unwrap_or(0))
    }

    /// Move the node so its right edge lands on `right`.
    pub fn set_right(&mut self, id: NodeId, right: i32) {
        let Some(width) = self.node(id).map(|n| n.fixed_width.unwrap_or(0)) else {
            return;
        };
        self.set_left(id, right - width);
    }

    /// Effective width: fixed width if set, else the last computed bounds.
    /// Zero before the first draw of a node without a fixed width.
    pub fn width(&self, id: NodeId) -> i32 {
        self.node(id).map_or(0, Node::width)
    }

    /// Effective height, see [`Ui::width`].
    pub fn height(&self, id: NodeId) -> i32 {
        self.node(id).map_or(0, Node::height)
    }

    pub fn fixed_width(&self, id: NodeId) -> Option<i32> {
        self.node(id).and_then(|n| n.fixed_width)
    }

    pub fn fixed_height(&self, id: NodeId) -> Option<i32> {
        self.node(id).and_then(|n| n.fixed_height)
    }

    pub fn set_fixed_width(&mut self, id: NodeId, width: Option<i32>) {
        let Some(node) = self.node_mut(id) else { return };
        if node.fixed_width == width {
            return;
        }
        node.fixed_width = width;
        self.notify_change(id);
    }

    pub fn set_fixed_height(&mut self, id: NodeId, height: Option<i32>) {
        let Some(node) = self.node_mut(id) else { return };
        if node.fixed_height == height {
            return;
        }
        node.fixed_height = height;
        self.notify_change(id);
    }

    /// Bounds computed by the last draw, if the node has been drawn.
    pub fn bounds(&self, id: NodeId) -> Option<BoundingBox> {
        self.node(id).and_then(|n| n.bounds)
    }

    // =========================================================================
    // Invalidation
    // =========================================================================

    pub fn is_dirty(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(Node::is_dirty)
    }

    /// Mark `id` dirty and bubble the change toward the root.
    ///
    /// No-op if the node is already dirty.
    pub fn notify_change(&mut self, id: NodeId) {
        let Some(node) = self.node_mut(id) else { return };
        if node.is_dirty() {
            return;
        }
        node.flags.insert(NodeFlags::DIRTY);
        let parent = node.parent;
        tracing::trace!(node = ?id, "node changed");
        if let Some(parent) = parent {
            self.on_child_did_change(parent, id);
        }
    }

    /// Called on `id` when one of its children became dirty.
    pub(crate) fn on_child_did_change(&mut self, id: NodeId, child: NodeId) {
        let mut current = id;
        let mut changed = child;
        loop {
            let Some(node) = self.node_mut(current) else { return };
            if node.is_dirty() {
                return;
            }
            node.flags.insert(NodeFlags::DIRTY);
            if !self.should_bubble_change(current, changed) {
                return;
            }
            let Some(parent) = self.parent(current) else { return };
            changed = current;
            current = parent;
        }
    }

    /// Whether a child change on `id` continues toward the root.
    ///
    /// Caching containers always bubble; other nodes bubble while they have
    /// a parent.
    pub(crate) fn should_bubble_change(&self, id: NodeId, _child: NodeId) -> bool {
        match self.node(id) {
            Some(node) if node.kind.cache().is_some() => true,
            Some(node) => node.parent.is_some(),
            None => false,
        }
    }

    // =========================================================================
    // Components
    // =========================================================================

    pub fn is_component(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(Node::is_component)
    }

    pub fn is_visible(&self, id: NodeId) -> bool {
        self.node(id)
            .is_some_and(|n| n.flags.contains(NodeFlags::VISIBLE))
    }

    /// Show a component. Idempotent.
    pub fn show(&mut self, id: NodeId) {
        let Some(node) = self.node_mut(id) else { return };
        if !node.is_component() || node.flags.contains(NodeFlags::VISIBLE) {
            return;
        }
        node.flags.insert(NodeFlags::VISIBLE);
        self.run_hook(id, Hook::Shown);
        self.notify_change(id);
    }

    /// Hide a component. Idempotent.
    pub fn hide(&mut self, id: NodeId) {
        let Some(node) = self.node_mut(id) else { return };
        if !node.is_component() || !node.flags.contains(NodeFlags::VISIBLE) {
            return;
        }
        node.flags.remove(NodeFlags::VISIBLE);
        self.run_hook(id, Hook::Hidden);
        self.notify_change(id);
    }

    /// Install lifecycle/input hooks on a component.
    pub fn set_hooks(&mut self, id: NodeId, hooks: ComponentHooks) {
        if let Some(node) = self.node_mut(id) {
            node.hooks = hooks;
        }
    }

    pub(crate) fn run_hook(&mut self, id: NodeId, hook: Hook) {
        if let Some(callback) = self.node_mut(id).and_then(|n| n.hook_mut(hook)) {
            callback();
        }
    }

    // =========================================================================
    // Dispose
    // =========================================================================

    /// Dispose a node and its whole subtree.
    ///
    /// Components leave the focus stack, animations targeting disposed nodes
    /// are dropped without firing their end handlers, label updaters are
    /// removed from every layer, and disposing the root
    /// of the current scene layer pops that layer. Disposing a stale id is a
    /// no-op.
    pub fn dispose(&mut self, id: NodeId) {
        let Some(node) = self.node_mut(id) else { return };
        let children = std::mem::take(&mut node.children);
        let is_component = node.is_component();

        for child in children {
            if let Some(node) = self.node_mut(child) {
                node.parent = None;
            }
            self.dispose(child);
        }

        if is_component {
            self.dispose_component(id);
        }
        self.drop_animations_targeting(id);
        self.scenes.forget(Updater::Label(id));
        self.detach(id);

        let was_root = self.scenes.current().is_some_and(|s| s.root == id);
        self.nodes.release(id.0);
        tracing::trace!(node = ?id, "node disposed");

        if was_root {
            self.pop_scene();
        }
    }
}

/// Animation callback setting a node's fixed width.
pub fn set_width(ui: &mut Ui, id: NodeId, value: i32) {
    ui.set_fixed_width(id, Some(value));
}

/// Animation callback setting a node's fixed height.
pub fn set_height(ui: &mut Ui, id: NodeId, value: i32) {
    ui.set_fixed_height(id, Some(value));
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn setup() -> Ui {
        Ui::default()
    }

    fn clear_dirty(ui: &mut Ui, ids: &[NodeId]) {
        for &id in ids {
            ui.node_mut(id).unwrap().flags.remove(NodeFlags::DIRTY);
        }
    }

    #[test]
    fn test_new_node_is_dirty() {
        let mut ui = setup();
        let n = ui.create_group();
        assert!(ui.is_dirty(n));
        assert_eq!(ui.parent(n), None);
    }

    #[test]
    fn test_append_child_sets_parent() {
        let mut ui = setup();
        let parent = ui.create_group();
        let a = ui.create_group();
        let b = ui.create_group();
        ui.append_child(parent, a);
        ui.append_child(parent, b);

        assert_eq!(ui.parent(a), Some(parent));
        assert_eq!(ui.children(parent), &[a, b]);
    }

    #[test]
    fn test_reparent_moves_child() {
        let mut ui = setup();
        let p1 = ui.create_group();
        let p2 = ui.create_group();
        let c = ui.create_group();
        ui.append_child(p1, c);
        ui.append_child(p2, c);

        assert!(ui.children(p1).is_empty());
        assert_eq!(ui.children(p2), &[c]);
        assert_eq!(ui.parent(c), Some(p2));
    }

    #[test]
    fn test_notify_bubbles_to_root() {
        let mut ui = setup();
        let root = ui.create_group();
        let mid = ui.create_group();
        let leaf = ui.create_group();
        ui.append_child(root, mid);
        ui.append_child(mid, leaf);
        clear_dirty(&mut ui, &[root, mid, leaf]);

        ui.notify_change(leaf);
        assert!(ui.is_dirty(leaf));
        assert!(ui.is_dirty(mid));
        assert!(ui.is_dirty(root));
    }

    #[test]
    fn test_notify_is_idempotent() {
        let mut ui = setup();
        let root = ui.create_group();
        let leaf = ui.create_group();
        ui.append_child(root, leaf);
        clear_dirty(&mut ui, &[root, leaf]);

        ui.notify_change(leaf);
        // Parent cleaned by a draw while the child stays dirty
        clear_dirty(&mut ui, &[root]);
        ui.notify_change(leaf);
        assert!(!ui.is_dirty(root));
    }

    #[test]
    fn test_bubble_stops_at_dirty_ancestor() {
        let mut ui = setup();
        let root = ui.create_group();
        let mid = ui.create_group();
        let leaf = ui.create_group();
        ui.append_child(root, mid);
        ui.append_child(mid, leaf);
        clear_dirty(&mut ui, &[root, leaf]);

        // mid still dirty: the walk ends there
        ui.notify_change(leaf);
        assert!(!ui.is_dirty(root));
    }

    #[test]
    fn test_geometry_setters_notify_only_on_change() {
        let mut ui = setup();
        let n = ui.create_bounds(10, 20);
        clear_dirty(&mut ui, &[n]);

        ui.set_left(n, 0);
        assert!(!ui.is_dirty(n));
        ui.set_left(n, 4);
        assert!(ui.is_dirty(n));
        assert_eq!(ui.right(n), 14);

        ui.set_bottom(n, 50);
        assert_eq!(ui.top(n), 30);
        assert_eq!(ui.bottom(n), 50);

        ui.set_right(n, 40);
        assert_eq!(ui.left(n), 30);
    }

    #[test]
    fn test_width_falls_back_to_bounds() {
        let mut ui = setup();
        let n = ui.create_group();
        assert_eq!(ui.width(n), 0);
        ui.node_mut(n).unwrap().bounds = Some(BoundingBox::new(0, 0, 33, 44));
        assert_eq!(ui.width(n), 33);
        assert_eq!(ui.height(n), 44);
        ui.set_fixed_width(n, Some(5));
        assert_eq!(ui.width(n), 5);
    }

    #[test]
    fn test_show_hide_idempotent() {
        let mut ui = setup();
        let shown = Rc::new(Cell::new(0));
        let hidden = Rc::new(Cell::new(0));
        let p = ui.create_panel();
        let (s, h) = (shown.clone(), hidden.clone());
        ui.set_hooks(
            p,
            ComponentHooks {
                on_shown: Some(Box::new(move || s.set(s.get() + 1))),
                on_hidden: Some(Box::new(move || h.set(h.get() + 1))),
                ..Default::default()
            },
        );

        assert!(!ui.is_visible(p));
        ui.show(p);
        ui.show(p);
        assert!(ui.is_visible(p));
        assert_eq!(shown.get(), 1);

        ui.hide(p);
        ui.hide(p);
        assert_eq!(hidden.get(), 1);
    }

    #[test]
    fn test_show_ignores_plain_nodes() {
        let mut ui = setup();
        let n = ui.create_group();
        ui.show(n);
        assert!(!ui.is_visible(n));
    }

    #[test]
    fn test_dispose_subtree() {
        let mut ui = setup();
        let root = ui.create_group();
        let mid = ui.create_group();
        let leaf = ui.create_group();
        ui.append_child(root, mid);
        ui.append_child(mid, leaf);

        ui.dispose(mid);
        assert!(!ui.contains(mid));
        assert!(!ui.contains(leaf));
        assert!(ui.children(root).is_empty());
        assert_eq!(ui.node_count(), 1);

        // Double dispose is a no-op
        ui.dispose(mid);
        assert_eq!(ui.node_count(), 1);
    }

    #[test]
    fn test_stale_id_operations_are_noops() {
        let mut ui = setup();
        let n = ui.create_group();
        ui.dispose(n);
        ui.set_left(n, 5);
        ui.notify_change(n);
        assert_eq!(ui.left(n), 0);
        assert!(!ui.is_dirty(n));
        assert_eq!(ui.bounds(n), None);
    }

    #[test]
    fn test_set_width_height_helpers() {
        let mut ui = setup();
        let n = ui.create_group();
        set_width(&mut ui, n, 12);
        set_height(&mut ui, n, 7);
        assert_eq!(ui.fixed_width(n), Some(12));
        assert_eq!(ui.fixed_height(n), Some(7));
    }
}
