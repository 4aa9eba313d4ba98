//! Scene layers - per-layer UI state, paint and update ticks.
//!
//! The [`Ui`] keeps a stack of scene layers. Each layer either has a
//! [`UiState`] (root node, focus, per-frame updaters) or has none. Pushing a
//! layer suspends the state below it without touching it; popping resumes
//! it exactly as it was left.
//!
//! ```text
//! layer 0: None                       <- base, never popped
//! layer 1: UiState { root: game_hud } <- suspended
//! layer 2: UiState { root: menu }     <- current
//! ```
//!
//! Every operation that needs a state degrades to a no-op when the current
//! layer has none.

use crate::engine::node::NodeId;
use crate::renderer::Surface;
use crate::state::animate::AnimationId;
use crate::types::BoundingBox;
use crate::ui::Ui;

// =============================================================================
// Updater
// =============================================================================

/// Something advanced once per update tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Updater {
    Animation(AnimationId),
    /// A scrolling label.
    Label(NodeId),
}

// =============================================================================
// UiState
// =============================================================================

/// UI state of one scene layer.
#[derive(Debug)]
pub(crate) struct UiState {
    pub(crate) root: NodeId,
    pub(crate) focus: Option<NodeId>,
    /// Top is the current focus.
    pub(crate) focus_stack: Vec<NodeId>,
    pub(crate) updaters: Vec<Updater>,
    /// Host time of the previous tick, in milliseconds.
    pub(crate) last_tick: Option<u64>,
}

impl UiState {
    pub(crate) fn new(root: NodeId) -> Self {
        Self {
            root,
            focus: None,
            focus_stack: Vec::new(),
            updaters: Vec::new(),
            last_tick: None,
        }
    }
}

// =============================================================================
// SceneStack
// =============================================================================

pub(crate) struct SceneStack {
    layers: Vec<Option<UiState>>,
}

impl SceneStack {
    pub(crate) fn new() -> Self {
        Self { layers: vec![None] }
    }

    pub(crate) fn depth(&self) -> usize {
        self.layers.len()
    }

    pub(crate) fn current(&self) -> Option<&UiState> {
        self.layers.last().and_then(Option::as_ref)
    }

    pub(crate) fn current_mut(&mut self) -> Option<&mut UiState> {
        self.layers.last_mut().and_then(Option::as_mut)
    }

    pub(crate) fn push(&mut self, state: Option<UiState>) {
        self.layers.push(state);
    }

    /// Pop the top layer. The base layer stays.
    pub(crate) fn pop(&mut self) -> Option<Option<UiState>> {
        if self.layers.len() <= 1 {
            return None;
        }
        self.layers.pop()
    }

    /// Drop every registration of `updater`, suspended layers included.
    pub(crate) fn forget(&mut self, updater: Updater) {
        for state in self.layers.iter_mut().flatten() {
            state.updaters.retain(|&u| u != updater);
        }
    }
}

// =============================================================================
// Ui: scene lifecycle
// =============================================================================

impl Ui {
    /// Push a scene layer without UI state, suspending the current one.
    pub fn push_scene(&mut self) {
        self.scenes.push(None);
        tracing::debug!(depth = self.scenes.depth(), "scene pushed");
    }

    /// Make `root` the root of a fresh scene layer.
    ///
    /// The current layer (and its focus and updaters) is suspended until the
    /// new layer is popped.
    pub fn set_root(&mut self, root: NodeId) {
        self.scenes.push(Some(UiState::new(root)));
        tracing::debug!(?root, depth = self.scenes.depth(), "scene pushed with root");
    }

    /// Pop the current scene layer, resuming the one below.
    ///
    /// A root that is still alive is disposed with its layer. The base layer
    /// is never popped.
    pub fn pop_scene(&mut self) {
        let Some(layer) = self.scenes.pop() else {
            return;
        };
        tracing::debug!(depth = self.scenes.depth(), "scene popped");
        if let Some(state) = layer {
            if self.contains(state.root) {
                self.dispose(state.root);
            }
        }
    }

    /// Number of scene layers, including the base.
    pub fn scene_depth(&self) -> usize {
        self.scenes.depth()
    }

    /// Root of the current layer.
    pub fn root(&self) -> Option<NodeId> {
        self.scenes.current().map(|s| s.root)
    }

    // =========================================================================
    // Paint / update
    // =========================================================================

    /// Paint hook: draw the current root over the whole surface.
    pub fn paint(&mut self, surface: &mut dyn Surface) {
        let Some(root) = self.root() else { return };
        let full = BoundingBox::sized(surface.width(), surface.height());
        self.draw(root, surface, full);
    }

    /// Update hook driven by a host clock in milliseconds.
    ///
    /// The first tick of a layer advances by zero.
    pub fn tick(&mut self, now_ms: u64) {
        let Some(state) = self.scenes.current_mut() else {
            return;
        };
        let dt = state
            .last_tick
            .map_or(0, |last| now_ms.saturating_sub(last));
        state.last_tick = Some(now_ms);
        self.advance(dt as f64);
    }

    /// Advance every updater of the current layer by `dt` milliseconds.
    ///
    /// Iterates a snapshot: updaters subscribed during the pass run from the
    /// next pass on, updaters removed during the pass are skipped. A pass
    /// that changes the scene depth ends early, since the remaining entries
    /// belong to a layer that is no longer current.
    pub fn advance(&mut self, dt: f64) {
        let Some(state) = self.scenes.current() else {
            return;
        };
        let snapshot = state.updaters.clone();
        let depth = self.scenes.depth();
        tracing::trace!(dt, updaters = snapshot.len(), "advance");

        for updater in snapshot {
            if !self.is_subscribed(updater) {
                continue;
            }
            match updater {
                Updater::Animation(id) => self.update_animation(id, dt),
                Updater::Label(id) => self.update_label(id, dt),
            }
            if self.scenes.depth() != depth {
                break;
            }
        }
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Register an updater with the current layer.
    pub fn subscribe(&mut self, updater: Updater) {
        if let Some(state) = self.scenes.current_mut() {
            state.updaters.push(updater);
        }
    }

    /// Remove the first registration of `updater`. Absent entries are ignored.
    pub fn unsubscribe(&mut self, updater: Updater) {
        let Some(state) = self.scenes.current_mut() else {
            return;
        };
        if let Some(pos) = state.updaters.iter().position(|&u| u == updater) {
            state.updaters.remove(pos);
        }
    }

    pub fn is_subscribed(&self, updater: Updater) -> bool {
        self.scenes
            .current()
            .is_some_and(|s| s.updaters.contains(&updater))
    }

    /// Whether `id` is the root of the current layer or hangs below it.
    pub(crate) fn in_current_scene(&self, id: NodeId) -> bool {
        let Some(root) = self.root() else {
            return false;
        };
        let mut current = id;
        loop {
            if current == root {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Image;

    fn setup() -> Ui {
        Ui::default()
    }

    #[test]
    fn test_base_layer_has_no_state() {
        let mut ui = setup();
        assert_eq!(ui.scene_depth(), 1);
        assert_eq!(ui.root(), None);

        // Base layer survives a pop
        ui.pop_scene();
        assert_eq!(ui.scene_depth(), 1);
    }

    #[test]
    fn test_set_root_pushes_layer() {
        let mut ui = setup();
        let root = ui.create_group();
        ui.set_root(root);
        assert_eq!(ui.scene_depth(), 2);
        assert_eq!(ui.root(), Some(root));
    }

    #[test]
    fn test_push_suspends_and_pop_resumes() {
        let mut ui = setup();
        let a = ui.create_group();
        ui.set_root(a);
        let updater = Updater::Label(a);
        ui.subscribe(updater);

        ui.push_scene();
        assert_eq!(ui.root(), None);
        assert!(!ui.is_subscribed(updater));

        ui.pop_scene();
        assert_eq!(ui.root(), Some(a));
        assert!(ui.is_subscribed(updater));
        assert!(ui.contains(a));
    }

    #[test]
    fn test_pop_disposes_root() {
        let mut ui = setup();
        let a = ui.create_group();
        let b = ui.create_group();
        ui.set_root(a);
        ui.set_root(b);

        ui.pop_scene();
        assert!(!ui.contains(b));
        assert_eq!(ui.root(), Some(a));
    }

    #[test]
    fn test_dispose_root_pops_layer() {
        let mut ui = setup();
        let root = ui.create_group();
        ui.set_root(root);
        ui.dispose(root);
        assert_eq!(ui.scene_depth(), 1);
    }

    #[test]
    fn test_subscribe_without_state_is_noop() {
        let mut ui = setup();
        let n = ui.create_group();
        ui.subscribe(Updater::Label(n));
        assert!(!ui.is_subscribed(Updater::Label(n)));
        ui.unsubscribe(Updater::Label(n));
    }

    #[test]
    fn test_unsubscribe_removes_first_match() {
        let mut ui = setup();
        let root = ui.create_group();
        ui.set_root(root);
        let u = Updater::Label(root);
        ui.subscribe(u);
        ui.subscribe(u);
        ui.unsubscribe(u);
        assert!(ui.is_subscribed(u));
        ui.unsubscribe(u);
        assert!(!ui.is_subscribed(u));
        // Absent
        ui.unsubscribe(u);
    }

    #[test]
    fn test_dispose_forgets_label_in_suspended_layer() {
        let mut ui = setup();
        let base = ui.create_group();
        let label = ui.create_group();
        ui.append_child(base, label);
        ui.set_root(base);
        ui.subscribe(Updater::Label(label));

        let overlay = ui.create_group();
        ui.set_root(overlay);
        ui.dispose(label);
        ui.pop_scene();
        assert!(!ui.is_subscribed(Updater::Label(label)));
    }

    #[test]
    fn test_in_current_scene_walks_parents() {
        let mut ui = setup();
        let root = ui.create_group();
        let child = ui.create_group();
        let loose = ui.create_group();
        assert!(!ui.in_current_scene(root));

        ui.append_child(root, child);
        ui.set_root(root);
        assert!(ui.in_current_scene(root));
        assert!(ui.in_current_scene(child));
        assert!(!ui.in_current_scene(loose));
    }

    #[test]
    fn test_paint_draws_root_full_surface() {
        let mut ui = setup();
        let rect = ui.create_rect(6);
        ui.set_root(rect);
        let mut screen = Image::new(8, 4);
        ui.paint(&mut screen);
        assert!(screen.pixels().iter().all(|&p| p == 6));
        assert_eq!(ui.bounds(rect), Some(BoundingBox::sized(8, 4)));
    }

    #[test]
    fn test_tick_advances_by_clock_delta() {
        let mut ui = setup();
        let root = ui.create_group();
        ui.set_root(root);
        ui.animate(
            crate::state::animate::Animation::new(root, crate::engine::node::set_width)
                .from(0)
                .to(100)
                .duration(100),
        );

        // First tick of a layer only records the clock
        ui.tick(1000);
        assert_eq!(ui.fixed_width(root), Some(0));
        ui.tick(1040);
        assert_eq!(ui.fixed_width(root), Some(40));
    }

    #[test]
    fn test_paint_without_state_is_noop() {
        let mut ui = setup();
        let mut screen = Image::new(2, 2);
        ui.paint(&mut screen);
        assert!(screen.pixels().iter().all(|&p| p == 0));
    }
}
