//! Animation - linear interpolation of an integer property over time.
//!
//! An [`Animation`] runs a callback once per update tick with a value moving
//! linearly from `from` to `to` over `duration` milliseconds. Animations live
//! in the [`Ui`] animation arena and are addressed by [`AnimationId`].
//!
//! # Pattern
//!
//! - `start` subscribes the animation to the current scene layer
//! - each tick advances `elapsed`, runs the callback, invalidates the target
//! - once `elapsed` exceeds the duration the animation stops, fires its
//!   end handler, and starts its chained successor if it has one
//! - `loop_animation` chains an animation to itself
//!
//! # Example
//!
//! ```ignore
//! let grow = ui.add_animation(
//!     Animation::new(panel, set_height).from(0).to(80).duration(200),
//! );
//! ui.start_animation(grow);
//! ```

use crate::engine::node::NodeId;
use crate::engine::registry::Key;
use crate::state::scene::Updater;
use crate::ui::Ui;

/// Per-frame callback: receives the target node and the current value.
pub type AnimationCallback = Box<dyn FnMut(&mut Ui, NodeId, i32)>;

/// Fired when an animation stops.
pub type EndedHandler = Box<dyn FnMut(&mut Ui)>;

/// Handle to an animation in a [`Ui`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(pub(crate) Key);

// =============================================================================
// Animation
// =============================================================================

pub struct Animation {
    target: NodeId,
    callback: Option<AnimationCallback>,
    from: i32,
    to: i32,
    /// Milliseconds.
    duration: u32,
    elapsed: f64,
    running: bool,
    next: Option<AnimationId>,
    on_ended: Option<EndedHandler>,
}

impl Animation {
    pub fn new(target: NodeId, callback: impl FnMut(&mut Ui, NodeId, i32) + 'static) -> Self {
        Self {
            target,
            callback: Some(Box::new(callback)),
            from: 0,
            to: 0,
            duration: 0,
            elapsed: 0.0,
            running: false,
            next: None,
            on_ended: None,
        }
    }

    pub fn from(mut self, start: i32) -> Self {
        self.from = start;
        self
    }

    pub fn to(mut self, end: i32) -> Self {
        self.to = end;
        self
    }

    /// Duration in milliseconds.
    pub fn duration(mut self, period: u32) -> Self {
        self.duration = period;
        self
    }

    /// Run `next` once this animation completes. Only one successor is kept.
    pub fn chain(mut self, next: AnimationId) -> Self {
        self.next = Some(next);
        self
    }

    pub fn on_ended(mut self, handler: impl FnMut(&mut Ui) + 'static) -> Self {
        self.on_ended = Some(Box::new(handler));
        self
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Interpolated value after `elapsed` milliseconds, clamped toward `to`.
    pub fn value_at(&self, elapsed: f64) -> i32 {
        let raw = if self.duration == 0 {
            self.to
        } else {
            let span = f64::from(self.to) - f64::from(self.from);
            (f64::from(self.from) + span * elapsed / f64::from(self.duration)) as i32
        };
        if self.from > self.to {
            raw.max(self.to)
        } else {
            raw.min(self.to)
        }
    }
}

impl std::fmt::Debug for Animation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animation")
            .field("target", &self.target)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("duration", &self.duration)
            .field("elapsed", &self.elapsed)
            .field("running", &self.running)
            .field("next", &self.next)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Ui: animation lifecycle
// =============================================================================

impl Ui {
    /// Store an animation without starting it.
    pub fn add_animation(&mut self, animation: Animation) -> AnimationId {
        AnimationId(self.animations.allocate(animation))
    }

    /// Store and start an animation.
    pub fn animate(&mut self, animation: Animation) -> AnimationId {
        let id = self.add_animation(animation);
        self.start_animation(id);
        id
    }

    /// Set the successor of an already stored animation.
    pub fn chain_animation(&mut self, id: AnimationId, next: AnimationId) {
        if let Some(animation) = self.animations.get_mut(id.0) {
            animation.next = Some(next);
        }
    }

    /// Start a single run. No-op if already running.
    pub fn start_animation(&mut self, id: AnimationId) {
        let Some(animation) = self.animations.get_mut(id.0) else {
            return;
        };
        if animation.running {
            return;
        }
        animation.running = true;
        self.subscribe(Updater::Animation(id));
    }

    /// Run repeatedly until stopped.
    pub fn loop_animation(&mut self, id: AnimationId) {
        self.chain_animation(id, id);
        self.start_animation(id);
    }

    /// Stop, reset and fire the end handler.
    pub fn stop_animation(&mut self, id: AnimationId) {
        let Some(animation) = self.animations.get_mut(id.0) else {
            return;
        };
        animation.running = false;
        animation.elapsed = 0.0;
        let handler = animation.on_ended.take();
        self.unsubscribe(Updater::Animation(id));

        if let Some(mut handler) = handler {
            handler(self);
            if let Some(animation) = self.animations.get_mut(id.0) {
                animation.on_ended.get_or_insert(handler);
            }
        }
    }

    /// Drop an animation. Stale ids are ignored; no handler fires.
    pub fn remove_animation(&mut self, id: AnimationId) {
        if self.animations.release(id.0).is_some() {
            self.scenes.forget(Updater::Animation(id));
        }
    }

    pub fn is_animation_running(&self, id: AnimationId) -> bool {
        self.animations.get(id.0).is_some_and(|a| a.running)
    }

    pub(crate) fn drop_animations_targeting(&mut self, target: NodeId) {
        let doomed: Vec<AnimationId> = self
            .animations
            .iter()
            .filter(|(_, a)| a.target == target)
            .map(|(key, _)| AnimationId(key))
            .collect();
        for id in doomed {
            self.remove_animation(id);
        }
    }

    /// One update step of a subscribed animation.
    pub(crate) fn update_animation(&mut self, id: AnimationId, dt: f64) {
        let Some(animation) = self.animations.get_mut(id.0) else {
            return;
        };
        if !animation.running {
            return;
        }
        animation.elapsed += dt;
        let value = animation.value_at(animation.elapsed);
        let target = animation.target;
        let callback = animation.callback.take();
        tracing::trace!(animation = ?id, value, "animation step");

        if let Some(mut callback) = callback {
            callback(self, target, value);
            if let Some(animation) = self.animations.get_mut(id.0) {
                animation.callback.get_or_insert(callback);
            }
            self.notify_change(target);
        }

        let Some(animation) = self.animations.get(id.0) else {
            return;
        };
        if animation.elapsed > f64::from(animation.duration) {
            let next = animation.next;
            self.stop_animation(id);
            if let Some(next) = next {
                self.start_animation(next);
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
    use crate::engine::node::set_height;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn setup() -> (Ui, NodeId) {
        let mut ui = Ui::default();
        let root = ui.create_bounds(0, 0);
        ui.set_root(root);
        (ui, root)
    }

    fn recorder(values: &Rc<RefCell<Vec<i32>>>) -> impl FnMut(&mut Ui, NodeId, i32) + 'static {
        let values = values.clone();
        move |_, _, v| values.borrow_mut().push(v)
    }

    #[test]
    fn test_value_clamps_toward_end() {
        let (_, root) = setup();
        let up = Animation::new(root, |_, _, _| {}).from(0).to(100).duration(100);
        assert_eq!(up.value_at(30.0), 30);
        assert_eq!(up.value_at(150.0), 100);

        let down = Animation::new(root, |_, _, _| {}).from(100).to(10).duration(90);
        assert_eq!(down.value_at(45.0), 55);
        assert_eq!(down.value_at(200.0), 10);
    }

    #[test]
    fn test_zero_duration_jumps_to_end() {
        let (_, root) = setup();
        let a = Animation::new(root, |_, _, _| {}).from(3).to(9);
        assert_eq!(a.value_at(0.0), 9);
    }

    #[test]
    fn test_monotonic_run() {
        let (mut ui, root) = setup();
        let values = Rc::new(RefCell::new(Vec::new()));
        let id = ui.animate(Animation::new(root, recorder(&values)).from(0).to(100).duration(100));

        for dt in [30.0, 40.0, 40.0] {
            ui.advance(dt);
        }
        assert_eq!(*values.borrow(), [30, 70, 100]);
        assert!(!ui.is_animation_running(id));
    }

    #[test]
    fn test_callback_drives_target() {
        let (mut ui, root) = setup();
        ui.animate(Animation::new(root, set_height).from(0).to(50).duration(100));
        ui.advance(50.0);
        assert_eq!(ui.fixed_height(root), Some(25));
        assert!(ui.is_dirty(root));
    }

    #[test]
    fn test_start_is_noop_while_running() {
        let (mut ui, root) = setup();
        let id = ui.animate(Animation::new(root, |_, _, _| {}).duration(100));
        ui.start_animation(id);
        let subs = ui.scenes.current().unwrap().updaters.len();
        assert_eq!(subs, 1);
    }

    #[test]
    fn test_completion_fires_once_and_starts_successor() {
        let (mut ui, root) = setup();
        let ended = Rc::new(Cell::new(0));
        let e = ended.clone();
        let second = ui.add_animation(Animation::new(root, |_, _, _| {}).duration(10));
        let first = ui.animate(
            Animation::new(root, |_, _, _| {})
                .duration(10)
                .chain(second)
                .on_ended(move |_| e.set(e.get() + 1)),
        );

        ui.advance(11.0);
        assert_eq!(ended.get(), 1);
        assert!(!ui.is_animation_running(first));
        assert!(ui.is_animation_running(second));

        ui.advance(11.0);
        assert_eq!(ended.get(), 1);
        assert!(!ui.is_animation_running(second));
    }

    #[test]
    fn test_elapsed_equal_to_duration_keeps_running() {
        let (mut ui, root) = setup();
        let id = ui.animate(Animation::new(root, |_, _, _| {}).duration(10));
        ui.advance(10.0);
        assert!(ui.is_animation_running(id));
        ui.advance(1.0);
        assert!(!ui.is_animation_running(id));
    }

    #[test]
    fn test_loop_restarts() {
        let (mut ui, root) = setup();
        let values = Rc::new(RefCell::new(Vec::new()));
        let id = ui.add_animation(Animation::new(root, recorder(&values)).from(0).to(10).duration(10));
        ui.loop_animation(id);

        ui.advance(11.0);
        assert!(ui.is_animation_running(id));
        ui.advance(5.0);
        assert_eq!(*values.borrow(), [10, 5]);

        ui.stop_animation(id);
        assert!(!ui.is_animation_running(id));
    }

    #[test]
    fn test_stop_fires_handler() {
        let (mut ui, root) = setup();
        let ended = Rc::new(Cell::new(0));
        let e = ended.clone();
        let id = ui.animate(
            Animation::new(root, |_, _, _| {})
                .duration(100)
                .on_ended(move |_| e.set(e.get() + 1)),
        );
        ui.advance(20.0);
        ui.stop_animation(id);
        assert_eq!(ended.get(), 1);
        assert!(!ui.is_subscribed(Updater::Animation(id)));

        // Restart runs from zero
        let values = Rc::new(RefCell::new(Vec::new()));
        let extra = ui.animate(Animation::new(root, recorder(&values)).from(0).to(100).duration(100));
        ui.advance(10.0);
        assert_eq!(*values.borrow(), [10]);
        ui.remove_animation(extra);
    }

    #[test]
    fn test_dispose_target_drops_animation() {
        let (mut ui, _) = setup();
        let node = ui.create_group();
        let ended = Rc::new(Cell::new(0));
        let e = ended.clone();
        let id = ui.animate(
            Animation::new(node, |_, _, _| {})
                .duration(100)
                .on_ended(move |_| e.set(e.get() + 1)),
        );

        ui.dispose(node);
        assert_eq!(ui.animation_count(), 0);
        assert_eq!(ended.get(), 0);
        assert!(!ui.is_subscribed(Updater::Animation(id)));
        ui.advance(200.0);
    }

    #[test]
    fn test_subscription_during_pass_runs_next_pass() {
        let (mut ui, root) = setup();
        let values = Rc::new(RefCell::new(Vec::new()));
        let late = ui.add_animation(Animation::new(root, recorder(&values)).from(0).to(100).duration(100));
        ui.animate(
            Animation::new(root, |_, _, _| {})
                .duration(5)
                .on_ended(move |ui| ui.start_animation(late)),
        );

        ui.advance(10.0);
        assert!(values.borrow().is_empty());
        ui.advance(10.0);
        assert_eq!(*values.borrow(), [10]);
    }
}
