//! The UI context.
//!
//! [`Ui`] owns everything the toolkit mutates: the node arena, the animation
//! arena, the stack of scene layers with their focus/updater state, and the
//! configuration. Every entry point (draw, update, input) takes it explicitly;
//! there is no ambient global state.
//!
//! # Host integration
//!
//! ```ignore
//! let mut ui = Ui::new(UiConfig::default());
//! let menu = Menu::new(&mut ui, None);
//! menu.add_item(&mut ui, "Play", |_| {});
//! menu.show(&mut ui);
//!
//! loop {
//!     if let Some(button) = poll_button() {
//!         ui.handle_button(button);
//!     }
//!     ui.tick(now_ms());          // update hook
//!     ui.paint(&mut screen);      // paint hook
//! }
//! ```

use crate::config::UiConfig;
use crate::engine::node::Node;
use crate::engine::registry::Registry;
use crate::state::animate::Animation;
use crate::state::scene::SceneStack;

/// Explicit UI context passed to every entry point.
pub struct Ui {
    pub(crate) nodes: Registry<Node>,
    pub(crate) animations: Registry<Animation>,
    pub(crate) scenes: SceneStack,
    pub(crate) config: UiConfig,
}

impl Ui {
    /// Create an empty context with a single base scene layer and no UI state.
    pub fn new(config: UiConfig) -> Self {
        Self {
            nodes: Registry::new(),
            animations: Registry::new(),
            scenes: SceneStack::new(),
            config,
        }
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of live animations (running or idle).
    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }
}

impl Default for Ui {
    fn default() -> Self {
        Self::new(UiConfig::default())
    }
}
