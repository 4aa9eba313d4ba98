//! State Module - runtime state of the UI
//!
//! - **Scene** - layer stack, per-layer root/focus/updaters, paint + update ticks
//! - **Focus** - focus stack, blur/focus hooks
//! - **Animate** - linear animations with chaining and looping
//! - **Input** - button routing, crossterm key conversion

pub mod animate;
pub mod focus;
pub mod input;
pub mod scene;

pub use animate::{Animation, AnimationId};
pub use input::{button_from_key, poll_event, read_event, route_event, InputEvent};
pub use scene::Updater;
