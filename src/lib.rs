//! # pixel-menu
//!
//! Retained-mode UI toolkit for small pixel displays.
//!
//! ## Architecture
//!
//! The UI is a tree of nodes stored in an arena owned by an explicit [`Ui`]
//! context. Nodes lay themselves out top-down during draw, cache subtrees in
//! offscreen images where it pays off, and mark themselves dirty on change so
//! that only changed subtrees re-render:
//!
//! ```text
//! input -> focused component -> bubble up -> node setters -> notify_change
//!                                                               |
//! tick  -> animations / scrolling labels -> node setters -------+
//!                                                               v
//! paint -> root.draw(surface) -> containers re-render only while dirty
//! ```
//!
//! A stack of scene layers holds per-layer UI state (root, focus stack,
//! per-frame updaters). Showing a menu pushes a layer; disposing its root pops
//! it and resumes whatever was underneath.
//!
//! ## Modules
//!
//! - [`types`] - Core types (BoundingBox, Color, Alignment, Button, Font, NodeFlags)
//! - [`config`] - Screen size, widget styles, palette, key bindings
//! - [`engine`] - Node arena, tree, invalidation, draw pass
//! - [`primitives`] - Built-in node kinds (bounds, flows, frames, text, ...)
//! - [`state`] - Scene layers, focus, animation, input routing
//! - [`widgets`] - ScrollingLabel, ListItem, VerticalList, Menu
//! - [`renderer`] - Pixel surfaces, nine-slice frames, terminal presenter

pub mod config;
pub mod engine;
pub mod error;
pub mod primitives;
pub mod renderer;
pub mod state;
pub mod types;
pub mod ui;
pub mod widgets;

// Re-export commonly used items
pub use types::*;

pub use config::{KeyMap, LabelStyle, ListStyle, MenuStyle, Palette, UiConfig};
pub use engine::{set_height, set_width, ComponentHooks, NodeId};
pub use error::{Error, Result};
pub use primitives::Flow;
pub use renderer::{FrameSource, Image, Surface, TerminalPresenter};
pub use state::{
    button_from_key, poll_event, read_event, route_event, Animation, AnimationId, InputEvent,
    Updater,
};
pub use ui::Ui;
pub use widgets::{ListItem, Menu, ScrollingLabel, VerticalList};
