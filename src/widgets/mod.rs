//! Widgets - interactive compositions of primitives.
//!
//! - [`label`] - `ScrollingLabel`, single-line text scrolling on overflow
//! - [`list`] - `ListItem` and `VerticalList` with exclusive selection
//! - [`menu`] - `Menu`, an animated framed list on its own scene layer
//!
//! Widget handles are `Copy` wrappers around a [`crate::NodeId`]; every
//! method takes the [`crate::Ui`] that owns the node.

pub mod label;
pub mod list;
pub mod menu;

pub use label::ScrollingLabel;
pub use list::{ItemHandler, ListItem, VerticalList};
pub use menu::{HideCallback, Menu};
