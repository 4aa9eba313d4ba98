//! Primitives - the built-in node kinds.
//!
//! Each constructor allocates a node in the [`crate::Ui`] arena and returns
//! its [`crate::NodeId`]. Nodes start detached and dirty; attach them with
//! [`crate::Ui::append_child`].
//!
//! - [`layout`] - group, bounds, justified, panel
//! - [`container`] - caching container, vertical and horizontal flows
//! - [`text`] - single-line text
//! - [`shapes`] - rectangle, nine-slice frame, rounded frame

pub mod container;
pub mod layout;
pub mod shapes;
pub mod text;
pub mod types;

pub use types::Flow;
