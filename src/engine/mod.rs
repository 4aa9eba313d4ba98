//! Engine - node storage, tree structure, invalidation and drawing.
//!
//! - Registry: generational slot allocation with index reuse
//! - Node: geometry, parent/child links, dirty bubbling, dispose
//! - Draw: top-down bounds computation and painting
//!
//! # Architecture
//!
//! Nodes are not objects holding references to each other. They live in a
//! slot arena owned by [`crate::Ui`] and point at each other by id:
//!
//! ```text
//! Slot 0: Justified (parent=None, children=[1])
//! Slot 1: Bounds    (parent=0,    children=[2], 100x80)
//! Slot 2: Frame     (parent=1,    children=[3])
//! ```
//!
//! Disposed slots are reused with a bumped generation, so ids held past a
//! dispose resolve to nothing instead of to a stranger.

pub mod draw;
pub mod node;
pub mod registry;

pub use node::{set_height, set_width, ComponentHooks, NodeId};
pub use registry::{Key, Registry};
