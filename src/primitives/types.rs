//! Primitive types - shared state of the built-in node kinds.

use crate::renderer::Image;
use crate::types::Color;

// =============================================================================
// Flow
// =============================================================================

/// How a caching container places its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    /// Every child gets the full container region.
    #[default]
    None,
    /// Children stacked top to bottom at their own heights.
    Vertical,
    /// Children stacked left to right at their own widths.
    Horizontal,
}

// =============================================================================
// ContainerCache
// =============================================================================

/// Offscreen image a container renders its subtree into.
#[derive(Debug, Default)]
pub(crate) struct ContainerCache {
    pub(crate) image: Image,
    /// Filled before children draw. `None` leaves the cache transparent.
    pub(crate) background: Option<Color>,
    pub(crate) flow: Flow,
    /// Number of times the subtree was re-rendered into `image`.
    pub(crate) render_count: u32,
}

impl ContainerCache {
    pub(crate) fn new(flow: Flow) -> Self {
        Self {
            flow,
            ..Default::default()
        }
    }
}
