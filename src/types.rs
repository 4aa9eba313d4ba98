//! Core types for pixel-menu.
//!
//! These are the small value types that flow through every layer: the
//! bounding boxes handed down during layout, palette colors, alignment and
//! button identifiers, font metrics, and the per-node state flags.

// =============================================================================
// Color
// =============================================================================

/// Palette index (0-15 on the reference display).
///
/// Index 0 is transparent when an image is blitted with transparency.
pub type Color = u8;

/// The transparent palette index.
pub const TRANSPARENT: Color = 0;

// =============================================================================
// BoundingBox
// =============================================================================

/// A rectangle handed top-down during layout.
///
/// Immutable by convention: layout code builds new boxes rather than
/// mutating the one it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundingBox {
    pub origin_x: i32,
    pub origin_y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub const fn new(origin_x: i32, origin_y: i32, width: i32, height: i32) -> Self {
        Self {
            origin_x,
            origin_y,
            width,
            height,
        }
    }

    /// A box at the origin with the given size.
    pub const fn sized(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.origin_x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.origin_y + self.height
    }

    /// Check if a point is inside this box.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.origin_x && x < self.right() && y >= self.origin_y && y < self.bottom()
    }
}

// =============================================================================
// Alignment
// =============================================================================

/// Placement of a child along one axis of its available region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Left / top edge.
    #[default]
    Start,
    /// Centered, integer-truncated.
    Center,
    /// Right / bottom edge.
    End,
}

impl Alignment {
    /// Offset of a `content`-sized item inside an `available`-sized span.
    #[inline]
    pub fn offset(self, available: i32, content: i32) -> i32 {
        match self {
            Alignment::Start => 0,
            Alignment::Center => (available - content) / 2,
            Alignment::End => available - content,
        }
    }
}

// =============================================================================
// Button
// =============================================================================

/// Discrete buttons understood by the input router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    A,
    B,
    Up,
    Right,
    Down,
    Left,
    Menu,
}

// =============================================================================
// Font
// =============================================================================

/// Fixed-cell font metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Font {
    pub char_width: i32,
    pub char_height: i32,
}

impl Font {
    /// 6x5 cells, the small menu font.
    pub const FONT5: Font = Font::new(6, 5);
    /// 6x8 cells.
    pub const FONT8: Font = Font::new(6, 8);

    pub const fn new(char_width: i32, char_height: i32) -> Self {
        Self {
            char_width,
            char_height,
        }
    }

    /// Pixel width of `text` when printed in this font.
    pub fn text_width(&self, text: &str) -> i32 {
        text.chars().count() as i32 * self.char_width
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::FONT5
    }
}

// =============================================================================
// Node flags (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Per-node state bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct NodeFlags: u8 {
        /// Rendered output is stale.
        const DIRTY = 1 << 0;
        /// Component is drawn (meaningless without COMPONENT).
        const VISIBLE = 1 << 1;
        /// Node takes part in focus and input routing.
        const COMPONENT = 1 << 2;
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_offsets() {
        assert_eq!(Alignment::Start.offset(100, 30), 0);
        assert_eq!(Alignment::End.offset(100, 30), 70);
        assert_eq!(Alignment::Center.offset(100, 30), 35);
        // Integer truncation
        assert_eq!(Alignment::Center.offset(101, 30), 35);
    }

    #[test]
    fn test_bounding_box_edges() {
        let bb = BoundingBox::new(5, 10, 20, 30);
        assert_eq!(bb.right(), 25);
        assert_eq!(bb.bottom(), 40);
        assert!(bb.contains(5, 10));
        assert!(!bb.contains(25, 10));
    }

    #[test]
    fn test_font_text_width() {
        assert_eq!(Font::FONT5.text_width("Play"), 24);
        assert_eq!(Font::FONT5.text_width(""), 0);
    }

    #[test]
    fn test_node_flags_combine() {
        let mut flags = NodeFlags::DIRTY | NodeFlags::COMPONENT;
        assert!(flags.contains(NodeFlags::DIRTY));
        flags.remove(NodeFlags::DIRTY);
        assert!(!flags.contains(NodeFlags::DIRTY));
        assert!(flags.contains(NodeFlags::COMPONENT));
    }
}
