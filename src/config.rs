//! Configuration - screen size, widget styles, palette and key bindings.
//!
//! Plain data with `Default` impls. Override single fields with struct
//! update syntax:
//!
//! ```ignore
//! let config = UiConfig {
//!     screen_width: 128,
//!     screen_height: 128,
//!     ..Default::default()
//! };
//! ```

use crossterm::event::KeyCode;

use crate::types::{Button, Color, Font};

// =============================================================================
// UiConfig
// =============================================================================

/// Top-level configuration owned by a [`crate::Ui`].
#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    /// Width of the display surface in pixels.
    pub screen_width: i32,
    /// Height of the display surface in pixels.
    pub screen_height: i32,
    pub menu: MenuStyle,
    pub list: ListStyle,
    pub label: LabelStyle,
    pub palette: Palette,
    pub keys: KeyMap,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            screen_width: 160,
            screen_height: 120,
            menu: MenuStyle::default(),
            list: ListStyle::default(),
            label: LabelStyle::default(),
            palette: Palette::default(),
            keys: KeyMap::default(),
        }
    }
}

// =============================================================================
// Widget styles
// =============================================================================

/// Menu geometry, frame colors and grow/shrink timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuStyle {
    /// Gap between the fully grown menu and the screen edge.
    pub margin: i32,
    pub corner_radius: i32,
    pub border_color: Color,
    pub fill_color: Color,
    /// Inset of the list inside the frame.
    pub list_inset: i32,
    /// Inset of the list's item flow inside the list.
    pub flow_inset: i32,
    /// Duration of each grow/shrink stage in milliseconds.
    pub stage_duration_ms: u32,
    pub font: Font,
}

impl Default for MenuStyle {
    fn default() -> Self {
        Self {
            margin: 10,
            corner_radius: 5,
            border_color: 1,
            fill_color: 3,
            list_inset: 10,
            flow_inset: 24,
            stage_duration_ms: 200,
            font: Font::FONT5,
        }
    }
}

/// List item colors and spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListStyle {
    pub selected_background: Color,
    pub selected_text: Color,
    pub background: Color,
    pub text: Color,
    /// Added to the font height to get the item height.
    pub item_padding: i32,
}

impl Default for ListStyle {
    fn default() -> Self {
        Self {
            selected_background: 10,
            selected_text: 1,
            background: 0,
            text: 2,
            item_padding: 6,
        }
    }
}

/// Scrolling label timing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStyle {
    /// Pause at either end of the scroll, in milliseconds.
    pub pause_ms: f64,
    /// Scroll speed in pixels per millisecond.
    pub speed: f64,
    pub color: Color,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            pause_ms: 750.0,
            speed: 1.0 / 100.0,
            color: 1,
        }
    }
}

// =============================================================================
// Palette
// =============================================================================

/// RGB values for the 16 palette indices, used by the terminal presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub colors: [(u8, u8, u8); 16],
}

impl Palette {
    /// RGB for a palette index. Out-of-range indices wrap.
    pub fn rgb(&self, color: Color) -> (u8, u8, u8) {
        self.colors[color as usize % self.colors.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: [
                (0x00, 0x00, 0x00),
                (0xff, 0xff, 0xff),
                (0xff, 0x21, 0x21),
                (0xff, 0x93, 0xc4),
                (0xff, 0x81, 0x35),
                (0xff, 0xf6, 0x09),
                (0x24, 0x9c, 0xa3),
                (0x78, 0xdc, 0x52),
                (0x00, 0x3f, 0xad),
                (0x87, 0xf2, 0xff),
                (0x8e, 0x2e, 0xc4),
                (0xa4, 0x83, 0x9f),
                (0x5c, 0x40, 0x6c),
                (0xe5, 0xcd, 0xc4),
                (0x91, 0x46, 0x3d),
                (0x00, 0x00, 0x00),
            ],
        }
    }
}

// =============================================================================
// KeyMap
// =============================================================================

/// Terminal key bindings for each button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    pub bindings: Vec<(KeyCode, Button)>,
}

impl KeyMap {
    /// Look up the button bound to a key.
    pub fn button_for(&self, code: KeyCode) -> Option<Button> {
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == code)
            .map(|(_, button)| *button)
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            bindings: vec![
                (KeyCode::Up, Button::Up),
                (KeyCode::Down, Button::Down),
                (KeyCode::Left, Button::Left),
                (KeyCode::Right, Button::Right),
                (KeyCode::Char('z'), Button::A),
                (KeyCode::Char(' '), Button::A),
                (KeyCode::Enter, Button::A),
                (KeyCode::Char('x'), Button::B),
                (KeyCode::Backspace, Button::B),
                (KeyCode::Esc, Button::Menu),
                (KeyCode::Char('m'), Button::Menu),
            ],
        }
    }
}
