//! Pixel surfaces.
//!
//! [`Surface`] is the drawing primitive the node tree renders onto. Hosts
//! with a real display implement it over their framebuffer; [`Image`] is the
//! owned in-memory implementation used for container caches, frame
//! templates and tests.
//!
//! # Design Decisions
//!
//! - **Flat storage**: `Vec<Color>` with row-major indexing.
//! - **Clipping**: every write outside the surface is dropped silently.
//! - **Transparency**: palette index 0 is skipped by `draw_transparent_image`.

use crate::types::{Color, Font, TRANSPARENT};

// =============================================================================
// Surface
// =============================================================================

/// A palette-indexed pixel target.
///
/// Only `width`, `height`, `get_pixel` and `set_pixel` are required; the
/// remaining primitives have per-pixel default implementations that a host
/// can replace with faster ones.
pub trait Surface {
    fn width(&self) -> i32;
    fn height(&self) -> i32;

    /// Read a pixel. Out of range reads return [`TRANSPARENT`].
    fn get_pixel(&self, x: i32, y: i32) -> Color;

    /// Write a pixel. Out of range writes are ignored.
    fn set_pixel(&mut self, x: i32, y: i32, color: Color);

    /// Fill a rectangle, clipped to the surface.
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + width).min(self.width());
        let y1 = (y + height).min(self.height());
        for py in y0..y1 {
            for px in x0..x1 {
                self.set_pixel(px, py, color);
            }
        }
    }

    /// Print `text` with its top-left corner at `(x, y)`.
    ///
    /// The default renders each non-whitespace character as a solid block
    /// one pixel narrower than the font cell.
    fn print(&mut self, text: &str, x: i32, y: i32, color: Color, font: &Font) {
        let glyph_width = (font.char_width - 1).max(1);
        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let cx = x + i as i32 * font.char_width;
            self.fill_rect(cx, y, glyph_width, font.char_height, color);
        }
    }

    /// Copy `image` onto this surface at `(x, y)`, skipping transparent pixels.
    fn draw_transparent_image(&mut self, image: &Image, x: i32, y: i32) {
        for iy in 0..image.height() {
            for ix in 0..image.width() {
                let color = image.get_pixel(ix, iy);
                if color != TRANSPARENT {
                    self.set_pixel(x + ix, y + iy, color);
                }
            }
        }
    }
}

// =============================================================================
// Image
// =============================================================================

/// An owned palette-indexed pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Image {
    width: i32,
    height: i32,
    pixels: Vec<Color>,
}

impl Image {
    /// Create a transparent image. Negative sizes are treated as zero.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            pixels: vec![TRANSPARENT; width as usize * height as usize],
        }
    }

    /// Reset every pixel to `color`.
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Raw pixels, row-major.
    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }
}

impl Surface for Image {
    #[inline]
    fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    fn get_pixel(&self, x: i32, y: i32) -> Color {
        self.index(x, y).map_or(TRANSPARENT, |i| self.pixels[i])
    }

    #[inline]
    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        let x0 = x.max(0);
        let x1 = (x + width).min(self.width);
        if x1 <= x0 {
            return;
        }
        let y0 = y.max(0);
        let y1 = (y + height).min(self.height);
        for py in y0..y1 {
            let row = py as usize * self.width as usize;
            self.pixels[row + x0 as usize..row + x1 as usize].fill(color);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
