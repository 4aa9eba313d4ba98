//! Nine-slice frames.
//!
//! A [`FrameSource`] is a small template bitmap split into a 3x3 grid by
//! four border thicknesses. Drawing it into a larger rectangle copies the
//! corners verbatim, tiles the edge strips along their axis and fills the
//! interior with a solid color.
//!
//! Border thicknesses must not exceed half the target size. That is a caller
//! contract, not a checked error: violating it produces overlapping corners.

use super::image::{Image, Surface};
use crate::types::{BoundingBox, Color};

/// An immutable nine-slice border template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSource {
    source: Image,
    left: i32,
    right: i32,
    top: i32,
    bottom: i32,
}

impl FrameSource {
    /// Create a template with each border one third of the source size.
    pub fn new(source: Image) -> Self {
        let h_unit = source.width() / 3;
        let v_unit = source.height() / 3;
        Self {
            source,
            left: h_unit,
            right: h_unit,
            top: v_unit,
            bottom: v_unit,
        }
    }

    /// Override the four border thicknesses.
    pub fn with_borders(mut self, left: i32, right: i32, top: i32, bottom: i32) -> Self {
        self.left = left;
        self.right = right;
        self.top = top;
        self.bottom = bottom;
        self
    }

    /// Synthesize a rounded-corner template of the given radius.
    ///
    /// The circle outline is drawn with the midpoint algorithm into a
    /// `2 * radius + 1` square, then each interior column is filled between
    /// its first and second outline crossings. All four borders are `radius`.
    pub fn rounded(radius: i32, border: Color, fill: Color) -> Self {
        let radius = radius.max(0);
        let side = radius * 2 + 1;
        let mut image = Image::new(side, side);
        draw_circle(&mut image, radius, radius, radius, border);
        fill_columns(&mut image, fill);
        Self::new(image).with_borders(radius, radius, radius, radius)
    }

    pub fn source(&self) -> &Image {
        &self.source
    }

    /// Border thicknesses as `(left, right, top, bottom)`.
    pub fn borders(&self) -> (i32, i32, i32, i32) {
        (self.left, self.right, self.top, self.bottom)
    }

    /// The region left for content inside `outer`.
    pub fn content_bounds(&self, outer: BoundingBox) -> BoundingBox {
        BoundingBox::new(
            outer.origin_x + self.left,
            outer.origin_y + self.top,
            outer.width - self.left - self.right,
            outer.height - self.top - self.bottom,
        )
    }

    /// Render the frame over `bb`, filling the interior with `fill`.
    pub fn draw(&self, surface: &mut dyn Surface, bb: BoundingBox, fill: Color) {
        let cl = bb.origin_x;
        let ct = bb.origin_y;
        let cr = bb.origin_x + bb.width - self.right;
        let cb = bb.origin_y + bb.height - self.bottom;

        let sr = self.source.width() - self.right;
        let sb = self.source.height() - self.bottom;

        // Corners
        self.copy_block(surface, cl, ct, 0, 0, self.left, self.top);
        self.copy_block(surface, cr, ct, sr, 0, self.right, self.top);
        self.copy_block(surface, cr, cb, sr, sb, self.right, self.bottom);
        self.copy_block(surface, cl, cb, 0, sb, self.left, self.bottom);

        let inner_width = bb.width - self.left - self.right;
        self.tile_horizontal(surface, cl + self.left, ct, inner_width, true);
        self.tile_horizontal(surface, cl + self.left, cb, inner_width, false);

        let inner_height = bb.height - self.top - self.bottom;
        self.tile_vertical(surface, cl, ct + self.top, inner_height, true);
        self.tile_vertical(surface, cr, ct + self.top, inner_height, false);

        surface.fill_rect(cl + self.left, ct + self.top, inner_width, inner_height, fill);
    }

    #[allow(clippy::too_many_arguments)]
    fn copy_block(&self, surface: &mut dyn Surface, ox: i32, oy: i32, x: i32, y: i32, w: i32, h: i32) {
        for i in 0..w {
            for j in 0..h {
                surface.set_pixel(ox + i, oy + j, self.source.get_pixel(x + i, y + j));
            }
        }
    }

    fn tile_horizontal(&self, surface: &mut dyn Surface, ox: i32, oy: i32, width: i32, use_top: bool) {
        let tile_width = self.source.width() - self.left - self.right;
        if tile_width <= 0 {
            return;
        }
        let y = if use_top { 0 } else { self.source.height() - self.bottom };
        let strip_height = if use_top { self.top } else { self.bottom };

        for column in 0..width {
            for row in 0..strip_height {
                let color = self.source.get_pixel(self.left + column % tile_width, y + row);
                surface.set_pixel(ox + column, oy + row, color);
            }
        }
    }

    fn tile_vertical(&self, surface: &mut dyn Surface, ox: i32, oy: i32, height: i32, use_left: bool) {
        let tile_height = self.source.height() - self.top - self.bottom;
        if tile_height <= 0 {
            return;
        }
        let x = if use_left { 0 } else { self.source.width() - self.right };
        let strip_width = if use_left { self.left } else { self.right };

        for column in 0..strip_width {
            for row in 0..height {
                let color = self.source.get_pixel(x + column, self.top + row % tile_height);
                surface.set_pixel(ox + column, oy + row, color);
            }
        }
    }
}

/// Midpoint circle outline centered on `(x0, y0)`.
fn draw_circle(canvas: &mut Image, x0: i32, y0: i32, radius: i32, color: Color) {
    let mut x = radius;
    let mut y = 0;
    let mut err = 0;

    while x >= y {
        canvas.set_pixel(x0 + x, y0 + y, color);
        canvas.set_pixel(x0 + x, y0 - y, color);
        canvas.set_pixel(x0 + y, y0 + x, color);
        canvas.set_pixel(x0 + y, y0 - x, color);
        canvas.set_pixel(x0 - y, y0 + x, color);
        canvas.set_pixel(x0 - y, y0 - x, color);
        canvas.set_pixel(x0 - x, y0 + y, color);
        canvas.set_pixel(x0 - x, y0 - y, color);

        if err <= 0 {
            y += 1;
            err += 2 * y + 1;
        }
        if err > 0 {
            x -= 1;
            err -= 2 * x + 1;
        }
    }
}

/// Per-column scan state while filling the disk.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Scan {
    Unseen,
    FirstEdge,
    Inside,
    SecondEdge,
}

/// Fill each interior column between its first and second outline crossing.
fn fill_columns(canvas: &mut Image, fill: Color) {
    for x in 1..canvas.width() - 1 {
        let mut scan = Scan::Unseen;
        for y in 0..canvas.height() {
            let on_edge = canvas.get_pixel(x, y) != 0;
            scan = match (scan, on_edge) {
                (Scan::Unseen, true) => Scan::FirstEdge,
                (Scan::FirstEdge, false) => Scan::Inside,
                (Scan::Inside, true) => Scan::SecondEdge,
                (state, _) => state,
            };
            if scan == Scan::Inside {
                canvas.set_pixel(x, y, fill);
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TRANSPARENT;

    /// 3x3 source: distinct corner, edge and center colors.
    fn grid_source() -> FrameSource {
        let mut image = Image::new(3, 3);
        let colors = [[1, 2, 3], [4, 5, 6], [7, 8, 9]];
        for (y, row) in colors.iter().enumerate() {
            for (x, &c) in row.iter().enumerate() {
                image.set_pixel(x as i32, y as i32, c);
            }
        }
        FrameSource::new(image)
    }

    #[test]
    fn test_default_borders_are_thirds() {
        let source = FrameSource::new(Image::new(9, 6));
        assert_eq!(source.borders(), (3, 3, 2, 2));
    }

    #[test]
    fn test_nine_slice_draw() {
        let source = grid_source();
        let mut canvas = Image::new(5, 4);
        source.draw(&mut canvas, BoundingBox::sized(5, 4), 15);

        // Corners copied verbatim
        assert_eq!(canvas.get_pixel(0, 0), 1);
        assert_eq!(canvas.get_pixel(4, 0), 3);
        assert_eq!(canvas.get_pixel(0, 3), 7);
        assert_eq!(canvas.get_pixel(4, 3), 9);
        // Edges tiled
        assert_eq!(canvas.get_pixel(2, 0), 2);
        assert_eq!(canvas.get_pixel(3, 3), 8);
        assert_eq!(canvas.get_pixel(0, 2), 4);
        assert_eq!(canvas.get_pixel(4, 1), 6);
        // Interior filled
        assert_eq!(canvas.get_pixel(2, 2), 15);
    }

    #[test]
    fn test_content_bounds() {
        let source = FrameSource::rounded(5, 1, 3);
        let inner = source.content_bounds(BoundingBox::new(10, 20, 100, 50));
        assert_eq!(inner, BoundingBox::new(15, 25, 90, 40));
    }

    #[test]
    fn test_rounded_template() {
        let source = FrameSource::rounded(2, 1, 3);
        let image = source.source();
        assert_eq!(image.width(), 5);
        assert_eq!(source.borders(), (2, 2, 2, 2));

        // Corners outside the circle stay transparent
        assert_eq!(image.get_pixel(0, 0), TRANSPARENT);
        // Outline
        assert_eq!(image.get_pixel(2, 0), 1);
        assert_eq!(image.get_pixel(0, 2), 1);
        // Disk interior filled
        assert_eq!(image.get_pixel(2, 2), 3);
        assert_eq!(image.get_pixel(2, 4), 1);
    }

    #[test]
    fn test_rounded_zero_radius() {
        let source = FrameSource::rounded(0, 1, 3);
        assert_eq!(source.source().width(), 1);
        let mut canvas = Image::new(4, 4);
        source.draw(&mut canvas, BoundingBox::sized(4, 4), 3);
        assert_eq!(canvas.get_pixel(1, 1), 3);
    }
}
