//! Differential terminal presenter.
//!
//! Shows a palette-indexed [`Image`] in a terminal using upper half blocks:
//! each cell covers two vertical pixels, the upper one as foreground and the
//! lower one as background. The presenter keeps the previous frame's cells
//! and only writes cells that changed.
//!
//! # Algorithm
//!
//! 1. Fold the image into `(upper, lower)` cell pairs
//! 2. For each cell: skip it if it matches the previous frame
//! 3. Otherwise queue cursor move + colors + `▀`
//! 4. Flush once, store the cells for the next comparison

use std::io::Write;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};

use super::image::{Image, Surface};
use crate::config::Palette;
use crate::error::{Error, Result};
use crate::types::Color;

const UPPER_HALF_BLOCK: char = '\u{2580}';

/// One terminal cell: the two pixels it shows.
type CellPair = (Color, Color);

/// Presents images to a terminal writer, diffing against the last frame.
pub struct TerminalPresenter<W: Write> {
    out: W,
    palette: Palette,
    cols: u16,
    rows: u16,
    previous: Option<Vec<CellPair>>,
}

impl<W: Write> TerminalPresenter<W> {
    /// Create a presenter for a viewport of `cols` x `rows` cells.
    pub fn new(out: W, palette: Palette, cols: u16, rows: u16) -> Self {
        Self {
            out,
            palette,
            cols,
            rows,
            previous: None,
        }
    }

    /// Update the viewport size. Forces a full redraw.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.invalidate();
    }

    /// Present a frame, writing only changed cells.
    ///
    /// Returns true if any cells were written.
    pub fn present(&mut self, image: &Image) -> Result<bool> {
        let width = image.width();
        let height = image.height();
        let cell_rows = (height + 1) / 2;
        if width > self.cols as i32 || cell_rows > self.rows as i32 {
            return Err(Error::ViewportTooSmall {
                cols: self.cols,
                rows: self.rows,
                width,
                height,
            });
        }

        let cells = fold_cells(image);
        let mut changed = 0usize;

        for (i, &cell) in cells.iter().enumerate() {
            let unchanged = self
                .previous
                .as_ref()
                .filter(|prev| prev.len() == cells.len())
                .is_some_and(|prev| prev[i] == cell);
            if unchanged {
                continue;
            }

            let x = (i as i32 % width) as u16;
            let y = (i as i32 / width) as u16;
            let (upper, lower) = cell;
            let fg = self.term_color(upper);
            let bg = self.term_color(lower);
            queue!(
                self.out,
                MoveTo(x, y),
                SetForegroundColor(fg),
                SetBackgroundColor(bg),
                Print(UPPER_HALF_BLOCK)
            )?;
            changed += 1;
        }

        if changed > 0 {
            queue!(self.out, ResetColor)?;
            self.out.flush()?;
        }
        tracing::trace!(changed, "presented frame");

        self.previous = Some(cells);
        Ok(changed > 0)
    }

    /// Forget the previous frame. The next present is a full redraw.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Check if we have a previous frame to diff against.
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Enter fullscreen mode (alternate screen buffer, hidden cursor).
    pub fn enter_fullscreen(&mut self) -> Result<()> {
        execute!(self.out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        self.invalidate();
        Ok(())
    }

    /// Leave fullscreen mode.
    pub fn exit_fullscreen(&mut self) -> Result<()> {
        execute!(self.out, ResetColor, Show, LeaveAlternateScreen)?;
        Ok(())
    }

    /// Consume the presenter, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn term_color(&self, color: Color) -> TermColor {
        let (r, g, b) = self.palette.rgb(color);
        TermColor::Rgb { r, g, b }
    }
}

/// Pair up rows: cell `(x, y)` shows pixels `(x, 2y)` and `(x, 2y + 1)`.
fn fold_cells(image: &Image) -> Vec<CellPair> {
    let width = image.width();
    let cell_rows = (image.height() + 1) / 2;
    let mut cells = Vec::with_capacity((width * cell_rows) as usize);
    for y in 0..cell_rows {
        for x in 0..width {
            cells.push((image.get_pixel(x, y * 2), image.get_pixel(x, y * 2 + 1)));
        }
    }
    cells
}

// =============================================================================
// Tests
// =============================================================================
