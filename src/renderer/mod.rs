//! Renderer - pixel surfaces, nine-slice frames and terminal output.
//!
//! - [`image`] - `Surface` trait and the owned `Image` buffer
//! - [`frame`] - `FrameSource` nine-slice templates (incl. rounded)
//! - [`terminal`] - crossterm presenter with previous-frame diffing

pub mod frame;
pub mod image;
pub mod terminal;

pub use frame::FrameSource;
pub use image::{Image, Surface};
pub use terminal::TerminalPresenter;
