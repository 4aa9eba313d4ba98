//! Errors for the host-facing side of the crate.
//!
//! Tree, focus and animation operations never fail: missing state and stale
//! ids degrade to no-ops. Only talking to a real terminal can go wrong.

use thiserror::Error;

/// Host-side failure.
#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("viewport {cols}x{rows} cells is too small for a {width}x{height} pixel surface")]
    ViewportTooSmall {
        cols: u16,
        rows: u16,
        width: i32,
        height: i32,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
