//! Error types for the collaborator boundary.

use std::io;

use thiserror::Error;

/// Tilt sensor read failure. Transient; callers degrade to "no tilt" for the tick.
#[derive(Error, Debug)]
pub enum SensorError {
    #[error("tilt sensor bus error: {0}")]
    Bus(#[from] io::Error),
    #[error("tilt sensor not ready")]
    NotReady,
}

/// Failure to hand a frame or palette to the display.
#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("display write failed: {0}")]
    Io(#[from] io::Error),
    #[error("palette has {got} colors, display supports at most {max}")]
    PaletteTooLarge { got: usize, max: usize },
    #[error("frame is {got_w}x{got_h}, display expects {want_w}x{want_h}")]
    FrameSize {
        got_w: u16,
        got_h: u16,
        want_w: u16,
        want_h: u16,
    },
}
