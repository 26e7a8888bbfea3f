//! Capability interfaces for the hardware around the game.
//!
//! The engine only talks to the matrix, the buttons and the accelerometer
//! through these traits. The terminal build implements them with crossterm;
//! tests implement them with scripted fakes.

use crate::error::{DisplayError, SensorError};
use crate::frame::{Palette, PixelBuffer};
use crate::types::{Acceleration, ButtonState};

/// Accepts the ordered color list that pixel indices refer to.
///
/// Index 0 is the background.
pub trait PaletteSink {
    fn load_palette(&mut self, palette: &Palette) -> Result<(), DisplayError>;
}

/// Makes a finished frame visible.
///
/// `present` is treated as immediate; the caller never reuses the buffer for
/// drawing until it has been swapped out again.
pub trait DisplaySink: PaletteSink {
    fn present(&mut self, frame: &PixelBuffer) -> Result<(), DisplayError>;
}

/// Two momentary buttons, polled.
pub trait ButtonSource {
    fn poll(&mut self) -> ButtonState;

    /// Host builds can end the process from here; the matrix never does.
    fn exit_requested(&mut self) -> bool {
        false
    }
}

/// Optional 3-axis accelerometer.
pub trait TiltSource {
    fn read(&mut self) -> Result<Acceleration, SensorError>;
}
