//! Terminal display for the LED matrix.
//!
//! The game draws palette-indexed pixels; this crate puts them on a terminal
//! so the same engine can be played without the hardware. It avoids widget
//! toolkits and renders into a small framebuffer that is diff-flushed with
//! crossterm.
//!
//! - [`matrix_view`]: pure mapping from pixels to half-block cells
//! - [`renderer`]: [`TerminalRenderer`], the `DisplaySink` implementation

pub mod fb;
pub mod matrix_view;
pub mod renderer;

pub use matrix_tetris_core as core;
pub use matrix_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use matrix_view::{Layout, MatrixView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
