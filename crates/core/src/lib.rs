//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the sideways falling-block game. It has no
//! dependency on terminals, timers or hardware, which makes it:
//!
//! - **Deterministic**: same seed, same shapes
//! - **Testable**: boards of any size, including tiny ones for exhaustive checks
//! - **Portable**: the matrix firmware and the terminal build share it
//!
//! # Module Structure
//!
//! - [`shapes`]: the shape catalog and boolean footprints with 90° rotation
//! - [`board`]: the committed grid and line clearing
//! - [`piece`]: the falling piece, collision queries and checked placement
//! - [`frame`]: palette-indexed pixel buffers with double buffering
//! - [`font`]: small (up to 4×5) glyphs for on-matrix messages
//! - [`hal`]: traits for the display, buttons and tilt sensor
//! - [`rng`]: seeded uniform shape selection
//!
//! # Example
//!
//! ```
//! use matrix_tetris_core::{ActivePiece, Board, SimpleRng, SHAPES};
//!
//! let mut board = Board::new();
//! let mut rng = SimpleRng::new(42);
//! let mut piece = ActivePiece::spawn(&SHAPES, &mut rng, &board);
//!
//! // Gravity pushes along +x until the far wall.
//! while piece.try_move(&board, 1, 0) {}
//! let placement = piece.place(&board).expect("resting piece is collision-free");
//! board.commit(placement);
//! assert!(board.filled_count() > 0);
//! ```

pub mod board;
pub mod error;
pub mod font;
pub mod frame;
pub mod hal;
pub mod piece;
pub mod rng;
pub mod shapes;

pub use matrix_tetris_types as types;

pub use board::Board;
pub use error::{DisplayError, SensorError};
pub use frame::{Palette, PixelBuffer, RenderBuffer};
pub use hal::{ButtonSource, DisplaySink, PaletteSink, TiltSource};
pub use piece::{ActivePiece, Placement};
pub use rng::SimpleRng;
pub use shapes::{Footprint, Shape, SHAPES};
