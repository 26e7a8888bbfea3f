//! Input module - from raw samples to intents.
//!
//! [`InputMapper`] is the hardware-independent part: it turns button states and
//! accelerometer samples into [`crate::types::Intent`]s, applying the shared move
//! debounce window and the tilt/rotation thresholds.
//!
//! The [`keyboard`] module emulates the two buttons and the tilt sensor with
//! `crossterm` key events so the game can be played in a terminal.

pub mod keyboard;
pub mod map;
pub mod mapper;

pub use matrix_tetris_core as core;
pub use matrix_tetris_types as types;

pub use keyboard::{Keyboard, KeyboardButtons, KeyboardTilt, PadState};
pub use map::{map_key, should_quit, PadKey};
pub use mapper::{InputMapper, TiltReading};
