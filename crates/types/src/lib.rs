//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, scheduling, terminal rendering, hardware glue).
//!
//! # Board Dimensions
//!
//! The playfield is the full LED matrix:
//!
//! - **Width**: 64 columns (indexed 0-63), the gravity axis
//! - **Height**: 32 rows (indexed 0-31), the perpendicular axis
//! - **Spawn position**: `x = 0`, `y = H/2 - rows/2`
//!
//! Pieces fall from left to right: gravity advances `x`, the buttons and the
//! tilt sensor move the piece along `y`.
//!
//! # Scheduler Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BUTTON_INTERVAL_MS` | 300 | Button poll cadence / shared move debounce window |
//! | `TILT_MOVE_INTERVAL_MS` | 10 | Minimum gap before a tilt move is honoured |
//! | `TILT_POLL_INTERVAL_MS` | 10 | Tilt sensor sampling cadence |
//! | `FALL_INTERVAL_MS` | 200 | Gravity cadence |
//! | `RENDER_INTERVAL_MS` | 50 | Frame cadence (20 FPS) |
//! | `IDLE_SLEEP_MS` | 1 | Idle yield at the bottom of each pass |
//! | `GAME_OVER_HOLD_MS` | 2000 | How long "GAME OVER" stays on the matrix |
//! | `RESTART_DELAY_MS` | 2000 | Back-off after a session fault |
//!
//! # Examples
//!
//! ```
//! use matrix_tetris_types::{Cell, Intent, ShapeId, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let cell = Cell::Filled(ShapeId(2));
//! assert!(cell.is_filled());
//! assert_eq!(cell.shape(), Some(ShapeId(2)));
//!
//! assert_eq!(Intent::MoveUp.delta(), (0, -1));
//! assert_eq!(Intent::from_tilt(1), Some(Intent::MoveDown));
//!
//! assert_eq!(BOARD_WIDTH, 64);
//! assert_eq!(BOARD_HEIGHT, 32);
//! ```

/// Board width in cells (gravity axis, 64 columns)
pub const BOARD_WIDTH: u8 = 64;

/// Board height in cells (perpendicular axis, 32 rows)
pub const BOARD_HEIGHT: u8 = 32;

/// Largest footprint dimension in the shape catalog
pub const MAX_SHAPE_DIM: usize = 6;

/// Button poll cadence; also the shared move debounce window.
pub const BUTTON_INTERVAL_MS: u64 = 300;

/// Minimum time since the last honoured move before a tilt move counts.
pub const TILT_MOVE_INTERVAL_MS: u64 = 10;

/// Tilt sensor sampling cadence.
pub const TILT_POLL_INTERVAL_MS: u64 = 10;

/// Gravity cadence (one column per fall).
pub const FALL_INTERVAL_MS: u64 = 200;

/// Frame cadence.
pub const RENDER_INTERVAL_MS: u64 = 50;

/// Idle yield at the bottom of every scheduler pass.
pub const IDLE_SLEEP_MS: u64 = 1;

/// Perpendicular tilt threshold in m/s².
pub const TILT_THRESHOLD: f32 = 0.5;

/// `|z|` above this is read as a rotation gesture.
pub const ROTATE_THRESHOLD: f32 = 9.0;

/// How long the game over message is held before the next session.
pub const GAME_OVER_HOLD_MS: u64 = 2000;

/// Back-off after a session fault before the board is reset.
pub const RESTART_DELAY_MS: u64 = 2000;

/// Index of a shape in the shape catalog.
///
/// Fixed at spawn and never re-derived from the footprint, so it stays stable
/// across rotation and keeps the piece's color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub u8);

impl ShapeId {
    /// Palette index used to draw this shape (index 0 is the background).
    pub fn palette_index(self) -> u8 {
        self.0 + 1
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A cell on the game board
///
/// Every board cell holds exactly one of these; there is no partial fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(ShapeId),
}

impl Cell {
    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Shape that filled this cell, if any
    pub fn shape(&self) -> Option<ShapeId> {
        match self {
            Cell::Empty => None,
            Cell::Filled(id) => Some(*id),
        }
    }
}

/// Discrete player intents produced by the input mapper
///
/// Movement is along the perpendicular axis only; gravity owns the other axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Move the piece one row towards `y = 0`
    MoveUp,
    /// Move the piece one row towards `y = H - 1`
    MoveDown,
    /// Rotate the footprint 90°
    Rotate,
}

impl Intent {
    /// Board offset `(dx, dy)` for movement intents; `(0, 0)` for rotation.
    pub fn delta(&self) -> (i16, i16) {
        match self {
            Intent::MoveUp => (0, -1),
            Intent::MoveDown => (0, 1),
            Intent::Rotate => (0, 0),
        }
    }

    /// Map a discrete tilt direction (`-1`, `0`, `+1`) to a movement intent.
    pub fn from_tilt(direction: i8) -> Option<Self> {
        match direction {
            d if d > 0 => Some(Intent::MoveDown),
            d if d < 0 => Some(Intent::MoveUp),
            _ => None,
        }
    }

    /// Name used in log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveUp => "moveUp",
            Intent::MoveDown => "moveDown",
            Intent::Rotate => "rotate",
        }
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value
    ///
    /// ```
    /// use matrix_tetris_types::Rgb;
    ///
    /// assert_eq!(Rgb::from_hex(0xFF8000), Rgb::new(255, 128, 0));
    /// ```
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }
}

/// One 3-axis accelerometer sample in m/s².
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Acceleration {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Acceleration {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Snapshot of the two momentary buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    pub up: bool,
    pub down: bool,
}

impl ButtonState {
    pub const RELEASED: ButtonState = ButtonState {
        up: false,
        down: false,
    };
}

/// A last-fired timestamp plus the interval it gates.
///
/// Eligible once strictly more than `interval_ms` has passed since it last fired.
///
/// ```
/// use matrix_tetris_types::Timer;
///
/// let mut t = Timer::new(100, 0);
/// assert!(!t.is_due(100));
/// assert!(t.is_due(101));
/// t.fire(101);
/// assert!(!t.is_due(150));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    interval_ms: u64,
    last_fired_ms: u64,
}

impl Timer {
    pub fn new(interval_ms: u64, now_ms: u64) -> Self {
        Self {
            interval_ms,
            last_fired_ms: now_ms,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn last_fired_ms(&self) -> u64 {
        self.last_fired_ms
    }

    pub fn elapsed(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.last_fired_ms)
    }

    pub fn is_due(&self, now_ms: u64) -> bool {
        self.elapsed(now_ms) > self.interval_ms
    }

    /// Whether more than `ms` has passed, independent of this timer's own interval.
    pub fn has_elapsed(&self, now_ms: u64, ms: u64) -> bool {
        self.elapsed(now_ms) > ms
    }

    pub fn fire(&mut self, now_ms: u64) {
        self.last_fired_ms = now_ms;
    }
}

/// Scheduler and input tuning
///
/// Defaults come from the constants above. Tests shorten intervals through the
/// `with_*` builders rather than mutating fields in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub board_width: u8,
    pub board_height: u8,
    pub button_interval_ms: u64,
    pub tilt_move_interval_ms: u64,
    pub tilt_poll_interval_ms: u64,
    pub fall_interval_ms: u64,
    pub render_interval_ms: u64,
    pub idle_sleep_ms: u64,
    pub tilt_threshold: f32,
    pub rotate_threshold: f32,
    pub game_over_hold_ms: u64,
    pub restart_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            button_interval_ms: BUTTON_INTERVAL_MS,
            tilt_move_interval_ms: TILT_MOVE_INTERVAL_MS,
            tilt_poll_interval_ms: TILT_POLL_INTERVAL_MS,
            fall_interval_ms: FALL_INTERVAL_MS,
            render_interval_ms: RENDER_INTERVAL_MS,
            idle_sleep_ms: IDLE_SLEEP_MS,
            tilt_threshold: TILT_THRESHOLD,
            rotate_threshold: ROTATE_THRESHOLD,
            game_over_hold_ms: GAME_OVER_HOLD_MS,
            restart_delay_ms: RESTART_DELAY_MS,
        }
    }
}

impl GameConfig {
    pub fn with_board_size(mut self, width: u8, height: u8) -> Self {
        self.board_width = width;
        self.board_height = height;
        self
    }

    pub fn with_fall_interval_ms(mut self, ms: u64) -> Self {
        self.fall_interval_ms = ms;
        self
    }

    pub fn with_render_interval_ms(mut self, ms: u64) -> Self {
        self.render_interval_ms = ms;
        self
    }

    pub fn with_button_interval_ms(mut self, ms: u64) -> Self {
        self.button_interval_ms = ms;
        self
    }

    pub fn with_tilt_intervals_ms(mut self, poll_ms: u64, move_ms: u64) -> Self {
        self.tilt_poll_interval_ms = poll_ms;
        self.tilt_move_interval_ms = move_ms;
        self
    }

    pub fn with_hold_and_restart_ms(mut self, hold_ms: u64, restart_ms: u64) -> Self {
        self.game_over_hold_ms = hold_ms;
        self.restart_delay_ms = restart_ms;
        self
    }
}
