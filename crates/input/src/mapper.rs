//! Input mapper: raw button and accelerometer samples to discrete intents.
//!
//! Buttons and tilt share one move debounce timer (the scheduler's input-poll
//! timer): a recent button move holds off a tilt move and the other way round.
//! Rotation gestures ignore that timer.

use arrayvec::ArrayVec;

use crate::core::SensorError;
use crate::types::{Acceleration, ButtonState, GameConfig, Intent, Timer};

/// Discrete reading of one accelerometer sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TiltReading {
    /// `-1`, `0` or `+1` along the perpendicular axis
    pub direction: i8,
    /// `|z|` crossed the rotation threshold
    pub rotate: bool,
}

impl TiltReading {
    pub const NONE: TiltReading = TiltReading {
        direction: 0,
        rotate: false,
    };

    pub fn move_intent(&self) -> Option<Intent> {
        Intent::from_tilt(self.direction)
    }
}

/// Converts samples into intents using the configured thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputMapper {
    tilt_threshold: f32,
    rotate_threshold: f32,
    tilt_move_interval_ms: u64,
}

impl InputMapper {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            tilt_threshold: config.tilt_threshold,
            rotate_threshold: config.rotate_threshold,
            tilt_move_interval_ms: config.tilt_move_interval_ms,
        }
    }

    /// Sample the buttons if the shared move timer is due.
    ///
    /// Returns `None` while the window is still closed. When it is open the
    /// timer is re-armed whether or not a button was down, and the intents for
    /// the pressed buttons are returned, up before down.
    pub fn poll_buttons(
        &self,
        move_timer: &mut Timer,
        now_ms: u64,
        buttons: ButtonState,
    ) -> Option<ArrayVec<Intent, 2>> {
        if !move_timer.is_due(now_ms) {
            return None;
        }
        move_timer.fire(now_ms);

        let mut intents = ArrayVec::new();
        if buttons.up {
            intents.push(Intent::MoveUp);
        }
        if buttons.down {
            intents.push(Intent::MoveDown);
        }
        Some(intents)
    }

    /// Perpendicular component to a discrete direction.
    pub fn tilt_direction(&self, y: f32) -> i8 {
        if y > self.tilt_threshold {
            1
        } else if y < -self.tilt_threshold {
            -1
        } else {
            0
        }
    }

    /// Interpret a sensor read. Failures read as "no tilt" and never propagate.
    pub fn interpret_tilt(&self, sample: Result<Acceleration, SensorError>) -> TiltReading {
        match sample {
            Ok(a) => TiltReading {
                direction: self.tilt_direction(a.y),
                rotate: a.z.abs() > self.rotate_threshold,
            },
            Err(err) => {
                log::debug!("tilt read failed, ignoring this sample: {err}");
                TiltReading::NONE
            }
        }
    }

    /// Whether a tilt move may be honoured now, given the shared move timer.
    pub fn tilt_move_allowed(&self, move_timer: &Timer, now_ms: u64) -> bool {
        move_timer.has_elapsed(now_ms, self.tilt_move_interval_ms)
    }
}

impl Default for InputMapper {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}
