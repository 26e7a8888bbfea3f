//! Scripted collaborators shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;

use matrix_tetris::core::{
    ButtonSource, DisplayError, DisplaySink, Footprint, Palette, PaletteSink, PixelBuffer,
    SensorError, Shape, TiltSource,
};
use matrix_tetris::engine::Clock;
use matrix_tetris::types::{Acceleration, ButtonState, Rgb};

/// One 2×2 block; makes spawn positions and lock outcomes predictable.
pub static BLOCK_CATALOG: [Shape; 1] = [Shape {
    name: "block",
    footprint: Footprint::solid(2, 2),
    color: Rgb::from_hex(0x2528CF),
}];

/// Clock that only moves when slept on.
#[derive(Debug, Default)]
pub struct ManualClock {
    pub now: u64,
    pub sleeps: Vec<u64>,
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now
    }

    fn sleep_ms(&mut self, ms: u64) {
        self.now += ms;
        self.sleeps.push(ms);
    }
}

/// Buttons replaying a script, then released forever.
#[derive(Debug, Default)]
pub struct ScriptedButtons {
    pub script: VecDeque<ButtonState>,
    pub polls: usize,
    /// Request exit once `exit_requested` has been asked this many times.
    pub exit_after: Option<usize>,
    exit_checks: usize,
}

impl ScriptedButtons {
    pub fn new(script: impl IntoIterator<Item = ButtonState>) -> Self {
        Self {
            script: script.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn holding(state: ButtonState, polls: usize) -> Self {
        Self::new(std::iter::repeat(state).take(polls))
    }

    pub fn exit_after(mut self, checks: usize) -> Self {
        self.exit_after = Some(checks);
        self
    }
}

impl ButtonSource for ScriptedButtons {
    fn poll(&mut self) -> ButtonState {
        self.polls += 1;
        self.script.pop_front().unwrap_or(ButtonState::RELEASED)
    }

    fn exit_requested(&mut self) -> bool {
        self.exit_checks += 1;
        self.exit_after.is_some_and(|n| self.exit_checks > n)
    }
}

/// Tilt sensor replaying a script, then reading level forever.
#[derive(Debug, Default)]
pub struct ScriptedTilt {
    pub script: VecDeque<Result<Acceleration, SensorError>>,
    pub reads: usize,
}

impl ScriptedTilt {
    pub fn new(script: impl IntoIterator<Item = Result<Acceleration, SensorError>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            reads: 0,
        }
    }

    pub fn level() -> Self {
        Self::default()
    }
}

impl TiltSource for ScriptedTilt {
    fn read(&mut self) -> Result<Acceleration, SensorError> {
        self.reads += 1;
        self.script
            .pop_front()
            .unwrap_or(Ok(Acceleration::new(0.0, 0.0, 0.0)))
    }
}

/// Display that keeps every palette and frame it is given.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub palettes: Vec<Vec<Rgb>>,
    pub frames: Vec<PixelBuffer>,
    /// Fail the present call with this 0-based attempt number.
    pub fail_at: Option<usize>,
    /// Panic inside the present call with this 0-based attempt number.
    pub panic_at: Option<usize>,
    attempts: usize,
}

impl RecordingDisplay {
    pub fn failing_at(attempt: usize) -> Self {
        Self {
            fail_at: Some(attempt),
            ..Self::default()
        }
    }

    pub fn panicking_at(attempt: usize) -> Self {
        Self {
            panic_at: Some(attempt),
            ..Self::default()
        }
    }

    pub fn last_frame(&self) -> &PixelBuffer {
        self.frames.last().expect("no frame presented yet")
    }
}

impl PaletteSink for RecordingDisplay {
    fn load_palette(&mut self, palette: &Palette) -> Result<(), DisplayError> {
        self.palettes.push(palette.colors().to_vec());
        Ok(())
    }
}

impl DisplaySink for RecordingDisplay {
    fn present(&mut self, frame: &PixelBuffer) -> Result<(), DisplayError> {
        let attempt = self.attempts;
        self.attempts += 1;
        if self.panic_at == Some(attempt) {
            panic!("matrix driver crashed on frame {attempt}");
        }
        if self.fail_at == Some(attempt) {
            return Err(DisplayError::Io(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "matrix unplugged",
            )));
        }
        self.frames.push(frame.clone());
        Ok(())
    }
}

pub fn accel_y(y: f32) -> Result<Acceleration, SensorError> {
    Ok(Acceleration::new(0.0, y, 0.0))
}

pub fn spin() -> Result<Acceleration, SensorError> {
    Ok(Acceleration::new(0.0, 0.0, 11.5))
}

pub const UP: ButtonState = ButtonState {
    up: true,
    down: false,
};

pub const DOWN: ButtonState = ButtonState {
    up: false,
    down: true,
};
