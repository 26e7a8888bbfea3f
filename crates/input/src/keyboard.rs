//! Keyboard emulation of the badge controls for terminal play.
//!
//! Terminals rarely report key releases, so a key counts as held for a short
//! timeout after its last press/repeat event. A single tap is also latched
//! until the next poll reads it, so a tap between two slow button polls is
//! not lost.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::core::{ButtonSource, SensorError, TiltSource};
use crate::map::{map_key, should_quit, PadKey};
use crate::types::{Acceleration, ButtonState};

// Long enough to bridge the gap between terminal auto-repeat events.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

/// Emulated tilt along y while a tilt key is held, in m/s².
pub const TILT_ACCEL: f32 = 2.0;

/// Emulated z spike for the spin gesture, in m/s².
pub const SPIN_ACCEL: f32 = 11.5;

/// Held/latched state of every emulated control.
#[derive(Debug, Clone)]
pub struct PadState {
    last_seen: [Option<Instant>; PadKey::COUNT],
    latched: [bool; PadKey::COUNT],
    quit: bool,
    key_release_timeout: Duration,
}

impl PadState {
    pub fn new() -> Self {
        Self {
            last_seen: [None; PadKey::COUNT],
            latched: [false; PadKey::COUNT],
            quit: false,
            key_release_timeout: Duration::from_millis(DEFAULT_KEY_RELEASE_TIMEOUT_MS),
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.key_release_timeout = Duration::from_millis(timeout_ms);
        self
    }

    pub fn handle_key_event(&mut self, key: KeyEvent, now: Instant) {
        if key.kind == KeyEventKind::Release {
            if let Some(k) = map_key(key.code) {
                self.last_seen[k.index()] = None;
            }
            return;
        }

        if should_quit(key) {
            self.quit = true;
            return;
        }

        if let Some(k) = map_key(key.code) {
            self.last_seen[k.index()] = Some(now);
            if key.kind == KeyEventKind::Press {
                self.latched[k.index()] = true;
            }
        }
    }

    pub fn is_held(&self, key: PadKey, now: Instant) -> bool {
        self.last_seen[key.index()]
            .map(|t| now.saturating_duration_since(t) <= self.key_release_timeout)
            .unwrap_or(false)
    }

    /// Held, or tapped since the last read. Consumes the tap.
    fn take(&mut self, key: PadKey, now: Instant) -> bool {
        let pressed = self.latched[key.index()] || self.is_held(key, now);
        self.latched[key.index()] = false;
        pressed
    }

    pub fn buttons(&mut self, now: Instant) -> ButtonState {
        ButtonState {
            up: self.take(PadKey::Up, now),
            down: self.take(PadKey::Down, now),
        }
    }

    /// Emulated accelerometer sample. The spin spike fires once per key press.
    pub fn acceleration(&mut self, now: Instant) -> Acceleration {
        let mut y = 0.0;
        if self.take(PadKey::TiltDown, now) {
            y += TILT_ACCEL;
        }
        if self.take(PadKey::TiltUp, now) {
            y -= TILT_ACCEL;
        }

        let spin = std::mem::take(&mut self.latched[PadKey::Spin.index()]);
        let z = if spin { SPIN_ACCEL } else { 0.0 };

        Acceleration::new(0.0, y, z)
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}

impl Default for PadState {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared keyboard pump feeding both the button and the tilt emulation.
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    state: Rc<RefCell<PadState>>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: PadState) -> Self {
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    /// Drain pending terminal events without blocking.
    pub fn pump(&self) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                self.state.borrow_mut().handle_key_event(key, Instant::now());
            }
        }
        Ok(())
    }

    pub fn buttons(&self) -> KeyboardButtons {
        KeyboardButtons {
            keyboard: self.clone(),
        }
    }

    pub fn tilt(&self) -> KeyboardTilt {
        KeyboardTilt {
            keyboard: self.clone(),
        }
    }
}

/// Up/Down (or W/S) as the two momentary buttons.
#[derive(Debug, Clone)]
pub struct KeyboardButtons {
    keyboard: Keyboard,
}

impl ButtonSource for KeyboardButtons {
    fn poll(&mut self) -> ButtonState {
        if let Err(err) = self.keyboard.pump() {
            log::warn!("keyboard read failed: {err}");
            return ButtonState::RELEASED;
        }
        self.keyboard.state.borrow_mut().buttons(Instant::now())
    }

    fn exit_requested(&mut self) -> bool {
        if let Err(err) = self.keyboard.pump() {
            log::warn!("keyboard read failed: {err}");
        }
        self.keyboard.state.borrow().quit_requested()
    }
}

/// I/K tilt and R/Space spin as an accelerometer.
#[derive(Debug, Clone)]
pub struct KeyboardTilt {
    keyboard: Keyboard,
}

impl TiltSource for KeyboardTilt {
    fn read(&mut self) -> Result<Acceleration, SensorError> {
        self.keyboard.pump()?;
        Ok(self.keyboard.state.borrow_mut().acceleration(Instant::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn tap_is_seen_once_after_timeout() {
        let t0 = Instant::now();
        let mut pad = PadState::new().with_key_release_timeout_ms(50);
        pad.handle_key_event(key(KeyCode::Up, KeyEventKind::Press), t0);

        let later = t0 + Duration::from_millis(300);
        assert!(pad.buttons(later).up);
        assert!(!pad.buttons(later).up);
    }

    #[test]
    fn repeats_keep_key_held() {
        let t0 = Instant::now();
        let mut pad = PadState::new().with_key_release_timeout_ms(50);
        pad.handle_key_event(key(KeyCode::Down, KeyEventKind::Press), t0);
        let _ = pad.buttons(t0);

        let t1 = t0 + Duration::from_millis(40);
        pad.handle_key_event(key(KeyCode::Down, KeyEventKind::Repeat), t1);
        assert!(pad.buttons(t1 + Duration::from_millis(40)).down);
        assert!(!pad.buttons(t1 + Duration::from_millis(60)).down);
    }

    #[test]
    fn release_event_drops_hold() {
        let t0 = Instant::now();
        let mut pad = PadState::new();
        pad.handle_key_event(key(KeyCode::Char('k'), KeyEventKind::Press), t0);
        assert_eq!(pad.acceleration(t0).y, TILT_ACCEL);

        pad.handle_key_event(key(KeyCode::Char('k'), KeyEventKind::Release), t0);
        assert_eq!(pad.acceleration(t0).y, 0.0);
    }

    #[test]
    fn spin_is_one_shot() {
        let t0 = Instant::now();
        let mut pad = PadState::new();
        pad.handle_key_event(key(KeyCode::Char('r'), KeyEventKind::Press), t0);
        assert_eq!(pad.acceleration(t0).z, SPIN_ACCEL);
        assert_eq!(pad.acceleration(t0).z, 0.0);
    }

    #[test]
    fn opposite_tilts_cancel() {
        let t0 = Instant::now();
        let mut pad = PadState::new();
        pad.handle_key_event(key(KeyCode::Char('i'), KeyEventKind::Press), t0);
        pad.handle_key_event(key(KeyCode::Char('k'), KeyEventKind::Press), t0);
        assert_eq!(pad.acceleration(t0).y, 0.0);
    }

    #[test]
    fn quit_key_sets_flag() {
        let mut pad = PadState::new();
        assert!(!pad.quit_requested());
        pad.handle_key_event(key(KeyCode::Char('q'), KeyEventKind::Press), Instant::now());
        assert!(pad.quit_requested());
    }

    #[test]
    fn spin_spike_crosses_rotation_threshold() {
        assert!(SPIN_ACCEL > crate::types::ROTATE_THRESHOLD);
        assert!(TILT_ACCEL > crate::types::TILT_THRESHOLD);
    }
}
