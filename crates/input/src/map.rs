//! Key mapping from terminal events to the emulated controls.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A control on the emulated badge: the two buttons plus tilt gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadKey {
    /// Momentary "up" button
    Up,
    /// Momentary "down" button
    Down,
    /// Tilt the matrix so pieces drift towards row 0
    TiltUp,
    /// Tilt the matrix so pieces drift towards the last row
    TiltDown,
    /// Flick gesture that reads as a rotation on the z axis
    Spin,
}

impl PadKey {
    pub const COUNT: usize = 5;

    pub const ALL: [PadKey; Self::COUNT] = [
        PadKey::Up,
        PadKey::Down,
        PadKey::TiltUp,
        PadKey::TiltDown,
        PadKey::Spin,
    ];

    pub fn index(self) -> usize {
        match self {
            PadKey::Up => 0,
            PadKey::Down => 1,
            PadKey::TiltUp => 2,
            PadKey::TiltDown => 3,
            PadKey::Spin => 4,
        }
    }
}

/// Map a key to the control it emulates.
pub fn map_key(code: KeyCode) -> Option<PadKey> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(PadKey::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(PadKey::Down),

        KeyCode::Char('i') | KeyCode::Char('I') => Some(PadKey::TiltUp),
        KeyCode::Char('k') | KeyCode::Char('K') => Some(PadKey::TiltDown),

        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Char(' ') => Some(PadKey::Spin),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_keys() {
        assert_eq!(map_key(KeyCode::Up), Some(PadKey::Up));
        assert_eq!(map_key(KeyCode::Char('W')), Some(PadKey::Up));
        assert_eq!(map_key(KeyCode::Down), Some(PadKey::Down));
        assert_eq!(map_key(KeyCode::Char('s')), Some(PadKey::Down));
    }

    #[test]
    fn test_tilt_keys() {
        assert_eq!(map_key(KeyCode::Char('i')), Some(PadKey::TiltUp));
        assert_eq!(map_key(KeyCode::Char('K')), Some(PadKey::TiltDown));
        assert_eq!(map_key(KeyCode::Char(' ')), Some(PadKey::Spin));
        assert_eq!(map_key(KeyCode::Left), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }

    #[test]
    fn test_indices_are_dense() {
        for (i, key) in PadKey::ALL.iter().enumerate() {
            assert_eq!(key.index(), i);
        }
    }
}
