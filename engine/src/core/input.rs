//! Keyboard snapshot for the current frame.
//!
//! The host feeds key transitions in with [`Input::press`] / [`Input::release`]; components read
//! them during `update`. The per-frame sets (`pressed`, `released`) are cleared by
//! [`Input::end_frame`], which the engine calls after the update phase.

use fixedbitset::FixedBitSet;
use serde::{Deserialize, Serialize};

/// Keys known to the input snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Escape,
    Enter,
    Space,
    Tab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    Q,
    W,
    A,
    S,
    D,
    E,
    R,
    F1,
}

impl KeyCode {
    /// Number of key codes, used to size the key sets.
    pub const COUNT: usize = KeyCode::F1 as usize + 1;

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    /// Map a character to a key code, if it has one.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            ' ' => Some(KeyCode::Space),
            'q' => Some(KeyCode::Q),
            'w' => Some(KeyCode::W),
            'a' => Some(KeyCode::A),
            's' => Some(KeyCode::S),
            'd' => Some(KeyCode::D),
            'e' => Some(KeyCode::E),
            'r' => Some(KeyCode::R),
            _ => None,
        }
    }
}

/// Held / pressed / released key sets.
#[derive(Debug, Clone)]
pub struct Input {
    held: FixedBitSet,
    pressed: FixedBitSet,
    released: FixedBitSet,
}

impl Input {
    pub fn new() -> Self {
        Self {
            held: FixedBitSet::with_capacity(KeyCode::COUNT),
            pressed: FixedBitSet::with_capacity(KeyCode::COUNT),
            released: FixedBitSet::with_capacity(KeyCode::COUNT),
        }
    }

    /// Record a key going down. Repeated presses of a held key are not new presses.
    pub fn press(&mut self, key: KeyCode) {
        if !self.held.contains(key.index()) {
            self.pressed.insert(key.index());
        }
        self.held.insert(key.index());
    }

    /// Record a key going up.
    pub fn release(&mut self, key: KeyCode) {
        if self.held.contains(key.index()) {
            self.released.insert(key.index());
        }
        self.held.set(key.index(), false);
    }

    /// Key is currently held.
    pub fn key(&self, key: KeyCode) -> bool {
        self.held.contains(key.index())
    }

    /// Key went down this frame.
    pub fn key_down(&self, key: KeyCode) -> bool {
        self.pressed.contains(key.index())
    }

    /// Key went up this frame.
    pub fn key_up(&self, key: KeyCode) -> bool {
        self.released.contains(key.index())
    }

    /// Clear the per-frame transitions.
    pub fn end_frame(&mut self) {
        self.pressed.clear();
        self.released.clear();
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_is_visible_for_one_frame() {
        let mut input = Input::new();
        input.press(KeyCode::Escape);
        assert!(input.key_down(KeyCode::Escape));
        assert!(input.key(KeyCode::Escape));

        input.end_frame();
        assert!(!input.key_down(KeyCode::Escape));
        assert!(input.key(KeyCode::Escape));
    }

    #[test]
    fn holding_does_not_repeat_press() {
        let mut input = Input::new();
        input.press(KeyCode::Space);
        input.end_frame();
        input.press(KeyCode::Space);
        assert!(!input.key_down(KeyCode::Space));
    }

    #[test]
    fn release_only_counts_held_keys() {
        let mut input = Input::new();
        input.release(KeyCode::Q);
        assert!(!input.key_up(KeyCode::Q));

        input.press(KeyCode::Q);
        input.release(KeyCode::Q);
        assert!(input.key_up(KeyCode::Q));
        assert!(!input.key(KeyCode::Q));
    }

    #[test]
    fn chars_map_to_keys() {
        assert_eq!(KeyCode::from_char('Q'), Some(KeyCode::Q));
        assert_eq!(KeyCode::from_char(' '), Some(KeyCode::Space));
        assert_eq!(KeyCode::from_char('z'), None);
    }
}
