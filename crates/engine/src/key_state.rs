//! Per-tick key state owned by each stacked scene.

use crate::types::Key;

/// The last pressed and released key for exactly one tick.
///
/// The engine fills it right before a scene's update and clears it right
/// after, so a key event is observed once and never carried into the next tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pressed: Option<Key>,
    released: Option<Key>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, pressed: Option<Key>, released: Option<Key>) {
        self.pressed = pressed;
        self.released = released;
    }

    pub fn clear(&mut self) {
        self.pressed = None;
        self.released = None;
    }

    pub fn pressed(&self) -> Option<Key> {
        self.pressed
    }

    pub fn released(&self) -> Option<Key> {
        self.released
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed == Some(key)
    }

    pub fn is_released(&self, key: Key) -> bool {
        self.released == Some(key)
    }

    /// First key of `keys` (in priority order) that was pressed this tick.
    pub fn first_pressed(&self, keys: &[Key]) -> Option<Key> {
        keys.iter().copied().find(|k| self.is_pressed(*k))
    }
}
