//! Crossterm-backed [`InputSource`].

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::engine::input::InputSource;
use crate::map::{map_key_event, should_quit};
use crate::types::Key;

/// Latches the most recent press and release seen by `poll`.
///
/// Auto-repeat counts as a press, so holding a key keeps moving the block.
/// Terminals without release events simply never report `released`.
#[derive(Debug, Default)]
pub struct TerminalInput {
    pressed: Option<Key>,
    released: Option<Key>,
    quit: bool,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one key event to the latched state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if should_quit(key) {
            self.quit = true;
            return;
        }
        let Some(mapped) = map_key_event(key) else {
            return;
        };
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.pressed = Some(mapped),
            KeyEventKind::Release => self.released = Some(mapped),
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self, timeout: Duration) -> Result<()> {
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    fn pressed(&self) -> Option<Key> {
        self.pressed
    }

    fn released(&self) -> Option<Key> {
        self.released
    }

    fn clear(&mut self) {
        self.pressed = None;
        self.released = None;
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}
