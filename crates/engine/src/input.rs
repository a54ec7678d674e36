//! Input capability consumed by the engine loop.

use std::collections::VecDeque;
use std::time::Duration;

use anyhow::Result;

use crate::types::Key;

/// Source of the last pressed/released key since the previous tick.
pub trait InputSource {
    /// Wait up to `timeout` for backend events and latch them.
    fn poll(&mut self, timeout: Duration) -> Result<()>;

    fn pressed(&self) -> Option<Key>;

    fn released(&self) -> Option<Key>;

    /// Forget the latched keys (called once per tick, after the update pass).
    fn clear(&mut self);

    fn quit_requested(&self) -> bool {
        false
    }
}

/// Scripted input for tests: one queued entry is visible per tick.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    ticks: VecDeque<Option<Key>>,
    quit_when_drained: bool,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a tick with `key` pressed (or nothing for `None`).
    pub fn push(&mut self, key: Option<Key>) -> &mut Self {
        self.ticks.push_back(key);
        self
    }

    /// Ask the loop to stop once every queued tick has been consumed.
    pub fn quit_when_drained(mut self) -> Self {
        self.quit_when_drained = true;
        self
    }

    pub fn remaining(&self) -> usize {
        self.ticks.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, timeout: Duration) -> Result<()> {
        std::thread::sleep(timeout);
        Ok(())
    }

    fn pressed(&self) -> Option<Key> {
        self.ticks.front().copied().flatten()
    }

    fn released(&self) -> Option<Key> {
        None
    }

    fn clear(&mut self) {
        self.ticks.pop_front();
    }

    fn quit_requested(&self) -> bool {
        self.quit_when_drained && self.ticks.is_empty()
    }
}
