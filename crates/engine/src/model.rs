//! Sequence bookkeeping shared by scene models.

use std::fmt;

use log::debug;

/// Current and previous sequence number of a scene's state machine.
///
/// Both values change together through [`SceneModel::move_to`]; `previous`
/// stays `None` until the first transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneModel<S> {
    current: S,
    previous: Option<S>,
}

impl<S> SceneModel<S>
where
    S: Copy + PartialEq + fmt::Debug,
{
    pub fn new(start: S) -> Self {
        Self {
            current: start,
            previous: None,
        }
    }

    pub fn current(&self) -> S {
        self.current
    }

    pub fn previous(&self) -> Option<S> {
        self.previous
    }

    pub fn is(&self, seq: S) -> bool {
        self.current == seq
    }

    pub fn move_to(&mut self, next: S) {
        debug!("sequence {:?} -> {:?}", self.current, next);
        self.previous = Some(self.current);
        self.current = next;
    }
}
