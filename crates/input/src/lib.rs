//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto the engine's logical [`crate::types::Key`]s
//! and provides [`TerminalInput`], the [`InputSource`](scene_tetris_engine::input::InputSource)
//! the binary hands to the engine loop.

pub mod map;
pub mod terminal;

pub use scene_tetris_engine as engine;
pub use scene_tetris_types as types;

pub use map::{map_key_event, should_quit};
pub use terminal::TerminalInput;
