//! Scene Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates as `scene_tetris::{core,engine,input,term,types}`
//! and adds the pieces only the binary needs: audio backends and logging setup.

pub mod audio;
pub mod logging;

pub use scene_tetris_core as core;
pub use scene_tetris_engine as engine;
pub use scene_tetris_input as input;
pub use scene_tetris_term as term;
pub use scene_tetris_types as types;
