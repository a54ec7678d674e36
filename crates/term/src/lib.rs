//! Terminal rendering backend.
//!
//! Scenes paint display-pixel sprites through the engine's `Renderer`
//! capability; [`SpriteRenderer`] turns those blits into styled character
//! cells in a [`FrameBuffer`] and [`TerminalRenderer`] flushes each frame
//! to the terminal as a diff against the previous one.

pub mod fb;
pub mod renderer;
pub mod sprites;

pub use scene_tetris_engine as engine;
pub use scene_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use sprites::{SpriteAtlas, SpriteRenderer, CELL_HEIGHT, CELL_WIDTH};
