//! Game logic - the falling-block game hosted by the scene engine
//!
//! Everything here is deterministic: time comes from the engine's `Clock`,
//! randomness from a seeded [`SimpleRng`], and drawing goes through the
//! engine's `Renderer` capability.
//!
//! # Module Structure
//!
//! - [`board`]: 10x16 grid with collision, locking, line clearing and top-out
//! - [`block`]: the seven block templates, movement and rotation
//! - [`game`]: [`TetrisGame`], the Start → ReadyGo → Tetris → GameOver machine
//! - [`scenes`]: the start scene and the game scene, plus their registration
//! - [`rng`]: LCG used to pick blocks
//!
//! # Example
//!
//! ```
//! use scene_tetris_core::{Block, BlockKind, Board, Direction};
//!
//! let mut board = Board::new();
//! let mut block = Block::new(BlockKind::Square);
//! while !block.move_block(Direction::Down, &mut board) {}
//!
//! assert!(board.is_occupied(5, 15));
//! assert!(!board.is_stacked());
//! ```

pub mod block;
pub mod board;
pub mod game;
pub mod rng;
pub mod scenes;

pub use scene_tetris_engine as engine;
pub use scene_tetris_types as types;

pub use block::{Block, BlockKind, Direction, Shape};
pub use board::Board;
pub use game::{Action, GameSeq, TetrisGame};
pub use rng::SimpleRng;
pub use scenes::{register_scenes, GameScene, StartScene, SCENE_GAME};
