//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine, game rules, terminal rendering).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 16 rows (indexed 0-15, row 0 at the top)
//! - **Spawn position**: (4, -4), above the visible board
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (1000 / 60) |
//! | `PRESS_ENTER_BLINK_MS` | 1000 | Period of the "press enter" fade |
//! | `READY_GO_SLIDE_MS` | 300 | Duration of one Ready/Go slide phase |
//! | `READY_GO_HOLD_EXTRA_MS` | 700 | Extra dwell while Ready/Go is held centered |
//! | `BLOCK_FALL_MS` | 500 | Automatic fall interval |
//! | `GAME_OVER_STEP_MS` | 100 | One marker row per step of the game-over animation |
//!
//! # Examples
//!
//! ```
//! use scene_tetris_types::{Key, Point, GRID_X, GRID_Y};
//!
//! assert_eq!(Key::from_str("enter"), Some(Key::Enter));
//! assert_eq!(Point::new(4, -4).offset(1, 0), Point::new(5, -4));
//! assert_eq!((GRID_X, GRID_Y), (10, 16));
//! ```

/// Board width in cells (10 columns)
pub const GRID_X: i32 = 10;

/// Board height in cells (16 rows)
pub const GRID_Y: i32 = 16;

/// Side length of one block in display pixels
pub const BLOCK_SIZE: i32 = 24;

/// Sprite-sheet tile used for walls and game-over marker rows
pub const WALL_TILE: i32 = 7;

/// Target frame rate of the engine loop
pub const FPS: u32 = 60;

/// Fixed timestep interval in milliseconds (1000 / 60, truncated)
pub const TICK_MS: u64 = 1000 / FPS as u64;

/// Period of the "press enter" fade in milliseconds
pub const PRESS_ENTER_BLINK_MS: u64 = 1000;

/// Duration of one Ready/Go slide phase
pub const READY_GO_SLIDE_MS: u64 = 300;

/// Extra dwell added to the held (centered) Ready/Go phase
pub const READY_GO_HOLD_EXTRA_MS: u64 = 700;

/// Automatic fall interval of the active block
pub const BLOCK_FALL_MS: u64 = 500;

/// Step interval of the game-over stack-up animation
pub const GAME_OVER_STEP_MS: u64 = 100;


/// Logical keys interpreted by the engine and its scenes
///
/// Raw key events from a backend are mapped onto this small set; everything
/// else is dropped before it reaches a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Down,
    /// Rotation key
    Space,
    Enter,
}

impl Key {
    /// Parse key from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use scene_tetris_types::Key;
    ///
    /// assert_eq!(Key::from_str("LEFT"), Some(Key::Left));
    /// assert_eq!(Key::from_str("space"), Some(Key::Space));
    /// assert_eq!(Key::from_str("tab"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Key::Left),
            "right" => Some(Key::Right),
            "down" => Some(Key::Down),
            "space" => Some(Key::Space),
            "enter" => Some(Key::Enter),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Key::Left => "left",
            Key::Right => "right",
            Key::Down => "down",
            Key::Space => "space",
            Key::Enter => "enter",
        }
    }
}

/// Integer 2D point (board cells or display pixels, depending on context)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return a copy moved by `(dx, dy)`
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Axis-aligned rectangle in display pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// A `size`-by-`size` square at `(x, y)`
    pub const fn square(x: i32, y: i32, size: i32) -> Self {
        Self::new(x, y, size, size)
    }
}

/// Width and height of the display in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplaySize {
    pub width: i32,
    pub height: i32,
}

impl DisplaySize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}
