//! Block module - the falling tetromino
//!
//! A block is a 4x4 occupancy mask (`shape[row][col]`), the board position
//! of the mask's top-left cell and a color index. Blocks spawn at `(4, -4)`,
//! entirely above the visible board, and enter it by falling.
//!
//! Rotation is a plain quarter turn of the 4x4 mask (`new[x][3 - y] = old[y][x]`)
//! committed only when the turned mask fits at the current position. There
//! are no wall kicks.

use crate::board::Board;
use crate::rng::SimpleRng;
use crate::types::Point;

/// 4x4 occupancy mask, indexed `[row][col]`
pub type Shape = [[u8; 4]; 4];

/// Where new blocks appear (top-left of the mask)
pub const SPAWN_POSITION: Point = Point::new(4, -4);

/// The seven block templates, in color-index order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Bar,
    Z,
    Square,
    L,
    ReverseZ,
    T,
    ReverseL,
}

impl BlockKind {
    pub const ALL: [BlockKind; 7] = [
        BlockKind::Bar,
        BlockKind::Z,
        BlockKind::Square,
        BlockKind::L,
        BlockKind::ReverseZ,
        BlockKind::T,
        BlockKind::ReverseL,
    ];

    /// Sprite-sheet tile used to draw this kind
    pub fn color(self) -> u8 {
        self as u8
    }

    /// Spawn orientation
    pub fn shape(self) -> Shape {
        match self {
            BlockKind::Bar => [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]],
            BlockKind::Z => [[0, 0, 0, 0], [0, 0, 1, 0], [0, 1, 1, 0], [0, 1, 0, 0]],
            BlockKind::Square => [[0, 0, 0, 0], [0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
            BlockKind::L => [[0, 0, 0, 0], [0, 1, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0]],
            BlockKind::ReverseZ => [[0, 0, 0, 0], [0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 1, 0]],
            BlockKind::T => [[0, 0, 0, 0], [0, 1, 0, 0], [0, 1, 1, 0], [0, 1, 0, 0]],
            BlockKind::ReverseL => [[0, 0, 0, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 1, 0, 0]],
        }
    }
}

/// Movement directions for [`Block::move_block`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }
}

/// Quarter turn of a 4x4 mask
pub fn rotate_shape(shape: &Shape) -> Shape {
    let mut turned = [[0u8; 4]; 4];
    for (y, row) in shape.iter().enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            turned[x][3 - y] = cell;
        }
    }
    turned
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    kind: BlockKind,
    shape: Shape,
    position: Point,
}

impl Block {
    /// A fresh `kind` block at the spawn position
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            shape: kind.shape(),
            position: SPAWN_POSITION,
        }
    }

    /// A fresh block of a uniformly chosen kind
    pub fn random(rng: &mut SimpleRng) -> Self {
        let index = rng.next_range(BlockKind::ALL.len() as u32) as usize;
        Self::new(BlockKind::ALL[index])
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn color(&self) -> u8 {
        self.kind.color()
    }

    /// Board coordinates of the occupied cells (rows may be negative)
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        let origin = self.position;
        self.shape.iter().enumerate().flat_map(move |(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &cell)| cell == 1)
                .map(move |(x, _)| origin.offset(x as i32, y as i32))
        })
    }

    /// Move one step in `direction`.
    ///
    /// Left/right moves that do not fit are ignored. A down move that does
    /// not fit locks the block into `board` and returns `true`.
    pub fn move_block(&mut self, direction: Direction, board: &mut Board) -> bool {
        let (dx, dy) = direction.delta();
        let candidate = self.position.offset(dx, dy);

        if board.is_movable(candidate, &self.shape) {
            self.position = candidate;
            return false;
        }

        if direction == Direction::Down {
            board.fix_block(self.position, &self.shape, self.color());
            return true;
        }
        false
    }

    /// Rotate a quarter turn in place if the turned mask fits.
    /// Returns whether the rotation was applied.
    pub fn rotate(&mut self, board: &Board) -> bool {
        let turned = rotate_shape(&self.shape);
        if board.is_movable(self.position, &turned) {
            self.shape = turned;
            true
        } else {
            false
        }
    }

    /// Place the block at `position` without collision checks (tests, benchmarks)
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }
}
