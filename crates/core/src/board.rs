//! Board module - manages the game grid
//!
//! The board is a 10x16 grid where each cell is either empty or holds the
//! color index of the block that locked there. Uses a flat array for cache
//! locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..15
//! (top to bottom). Blocks may hang above the board with negative rows; those
//! cells are never stored.

use arrayvec::ArrayVec;

use crate::block::Shape;
use crate::types::{Point, GRID_X, GRID_Y};

const WIDTH: usize = GRID_X as usize;
const HEIGHT: usize = GRID_Y as usize;

/// Total number of cells on the board
const BOARD_SIZE: usize = WIDTH * HEIGHT;

/// Cell content: `Some(color)` when occupied
pub type Cell = Option<u8>;

/// Row indices removed by one [`Board::delete_line`] sweep, top to bottom
pub type ClearedRows = ArrayVec<usize, HEIGHT>;

/// The game board - 10 columns x 16 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= GRID_X || y < 0 || y >= GRID_Y {
            return None;
        }
        Some(y as usize * WIDTH + x as usize)
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(Self::index(x, y).map(|i| self.cells[i]), Some(Some(_)))
    }

    /// Color index of an occupied cell
    pub fn color_at(&self, x: i32, y: i32) -> Option<u8> {
        Self::index(x, y).and_then(|i| self.cells[i])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether `shape` fits with its top-left at `pos`.
    ///
    /// Cells above the board only need a column inside `0..GRID_X`. Cells on
    /// the board must be in range and empty.
    pub fn is_movable(&self, pos: Point, shape: &Shape) -> bool {
        for (dy, row) in shape.iter().enumerate() {
            for (dx, &cell) in row.iter().enumerate() {
                if cell != 1 {
                    continue;
                }
                let x = pos.x + dx as i32;
                let y = pos.y + dy as i32;

                if !(0..GRID_X).contains(&x) {
                    return false;
                }
                if y >= GRID_Y || (y >= 0 && self.is_occupied(x, y)) {
                    return false;
                }
            }
        }
        true
    }

    /// Lock `shape` at `pos` with `color`. Cells above the board are dropped.
    pub fn fix_block(&mut self, pos: Point, shape: &Shape, color: u8) {
        for (dy, row) in shape.iter().enumerate() {
            for (dx, &cell) in row.iter().enumerate() {
                if cell == 1 {
                    self.set_cell(pos.x + dx as i32, pos.y + dy as i32, Some(color));
                }
            }
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        let start = y * WIDTH;
        self.cells[start..start + WIDTH].iter().all(Option::is_some)
    }

    /// Remove every full row, top to bottom.
    ///
    /// Each full row is emptied, the rows above it shift down by one and
    /// row 0 becomes empty. Returns the indices of the removed rows.
    pub fn delete_line(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();

        for y in 0..HEIGHT {
            if !self.is_row_full(y) {
                continue;
            }
            // copy_within handles the overlapping shift
            self.cells.copy_within(0..y * WIDTH, WIDTH);
            self.cells[..WIDTH].fill(None);
            cleared.push(y);
        }

        cleared
    }

    /// Blocks have reached the spawn columns of the top row
    pub fn is_stacked(&self) -> bool {
        self.is_occupied(4, 0) || self.is_occupied(5, 0)
    }

    /// Occupied cells as `(x, y, color)`, row by row
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32, u8)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, cell)| {
            cell.map(|color| ((i % WIDTH) as i32, (i / WIDTH) as i32, color))
        })
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Fill row `y` completely with `color` (tests, benchmarks)
    pub fn fill_row(&mut self, y: i32, color: u8) {
        for x in 0..GRID_X {
            self.set_cell(x, y, Some(color));
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockKind;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 15), Some(159));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 16), None);
    }

    #[test]
    fn test_set_cell_out_of_bounds() {
        let mut board = Board::new();
        assert!(board.set_cell(3, 7, Some(2)));
        assert!(!board.set_cell(3, -1, Some(2)));
        assert_eq!(board.color_at(3, 7), Some(2));
        assert!(!board.is_occupied(3, 6));
    }

    #[test]
    fn test_negative_rows_only_check_columns() {
        let board = Board::new();
        let bar = BlockKind::Bar.shape();
        // Column 1 of the mask lands on x = -1.
        assert!(!board.is_movable(Point::new(-2, -4), &bar));
        assert!(board.is_movable(Point::new(-1, -4), &bar));
        assert!(board.is_movable(Point::new(8, -4), &bar));
        assert!(!board.is_movable(Point::new(9, -4), &bar));
    }

    #[test]
    fn test_fix_block_drops_cells_above_board() {
        let mut board = Board::new();
        let bar = BlockKind::Bar.shape();
        board.fix_block(Point::new(0, -2), &bar, 0);

        assert_eq!(board.occupied_cells().count(), 2);
        assert!(board.is_occupied(1, 0));
        assert!(board.is_occupied(1, 1));
    }

    #[test]
    fn test_delete_line_two_separate_rows() {
        let mut board = Board::new();
        board.fill_row(15, 1);
        board.set_cell(2, 14, Some(3));
        board.fill_row(13, 1);
        board.set_cell(7, 12, Some(4));

        let cleared = board.delete_line();

        assert_eq!(cleared.as_slice(), &[13, 15]);
        assert_eq!(board.color_at(2, 15), Some(3));
        assert_eq!(board.color_at(7, 14), Some(4));
        assert_eq!(board.occupied_cells().count(), 2);
    }
}
