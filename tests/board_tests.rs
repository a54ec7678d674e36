//! Board tests - collision, locking, line clearing and top-out

use scene_tetris::core::{BlockKind, Board};
use scene_tetris::types::{Point, GRID_X, GRID_Y};

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    for y in 0..GRID_Y {
        for x in 0..GRID_X {
            assert!(!board.is_occupied(x, y), "Cell ({}, {}) should be empty", x, y);
        }
    }
    assert_eq!(board.occupied_cells().count(), 0);
}

#[test]
fn test_is_movable_rejects_overlap() {
    let mut board = Board::new();
    board.set_cell(5, 10, Some(2));
    let square = BlockKind::Square.shape();

    // Square cells sit at mask columns 1..=2, rows 1..=2.
    assert!(!board.is_movable(Point::new(4, 8), &square));
    assert!(!board.is_movable(Point::new(3, 9), &square));
    assert!(board.is_movable(Point::new(4, 7), &square));
    assert!(board.is_movable(Point::new(5, 8), &square));
}

#[test]
fn test_is_movable_rejects_walls_and_floor() {
    let board = Board::new();
    let square = BlockKind::Square.shape();

    assert!(!board.is_movable(Point::new(-2, 5), &square));
    assert!(board.is_movable(Point::new(-1, 5), &square));
    assert!(board.is_movable(Point::new(7, 5), &square));
    assert!(!board.is_movable(Point::new(8, 5), &square));
    assert!(board.is_movable(Point::new(4, 13), &square));
    assert!(!board.is_movable(Point::new(4, 14), &square));
}

#[test]
fn test_delete_line_single_full_row() {
    let mut board = Board::new();
    board.set_cell(0, 12, Some(4));
    board.set_cell(3, 13, Some(5));
    board.fill_row(14, 1);
    board.set_cell(9, 15, Some(6));

    let cleared = board.delete_line();

    assert_eq!(cleared.as_slice(), &[14]);
    // Rows above moved down by one
    assert_eq!(board.color_at(0, 13), Some(4));
    assert_eq!(board.color_at(3, 14), Some(5));
    assert!(!board.is_occupied(0, 12));
    // Row below untouched
    assert_eq!(board.color_at(9, 15), Some(6));
    assert_eq!(board.occupied_cells().count(), 3);
}

#[test]
fn test_delete_line_without_full_rows_is_noop() {
    let mut board = Board::new();
    for x in 0..GRID_X - 1 {
        board.set_cell(x, 15, Some(3));
    }
    board.set_cell(4, 10, Some(1));
    let before = board.clone();

    assert!(board.delete_line().is_empty());
    assert_eq!(board, before);
}

#[test]
fn test_full_bottom_row_shifts_everything_down() {
    let mut board = Board::new();
    for y in 0..GRID_Y - 1 {
        board.set_cell(y % GRID_X, y, Some((y % 7) as u8));
    }
    board.fill_row(GRID_Y - 1, 0);
    let before = board.clone();

    let cleared = board.delete_line();

    assert_eq!(cleared.as_slice(), &[(GRID_Y - 1) as usize]);
    for y in 1..GRID_Y {
        for x in 0..GRID_X {
            assert_eq!(board.color_at(x, y), before.color_at(x, y - 1), "({}, {})", x, y);
        }
    }
    for x in 0..GRID_X {
        assert!(!board.is_occupied(x, 0));
    }
}

#[test]
fn test_is_stacked_checks_spawn_columns_of_top_row() {
    let mut board = Board::new();
    board.set_cell(3, 0, Some(1));
    board.set_cell(6, 0, Some(1));
    assert!(!board.is_stacked());

    board.set_cell(5, 0, Some(1));
    assert!(board.is_stacked());

    board.clear();
    board.set_cell(4, 0, Some(1));
    assert!(board.is_stacked());
}
