//! Block tests - spawning, movement, rotation and locking

use scene_tetris::core::block::rotate_shape;
use scene_tetris::core::{Block, BlockKind, Board, Direction, SimpleRng};
use scene_tetris::types::Point;

#[test]
fn test_rotation_has_period_four() {
    let board = Board::new();
    for kind in [BlockKind::Bar, BlockKind::T] {
        let mut block = Block::new(kind);
        block.set_position(Point::new(3, 5));
        let original = *block.shape();

        let mut shapes = vec![original];
        for _ in 0..4 {
            assert!(block.rotate(&board), "{:?} should rotate freely", kind);
            shapes.push(*block.shape());
        }

        assert_eq!(shapes[4], original, "{:?}", kind);
        assert_ne!(shapes[1], original, "{:?}", kind);
        assert_ne!(shapes[2], shapes[1], "{:?}", kind);
    }
}

#[test]
fn test_rotation_blocked_by_wall_keeps_shape() {
    let board = Board::new();
    let mut block = Block::new(BlockKind::Bar);
    // Vertical bar hugging the left wall; the horizontal form would poke out.
    block.set_position(Point::new(-1, 5));
    let before = *block.shape();

    assert!(!block.rotate(&board));
    assert_eq!(*block.shape(), before);
}

#[test]
fn test_rotate_shape_matches_quarter_turn() {
    let t = BlockKind::T.shape();
    let turned = rotate_shape(&t);
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(turned[x][3 - y], t[y][x]);
        }
    }
}

#[test]
fn test_square_drop_locks_at_lowest_legal_row() {
    let mut board = Board::new();
    let mut block = Block::new(BlockKind::Square);

    let mut moves = 0;
    while !block.move_block(Direction::Down, &mut board) {
        moves += 1;
        assert!(moves < 32, "block never locked");
    }

    // From y = -4 down to y = 13, then one rejected move locks it.
    assert_eq!(moves, 17);
    assert_eq!(block.position(), Point::new(4, 13));
    for (x, y) in [(5, 14), (6, 14), (5, 15), (6, 15)] {
        assert_eq!(board.color_at(x, y), Some(BlockKind::Square.color()));
    }
    assert_eq!(board.occupied_cells().count(), 4);
    assert!(!board.is_stacked());
}

#[test]
fn test_every_kind_lands_on_the_floor() {
    for kind in BlockKind::ALL {
        let mut board = Board::new();
        let mut block = Block::new(kind);
        while !block.move_block(Direction::Down, &mut board) {}

        let lowest = board.occupied_cells().map(|(_, y, _)| y).max();
        assert_eq!(lowest, Some(15), "{:?}", kind);
        assert_eq!(board.occupied_cells().count(), 4, "{:?}", kind);
    }
}

#[test]
fn test_down_rejection_above_board_drops_hidden_cells() {
    let mut board = Board::new();
    for y in 1..16 {
        board.set_cell(5, y, Some(0));
    }
    let mut block = Block::new(BlockKind::Bar);

    // Bar occupies column 5 and rows y..y+3; only row 0 is free.
    assert!(!block.move_block(Direction::Down, &mut board));
    assert!(block.move_block(Direction::Down, &mut board));

    assert_eq!(block.position(), Point::new(4, -3));
    assert!(board.is_occupied(5, 0));
    assert_eq!(board.occupied_cells().filter(|&(x, _, _)| x == 5).count(), 16);
    assert!(board.is_stacked());
}

#[test]
fn test_random_blocks_are_deterministic_per_seed() {
    let mut a = SimpleRng::new(99);
    let mut b = SimpleRng::new(99);
    let kinds_a: Vec<_> = (0..20).map(|_| Block::random(&mut a).kind()).collect();
    let kinds_b: Vec<_> = (0..20).map(|_| Block::random(&mut b).kind()).collect();
    assert_eq!(kinds_a, kinds_b);
    assert!(kinds_a.iter().all(|k| Block::new(*k).position() == Point::new(4, -4)));
}
