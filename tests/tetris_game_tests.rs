//! TetrisGame tests - the Start / ReadyGo / Tetris / GameOver sequence machine

use std::rc::Rc;

use scene_tetris::core::game::{
    Banner, GameSounds, SlidePhase, BGM_PATH, CLEAR_SE_PATH, LOCK_SE_PATH,
};
use scene_tetris::core::{Action, Block, BlockKind, Direction, GameSeq, SimpleRng, TetrisGame};
use scene_tetris::engine::audio::RecordingAudio;
use scene_tetris::engine::clock::ManualClock;
use scene_tetris::engine::KeyState;
use scene_tetris::types::{DisplaySize, Key, Point, GRID_X, GRID_Y};

const BGM: &str = "Galaxy_loop.wav";
const LOCK_SE: &str = "kachi.wav";
const CLEAR_SE: &str = "delete.wav";

struct Harness {
    clock: Rc<ManualClock>,
    audio: RecordingAudio,
    game: TetrisGame,
}

impl Harness {
    fn new() -> Self {
        let clock = Rc::new(ManualClock::new(0));
        let mut audio = RecordingAudio::new();
        let sounds = GameSounds::load(&mut audio).unwrap();
        let game = TetrisGame::new(
            clock.clone(),
            DisplaySize::new(288, 408),
            SimpleRng::new(2024),
            sounds,
            Banner::new(120, 48),
            Banner::new(96, 48),
        );
        Self { clock, audio, game }
    }

    fn update(&mut self, key: Option<Key>) {
        let mut keys = KeyState::new();
        keys.update(key, None);
        self.game.update(&keys);
    }

    /// Advance the clock by `ms` and run one idle frame.
    fn wait(&mut self, ms: u64) {
        self.clock.advance(ms);
        self.update(None);
    }

    /// Press Enter and run the whole Ready/Go animation.
    fn start_playing(&mut self) {
        self.update(Some(Key::Enter));
        for gate in [301, 1001, 301, 301, 1001, 301] {
            self.wait(gate);
        }
        assert_eq!(self.game.seq(), GameSeq::Tetris);
    }

    /// Put a fresh `kind` block at spawn and move it down until it locks.
    fn drop_block(&mut self, kind: BlockKind) {
        let locks = self.audio.play_count(LOCK_SE);
        self.game.set_block(Block::new(kind));
        for _ in 0..GRID_Y + 4 {
            self.game.exec(Action::Move(Direction::Down));
            if self.audio.play_count(LOCK_SE) > locks {
                return;
            }
        }
        panic!("{kind:?} never locked");
    }
}

#[test]
fn test_sound_paths() {
    assert!(BGM_PATH.ends_with(BGM));
    assert!(LOCK_SE_PATH.ends_with(LOCK_SE));
    assert!(CLEAR_SE_PATH.ends_with(CLEAR_SE));
}

#[test]
fn test_ready_go_timeline() {
    let mut h = Harness::new();
    h.update(Some(Key::Enter));
    assert_eq!(h.game.seq(), GameSeq::ReadyGo);

    // Ready: slide in, hold, slide out
    h.wait(301);
    assert_eq!(h.game.ready_go().phase, SlidePhase::Hold);
    h.wait(1000);
    assert_eq!(h.game.ready_go().phase, SlidePhase::Hold, "hold lasts 1000 ms");
    h.wait(1);
    assert_eq!(h.game.ready_go().phase, SlidePhase::Leave);
    h.wait(150);
    // (288 - 84) * 50 / 100 + 84
    assert_eq!(h.game.ready_go().ready.position.x, 186);
    h.wait(151);
    assert!(h.game.ready_go().is_go);
    assert_eq!(h.game.ready_go().phase, SlidePhase::Enter);

    // Go: same three phases, then play starts
    h.wait(150);
    // (96 + 96) * 50 / 100 - 96
    assert_eq!(h.game.ready_go().current().position, Point::new(0, 180));
    h.wait(151);
    h.wait(1001);
    h.wait(301);
    assert_eq!(h.game.seq(), GameSeq::Tetris);
    assert_eq!(h.game.previous_seq(), Some(GameSeq::ReadyGo));
    assert_eq!(h.audio.play_count(BGM), 1);
    assert_eq!(h.game.block().position(), Point::new(4, -4));
}

#[test]
fn test_block_falls_every_500ms_without_input() {
    let mut h = Harness::new();
    h.start_playing();
    h.game.set_block(Block::new(BlockKind::T));

    h.wait(500);
    assert_eq!(h.game.block().position().y, -4);
    h.wait(1);
    assert_eq!(h.game.block().position().y, -3);
    h.wait(500);
    assert_eq!(h.game.block().position().y, -3);
    h.wait(1);
    assert_eq!(h.game.block().position().y, -2);
}

#[test]
fn test_keys_act_immediately() {
    let mut h = Harness::new();
    h.start_playing();
    h.game.set_block(Block::new(BlockKind::T));

    h.update(Some(Key::Left));
    assert_eq!(h.game.block().position(), Point::new(3, -4));
    h.update(Some(Key::Right));
    h.update(Some(Key::Right));
    assert_eq!(h.game.block().position(), Point::new(5, -4));
    h.update(Some(Key::Down));
    assert_eq!(h.game.block().position(), Point::new(5, -3));

    let before = *h.game.block().shape();
    h.update(Some(Key::Space));
    assert_ne!(*h.game.block().shape(), before);
    assert_eq!(h.game.block().position(), Point::new(5, -3));

    // Enter means nothing during play
    h.update(Some(Key::Enter));
    assert_eq!(h.game.block().position(), Point::new(5, -3));
}

#[test]
fn test_lock_plays_sound_and_spawns_next_block() {
    let mut h = Harness::new();
    h.start_playing();
    h.game.set_block(Block::new(BlockKind::Square));

    for _ in 0..17 {
        h.game.exec(Action::Move(Direction::Down));
    }
    assert_eq!(h.game.block().position(), Point::new(4, 13));
    assert_eq!(h.audio.play_count(LOCK_SE), 0);

    h.game.exec(Action::Move(Direction::Down));
    assert_eq!(h.audio.play_count(LOCK_SE), 1);
    assert_eq!(h.game.block().position(), Point::new(4, -4));
    assert!(h.game.board().is_occupied(5, 15));
    assert!(h.game.board().is_occupied(6, 14));
    assert!(!h.game.board().is_stacked());
    assert_eq!(h.game.seq(), GameSeq::Tetris);
    assert_eq!(h.audio.play_count(CLEAR_SE), 0);
}

#[test]
fn test_completed_row_is_cleared_with_one_sound() {
    let mut h = Harness::new();
    h.start_playing();
    for x in 0..GRID_X {
        if x != 5 && x != 6 {
            h.game.board_mut().set_cell(x, 15, Some(1));
        }
    }

    h.drop_block(BlockKind::Square);

    assert_eq!(h.audio.play_count(CLEAR_SE), 1);
    assert_eq!(h.audio.play_count(LOCK_SE), 1);
    let cells: Vec<_> = h.game.board().occupied_cells().map(|(x, y, _)| (x, y)).collect();
    assert_eq!(cells, vec![(5, 15), (6, 15)]);
}

#[test]
fn test_stacking_to_the_top_ends_the_game() {
    let mut h = Harness::new();
    h.start_playing();
    for y in 2..GRID_Y {
        h.game.board_mut().set_cell(5, y, Some(2));
        h.game.board_mut().set_cell(6, y, Some(2));
    }

    h.drop_block(BlockKind::Square);

    assert!(h.game.board().is_stacked());
    assert_eq!(h.game.seq(), GameSeq::GameOver);
    assert_eq!(h.game.game_over().rows, 0);
    assert!(!h.game.game_over().reversing);
}

#[test]
fn test_game_over_animation_returns_to_start() {
    let mut h = Harness::new();
    h.start_playing();
    for y in 2..GRID_Y {
        h.game.board_mut().set_cell(5, y, Some(2));
    }
    h.drop_block(BlockKind::Bar);
    assert_eq!(h.game.seq(), GameSeq::GameOver);

    h.wait(100);
    assert_eq!(h.game.game_over().rows, 0, "steps need more than 100 ms");

    for expected in 1..=GRID_Y {
        h.wait(101);
        assert_eq!(h.game.game_over().rows, expected);
    }
    assert!(h.game.board().occupied_cells().count() > 0);

    h.wait(101);
    assert!(h.game.game_over().reversing);
    assert_eq!(h.game.board().occupied_cells().count(), 0);

    for expected in (0..GRID_Y).rev() {
        h.wait(101);
        assert_eq!(h.game.game_over().rows, expected);
        assert_eq!(h.game.seq(), GameSeq::GameOver);
    }

    h.wait(101);
    assert_eq!(h.game.seq(), GameSeq::Start);
    assert_eq!(h.game.previous_seq(), Some(GameSeq::GameOver));

    // The press-enter blink restarts from full opacity
    h.wait(250);
    assert_eq!(h.game.press_alpha(), 0.75);
}
