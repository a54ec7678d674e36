//! Tetris game model - the sequence state machine behind the game scene
//!
//! ```text
//! Start --Enter--> ReadyGo --banners done--> Tetris --stacked--> GameOver
//!   ^                                                                |
//!   +----------------------- animation finished ---------------------+
//! ```
//!
//! Every timer reads the shared [`Clock`], so a `ManualClock` drives the
//! whole machine deterministically in tests.

use std::path::Path;
use std::rc::Rc;

use anyhow::Result;
use log::debug;

use crate::block::{Block, Direction};
use crate::board::Board;
use crate::engine::audio::{AudioLoader, Sound};
use crate::engine::clock::Clock;
use crate::engine::{KeyState, SceneModel};
use crate::rng::SimpleRng;
use crate::types::{
    DisplaySize, Key, Point, BLOCK_FALL_MS, GAME_OVER_STEP_MS, GRID_Y, PRESS_ENTER_BLINK_MS,
    READY_GO_HOLD_EXTRA_MS, READY_GO_SLIDE_MS,
};

pub const BGM_PATH: &str = "res/sound/bgm/Galaxy_loop.wav";
pub const LOCK_SE_PATH: &str = "res/sound/se/kachi.wav";
pub const CLEAR_SE_PATH: &str = "res/sound/se/delete.wav";

/// Keys the Tetris sequence reacts to, highest priority first
const PLAY_KEYS: [Key; 4] = [Key::Left, Key::Right, Key::Down, Key::Space];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameSeq {
    Start,
    ReadyGo,
    Tetris,
    GameOver,
}

/// One player action during the Tetris sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(Direction),
    Rotate,
}

impl Action {
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Left => Some(Action::Move(Direction::Left)),
            Key::Right => Some(Action::Move(Direction::Right)),
            Key::Down => Some(Action::Move(Direction::Down)),
            Key::Space => Some(Action::Rotate),
            Key::Enter => None,
        }
    }
}

/// Background music plus the lock and clear effects
pub struct GameSounds {
    pub bgm: Box<dyn Sound>,
    pub lock: Box<dyn Sound>,
    pub clear: Box<dyn Sound>,
}

impl GameSounds {
    pub fn load(audio: &mut dyn AudioLoader) -> Result<Self> {
        Ok(Self {
            bgm: audio.load_sound(Path::new(BGM_PATH), true)?,
            lock: audio.load_sound(Path::new(LOCK_SE_PATH), false)?,
            clear: audio.load_sound(Path::new(CLEAR_SE_PATH), false)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlidePhase {
    /// Sliding in from the left edge to the center
    Enter,
    /// Held at the center
    Hold,
    /// Sliding out to the right edge
    Leave,
}

/// A banner image and its current top-left position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Banner {
    pub width: i32,
    pub height: i32,
    pub position: Point,
}

impl Banner {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            position: Point::new(-width, 0),
        }
    }

    /// Park off-screen left, vertically centered on `display`
    fn reset(&mut self, display: DisplaySize) {
        self.position = Point::new(-self.width, (display.height - self.height) / 2);
    }
}

/// Ready/Go banner animation state
#[derive(Debug, Clone)]
pub struct ReadyGo {
    pub ready: Banner,
    pub go: Banner,
    pub phase: SlidePhase,
    pub is_go: bool,
    start_ms: u64,
}

impl ReadyGo {
    /// The banner currently on screen
    pub fn current(&self) -> &Banner {
        if self.is_go {
            &self.go
        } else {
            &self.ready
        }
    }
}

/// Game-over stack-up animation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverAnim {
    /// Marker rows drawn from the bottom of the board
    pub rows: i32,
    pub reversing: bool,
    start_ms: u64,
}

pub struct TetrisGame {
    model: SceneModel<GameSeq>,
    clock: Rc<dyn Clock>,
    display: DisplaySize,
    rng: SimpleRng,
    board: Board,
    block: Block,
    sounds: GameSounds,
    press_start_ms: u64,
    press_alpha: f32,
    ready_go: ReadyGo,
    fall_start_ms: u64,
    game_over: GameOverAnim,
}

impl TetrisGame {
    pub fn new(
        clock: Rc<dyn Clock>,
        display: DisplaySize,
        mut rng: SimpleRng,
        sounds: GameSounds,
        ready: Banner,
        go: Banner,
    ) -> Self {
        let now = clock.now_ms();
        let block = Block::random(&mut rng);
        Self {
            model: SceneModel::new(GameSeq::Start),
            clock,
            display,
            rng,
            board: Board::new(),
            block,
            sounds,
            press_start_ms: now,
            press_alpha: 1.0,
            ready_go: ReadyGo {
                ready,
                go,
                phase: SlidePhase::Enter,
                is_go: false,
                start_ms: now,
            },
            fall_start_ms: now,
            game_over: GameOverAnim {
                rows: 0,
                reversing: false,
                start_ms: now,
            },
        }
    }

    /// Restart the press-enter blink.
    pub fn begin(&mut self) {
        self.press_start_ms = self.clock.now_ms();
    }

    /// One frame of the current sequence.
    pub fn update(&mut self, keys: &KeyState) {
        match self.model.current() {
            GameSeq::Start => self.update_start(keys.is_pressed(Key::Enter)),
            GameSeq::ReadyGo => self.update_ready_go(),
            GameSeq::Tetris => self.update_tetris(keys.first_pressed(&PLAY_KEYS)),
            GameSeq::GameOver => self.update_game_over(),
        }
    }

    fn update_start(&mut self, enter: bool) {
        let now = self.clock.now_ms();

        if !enter {
            let lap = now.saturating_sub(self.press_start_ms);
            if lap > PRESS_ENTER_BLINK_MS {
                self.press_start_ms = now;
                self.press_alpha = 1.0;
            } else {
                let rate = 100 - lap * 100 / PRESS_ENTER_BLINK_MS;
                self.press_alpha = rate as f32 / 100.0;
            }
            return;
        }

        self.model.move_to(GameSeq::ReadyGo);
        self.board.clear();
        self.ready_go.ready.reset(self.display);
        self.ready_go.go.reset(self.display);
        self.ready_go.phase = SlidePhase::Enter;
        self.ready_go.is_go = false;
        self.ready_go.start_ms = now;
    }

    fn update_ready_go(&mut self) {
        let now = self.clock.now_ms();
        let lap = now.saturating_sub(self.ready_go.start_ms);
        let hold = if self.ready_go.phase == SlidePhase::Hold {
            READY_GO_HOLD_EXTRA_MS
        } else {
            0
        };

        if lap > READY_GO_SLIDE_MS + hold {
            self.ready_go.start_ms = now;
            match self.ready_go.phase {
                SlidePhase::Enter => self.ready_go.phase = SlidePhase::Hold,
                SlidePhase::Hold => self.ready_go.phase = SlidePhase::Leave,
                SlidePhase::Leave if !self.ready_go.is_go => {
                    self.ready_go.is_go = true;
                    self.ready_go.phase = SlidePhase::Enter;
                }
                SlidePhase::Leave => self.start_tetris(now),
            }
            return;
        }

        let rate = (lap * 100 / READY_GO_SLIDE_MS) as i32;
        let display_width = self.display.width;
        let phase = self.ready_go.phase;
        let banner = if self.ready_go.is_go {
            &mut self.ready_go.go
        } else {
            &mut self.ready_go.ready
        };
        let center = (display_width - banner.width) / 2;

        let (from, to) = match phase {
            SlidePhase::Enter => (-banner.width, center),
            SlidePhase::Leave => (center, display_width),
            SlidePhase::Hold => return,
        };
        banner.position.x = (to - from) * rate / 100 + from;
    }

    fn start_tetris(&mut self, now: u64) {
        self.model.move_to(GameSeq::Tetris);
        self.sounds.bgm.play();
        self.block = Block::random(&mut self.rng);
        self.fall_start_ms = now;
    }

    fn update_tetris(&mut self, key: Option<Key>) {
        let now = self.clock.now_ms();

        if let Some(action) = key.and_then(Action::from_key) {
            self.exec(action);
        } else if now.saturating_sub(self.fall_start_ms) > BLOCK_FALL_MS {
            self.exec(Action::Move(Direction::Down));
            self.fall_start_ms = now;
        }
    }

    /// Apply one action to the active block.
    ///
    /// A move runs lock, line clear and the top-out check in that order;
    /// a rotation only rotates.
    pub fn exec(&mut self, action: Action) {
        let direction = match action {
            Action::Rotate => {
                self.block.rotate(&self.board);
                return;
            }
            Action::Move(direction) => direction,
        };

        if self.block.move_block(direction, &mut self.board) {
            self.sounds.lock.play();
            self.block = Block::random(&mut self.rng);
        }

        let cleared = self.board.delete_line();
        if !cleared.is_empty() {
            debug!("cleared rows {:?}", cleared.as_slice());
            self.sounds.clear.play();
        }

        if self.board.is_stacked() {
            self.model.move_to(GameSeq::GameOver);
            self.game_over = GameOverAnim {
                rows: 0,
                reversing: false,
                start_ms: self.clock.now_ms(),
            };
        }
    }

    fn update_game_over(&mut self) {
        let now = self.clock.now_ms();
        if now.saturating_sub(self.game_over.start_ms) <= GAME_OVER_STEP_MS {
            return;
        }

        let anim = &mut self.game_over;
        if !anim.reversing {
            if anim.rows == GRID_Y {
                anim.reversing = true;
                self.board.clear();
            } else {
                anim.rows += 1;
            }
        } else if anim.rows == 0 {
            self.model.move_to(GameSeq::Start);
            self.press_start_ms = now;
        } else {
            anim.rows -= 1;
        }
        self.game_over.start_ms = now;
    }

    /// Stop the background music.
    pub fn stop_music(&mut self) {
        self.sounds.bgm.stop();
    }

    pub fn seq(&self) -> GameSeq {
        self.model.current()
    }

    pub fn previous_seq(&self) -> Option<GameSeq> {
        self.model.previous()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn block(&self) -> &Block {
        &self.block
    }

    /// Replace the active block (tests, benchmarks)
    pub fn set_block(&mut self, block: Block) {
        self.block = block;
    }

    pub fn press_alpha(&self) -> f32 {
        self.press_alpha
    }

    pub fn ready_go(&self) -> &ReadyGo {
        &self.ready_go
    }

    pub fn game_over(&self) -> &GameOverAnim {
        &self.game_over
    }

    pub fn display(&self) -> DisplaySize {
        self.display
    }
}
