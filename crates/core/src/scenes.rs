//! The two scenes the binary registers: a one-shot start scene and the game.

use std::rc::Rc;

use anyhow::{anyhow, Result};

use crate::engine::clock::Clock;
use crate::engine::render::{AssetLoader, ImageId, Renderer};
use crate::engine::{
    KeyState, Scene, SceneContext, SceneId, SceneModel, SceneRegistry, SceneTransition,
};
use crate::game::{Banner, GameSeq, GameSounds, TetrisGame};
use crate::rng::SimpleRng;
use crate::types::{Point, Rect, BLOCK_SIZE, GRID_X, GRID_Y, WALL_TILE};

/// Id the game scene is registered under
pub const SCENE_GAME: SceneId = SceneId(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartSeq {
    UpdateScene,
    MoveGame,
}

/// Hands control to `next` on its second update.
pub struct StartScene {
    model: SceneModel<StartSeq>,
    next: SceneId,
}

impl StartScene {
    pub fn new(next: SceneId) -> Self {
        Self {
            model: SceneModel::new(StartSeq::UpdateScene),
            next,
        }
    }
}

impl Scene for StartScene {
    fn update(&mut self, _keys: &KeyState, _is_parent: bool) -> SceneTransition {
        match self.model.current() {
            StartSeq::UpdateScene => {
                self.model.move_to(StartSeq::MoveGame);
                SceneTransition::None
            }
            StartSeq::MoveGame => SceneTransition::Jump(self.next),
        }
    }

    fn name(&self) -> &str {
        "start"
    }
}

/// A loaded image with its pixel size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub id: ImageId,
    pub width: i32,
    pub height: i32,
}

impl Sprite {
    pub fn load(assets: &mut dyn AssetLoader, path: &str) -> Result<Self> {
        let id = assets.load_image(path)?;
        let (width, height) = assets
            .image_size(id)
            .ok_or_else(|| anyhow!("no size for image {path}"))?;
        Ok(Self { id, width, height })
    }

    fn at(&self, x: i32, y: i32) -> Rect {
        Rect::new(x, y, self.width, self.height)
    }
}

pub struct GameImages {
    pub bg: Sprite,
    pub bg_block: Sprite,
    /// Row of 24x24 tiles: colors 0..7, then the wall tile
    pub block: Sprite,
    pub press: Sprite,
    pub ready: Sprite,
    pub go: Sprite,
}

impl GameImages {
    pub fn load(assets: &mut dyn AssetLoader) -> Result<Self> {
        Ok(Self {
            bg: Sprite::load(assets, "res/image/bg.png")?,
            bg_block: Sprite::load(assets, "res/image/bgBlock.png")?,
            block: Sprite::load(assets, "res/image/block.png")?,
            press: Sprite::load(assets, "res/image/press.png")?,
            ready: Sprite::load(assets, "res/image/ready.png")?,
            go: Sprite::load(assets, "res/image/go.png")?,
        })
    }
}

fn tile(index: i32) -> Option<Rect> {
    Some(Rect::square(BLOCK_SIZE * index, 0, BLOCK_SIZE))
}

pub struct GameScene {
    game: TetrisGame,
    images: GameImages,
    press_position: Point,
}

impl GameScene {
    pub fn new(ctx: &mut SceneContext<'_>, rng: SimpleRng) -> Result<Self> {
        let images = GameImages::load(&mut *ctx.assets)?;
        let sounds = GameSounds::load(&mut *ctx.audio)?;
        let display = ctx.display;
        let clock: Rc<dyn Clock> = Rc::clone(&ctx.clock);

        let game = TetrisGame::new(
            clock,
            display,
            rng,
            sounds,
            Banner::new(images.ready.width, images.ready.height),
            Banner::new(images.go.width, images.go.height),
        );
        let press_position = Point::new(
            (display.width - images.press.width) / 2,
            (display.height - images.press.height) / 2,
        );

        Ok(Self {
            game,
            images,
            press_position,
        })
    }

    pub fn game(&self) -> &TetrisGame {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut TetrisGame {
        &mut self.game
    }

    fn draw_field(&self, renderer: &mut dyn Renderer) {
        let images = &self.images;
        renderer.draw_image(images.bg.id, images.bg.at(0, 0), None);

        for row in 0..GRID_Y {
            for col in 0..GRID_X {
                let dst = Rect::square(BLOCK_SIZE + BLOCK_SIZE * col, BLOCK_SIZE * row, BLOCK_SIZE);
                renderer.draw_image(images.bg_block.id, dst, None);
            }
        }

        // Side walls on every row, plus the floor row below the board
        for row in 0..=GRID_Y {
            for col in 0..=GRID_X + 1 {
                if col == 0 || col == GRID_X + 1 || row == GRID_Y {
                    let dst = Rect::square(BLOCK_SIZE * col, BLOCK_SIZE * row, BLOCK_SIZE);
                    renderer.draw_image(images.block.id, dst, tile(WALL_TILE));
                }
            }
        }
    }

    fn draw_press_enter(&self, renderer: &mut dyn Renderer) {
        let press = &self.images.press;
        renderer.set_alpha(self.game.press_alpha());
        renderer.draw_image(press.id, press.at(self.press_position.x, self.press_position.y), None);
        renderer.set_alpha(1.0);
    }

    fn draw_ready_go(&self, renderer: &mut dyn Renderer) {
        let ready_go = self.game.ready_go();
        let sprite = if ready_go.is_go {
            &self.images.go
        } else {
            &self.images.ready
        };
        let pos = ready_go.current().position;
        renderer.draw_image(sprite.id, sprite.at(pos.x, pos.y), None);
    }

    fn draw_tetris(&self, renderer: &mut dyn Renderer) {
        let block_image = self.images.block.id;

        for (x, y, color) in self.game.board().occupied_cells() {
            let dst = Rect::square((x + 1) * BLOCK_SIZE, y * BLOCK_SIZE, BLOCK_SIZE);
            renderer.draw_image(block_image, dst, tile(color as i32));
        }

        let block = self.game.block();
        let color = block.color() as i32;
        for cell in block.cells().filter(|p| p.y >= 0) {
            let dst = Rect::square((cell.x + 1) * BLOCK_SIZE, cell.y * BLOCK_SIZE, BLOCK_SIZE);
            renderer.draw_image(block_image, dst, tile(color));
        }
    }

    fn draw_game_over(&self, renderer: &mut dyn Renderer) {
        for i in 0..self.game.game_over().rows {
            let y = GRID_Y - 1 - i;
            for x in 1..=GRID_X {
                let dst = Rect::square(x * BLOCK_SIZE, y * BLOCK_SIZE, BLOCK_SIZE);
                renderer.draw_image(self.images.block.id, dst, tile(WALL_TILE));
            }
        }
    }
}

impl Scene for GameScene {
    fn begin(&mut self) {
        self.game.begin();
    }

    fn update(&mut self, keys: &KeyState, _is_parent: bool) -> SceneTransition {
        self.game.update(keys);
        SceneTransition::None
    }

    fn draw(&self, renderer: &mut dyn Renderer, _is_parent: bool) {
        self.draw_field(renderer);

        match self.game.seq() {
            GameSeq::Start => self.draw_press_enter(renderer),
            GameSeq::ReadyGo => self.draw_ready_go(renderer),
            GameSeq::Tetris => self.draw_tetris(renderer),
            GameSeq::GameOver => {
                self.draw_tetris(renderer);
                self.draw_game_over(renderer);
            }
        }
    }

    fn dispose(&mut self) {
        self.game.stop_music();
    }

    fn name(&self) -> &str {
        "game"
    }
}

/// Register the start scene under [`SceneId::START`] and the game under [`SCENE_GAME`].
pub fn register_scenes(registry: &mut SceneRegistry, seed: u32) {
    registry
        .register(SceneId::START, |_ctx| Ok(Box::new(StartScene::new(SCENE_GAME))))
        .register(SCENE_GAME, move |ctx| {
            Ok(Box::new(GameScene::new(ctx, SimpleRng::new(seed))?))
        });
}
