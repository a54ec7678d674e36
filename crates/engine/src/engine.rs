//! Fixed-timestep engine loop.
//!
//! One tick: hand the latched keys to the director's update pass, apply the
//! transitions scenes asked for, then draw the whole stack.

use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use log::info;

use crate::audio::AudioLoader;
use crate::clock::Clock;
use crate::director::Director;
use crate::input::InputSource;
use crate::registry::SceneRegistry;
use crate::render::Renderer;
use crate::scene::{SceneContext, SceneId};
use crate::types::{DisplaySize, TICK_MS};

pub struct Engine {
    director: Director,
    registry: SceneRegistry,
    display: DisplaySize,
    clock: Rc<dyn Clock>,
    audio: Box<dyn AudioLoader>,
    tick_ms: u64,
    last_tick_ms: u64,
}

impl Engine {
    pub fn new(
        display: DisplaySize,
        registry: SceneRegistry,
        clock: Rc<dyn Clock>,
        audio: Box<dyn AudioLoader>,
    ) -> Self {
        let last_tick_ms = clock.now_ms();
        Self {
            director: Director::new(),
            registry,
            display,
            clock,
            audio,
            tick_ms: TICK_MS,
            last_tick_ms,
        }
    }

    pub fn with_tick_ms(mut self, tick_ms: u64) -> Self {
        self.tick_ms = tick_ms.max(1);
        self
    }

    pub fn director(&self) -> &Director {
        &self.director
    }

    /// Construct `start` through the registry and make it the only scene.
    pub fn launch(&mut self, start: SceneId, renderer: &mut dyn Renderer) -> Result<()> {
        info!(
            "launching {} on a {}x{} display",
            start, self.display.width, self.display.height
        );
        let mut ctx = SceneContext {
            display: self.display,
            assets: renderer.assets(),
            audio: self.audio.as_mut(),
            clock: Rc::clone(&self.clock),
        };
        let scene = self.registry.create(start, &mut ctx)?;
        self.director.run_scene(scene);
        self.last_tick_ms = self.clock.now_ms();
        Ok(())
    }

    /// Run a single update/transition/draw cycle with the currently latched keys.
    pub fn tick(&mut self, input: &mut dyn InputSource, renderer: &mut dyn Renderer) -> Result<()> {
        let requests = self.director.update(input.pressed(), input.released());
        input.clear();

        if !requests.is_empty() {
            let mut ctx = SceneContext {
                display: self.display,
                assets: renderer.assets(),
                audio: self.audio.as_mut(),
                clock: Rc::clone(&self.clock),
            };
            self.director.apply_requests(requests, &self.registry, &mut ctx)?;
        }

        renderer.begin_frame()?;
        self.director.draw(renderer);
        renderer.end_frame()
    }

    /// Launch `start` and tick every `tick_ms` until the input asks to quit.
    ///
    /// Between ticks the loop blocks in `input.poll` for the remaining time.
    pub fn run(
        &mut self,
        start: SceneId,
        input: &mut dyn InputSource,
        renderer: &mut dyn Renderer,
    ) -> Result<()> {
        self.launch(start, renderer)?;

        while !input.quit_requested() {
            let elapsed = self.clock.now_ms().saturating_sub(self.last_tick_ms);
            if elapsed < self.tick_ms {
                input.poll(Duration::from_millis(self.tick_ms - elapsed))?;
                continue;
            }
            self.last_tick_ms = self.clock.now_ms();
            self.tick(input, renderer)?;
        }

        info!("quit requested");
        Ok(())
    }
}
