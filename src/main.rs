//! Terminal runner (default binary).
//!
//! Reads `conf/system.json`, enters raw mode on the alternate screen and runs
//! the scene engine until `q`, `Esc` or Ctrl-C.

use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use log::info;

use scene_tetris::audio;
use scene_tetris::core::register_scenes;
use scene_tetris::engine::clock::SystemClock;
use scene_tetris::engine::config::SystemConfig;
use scene_tetris::engine::{Engine, SceneId, SceneRegistry};
use scene_tetris::input::TerminalInput;
use scene_tetris::logging;
use scene_tetris::term::{SpriteRenderer, TerminalRenderer};

fn main() -> Result<()> {
    if let Some(path) = logging::init()? {
        info!("logging to {}", path.display());
    }

    let config = SystemConfig::from_env().context("failed to load system configuration")?;
    info!(
        "config: title={:?} display={}x{}",
        config.title, config.width, config.height
    );

    let mut registry = SceneRegistry::new();
    register_scenes(&mut registry, block_seed());

    let display = config.display();
    let mut engine = Engine::new(
        display,
        registry,
        Rc::new(SystemClock::new()),
        audio::default_backend(),
    );

    let mut term = TerminalRenderer::new();
    term.enter(&config.title)?;
    let mut renderer = SpriteRenderer::with_terminal(display, term);
    let mut input = TerminalInput::new();

    let result = engine.run(SceneId::START, &mut input, &mut renderer);

    // Always try to restore terminal state.
    if let Some(term) = renderer.terminal_mut() {
        let _ = term.exit();
    }
    result
}

fn block_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
