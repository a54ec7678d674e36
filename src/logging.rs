//! Logging setup for the binary.
//!
//! The terminal is in raw alternate-screen mode while the game runs, so log
//! records go to a file named by `SCENE_TETRIS_LOG`. Without it logging stays
//! off. The level comes from `RUST_LOG` and defaults to `info`.

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use env_logger::{Env, Target};

pub const LOG_PATH_ENV: &str = "SCENE_TETRIS_LOG";

/// Install the global logger. Returns the log file path when logging is on.
pub fn init() -> Result<Option<PathBuf>> {
    let Some(path) = std::env::var_os(LOG_PATH_ENV).map(PathBuf::from) else {
        return Ok(None);
    };
    let file = File::create(&path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .init();
    Ok(Some(path))
}
