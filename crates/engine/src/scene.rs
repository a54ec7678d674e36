//! Scene trait and the transition requests scenes hand back to the director.

use std::fmt;
use std::rc::Rc;

use crate::audio::AudioLoader;
use crate::clock::Clock;
use crate::key_state::KeyState;
use crate::render::{AssetLoader, Renderer};
use crate::types::DisplaySize;

/// Identifier a scene is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneId(pub u16);

impl SceneId {
    /// Scene the engine launches with.
    pub const START: SceneId = SceneId(1);
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scene#{}", self.0)
    }
}

/// What a scene asks the director to do after its update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SceneTransition {
    #[default]
    None,
    /// Dispose every stacked scene and start `SceneId` alone.
    Jump(SceneId),
    /// Push `SceneId` over the current scene, keeping it as a paused parent.
    CallSub(SceneId),
    /// Swap the current scene for `SceneId`.
    Call(SceneId),
    /// Dispose the current scene and resume its parent.
    Return,
}

/// Capabilities handed to scene constructors.
pub struct SceneContext<'a> {
    pub display: DisplaySize,
    pub assets: &'a mut dyn AssetLoader,
    pub audio: &'a mut dyn AudioLoader,
    pub clock: Rc<dyn Clock>,
}

/// Lifecycle hooks driven by the director. Every hook has a no-op default.
///
/// `is_parent_of_active_sub` is true when a sub-scene is stacked above this
/// one: the scene is still updated and drawn, but it is not the active leaf.
pub trait Scene {
    /// Called once, right after the scene is pushed.
    fn initialize(&mut self) {}

    /// Called on push and again whenever a sub-scene above returns.
    fn begin(&mut self) {}

    fn update(&mut self, _keys: &KeyState, _is_parent_of_active_sub: bool) -> SceneTransition {
        SceneTransition::None
    }

    fn draw(&self, _renderer: &mut dyn Renderer, _is_parent_of_active_sub: bool) {}

    /// Called once, when the scene leaves the stack.
    fn dispose(&mut self) {}

    fn name(&self) -> &str {
        "scene"
    }
}
