//! Scene stack and its lifecycle primitives.
//!
//! The director owns a LIFO stack of scenes. Index 0 is the bottom (oldest)
//! scene; the last entry is the active leaf that receives input.
//!
//! # Continuation styles
//!
//! | Primitive | Stack effect | Hooks |
//! |-----------|--------------|-------|
//! | `run_scene` | dispose all, push new | `dispose`* then `initialize` + `begin` |
//! | `push_scene` | push new over a paused parent | `initialize` + `begin` |
//! | `replace_scene` | pop top, push new | `dispose` then `initialize` + `begin` |
//! | `return_scene` | pop top, resume parent | `dispose` then parent `begin` |

use anyhow::Result;
use log::debug;
use thiserror::Error;

use crate::key_state::KeyState;
use crate::registry::SceneRegistry;
use crate::render::Renderer;
use crate::scene::{Scene, SceneContext, SceneId, SceneTransition};
use crate::types::Key;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectorError {
    /// The operation would leave no active scene.
    #[error("scene stack would become empty")]
    EmptyStack,
    #[error("no scene registered for {0}")]
    UnknownScene(SceneId),
}

/// A transition asked for during [`Director::update`], tagged with the
/// stack index of the scene that asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneRequest {
    pub depth: usize,
    pub transition: SceneTransition,
}

/// A stacked scene together with the key state it owns.
struct Slot {
    scene: Box<dyn Scene>,
    keys: KeyState,
}

#[derive(Default)]
pub struct Director {
    stack: Vec<Slot>,
}

impl Director {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispose every stacked scene (top first) and start `scene` alone.
    pub fn run_scene(&mut self, scene: Box<dyn Scene>) {
        while let Some(mut slot) = self.stack.pop() {
            debug!("dispose {}", slot.scene.name());
            slot.scene.dispose();
        }
        self.push_scene(scene);
    }

    /// Push `scene` and run its `initialize` and `begin` hooks.
    pub fn push_scene(&mut self, scene: Box<dyn Scene>) {
        debug!("push {}", scene.name());
        self.stack.push(Slot {
            scene,
            keys: KeyState::new(),
        });
        if let Some(slot) = self.stack.last_mut() {
            slot.scene.initialize();
            slot.scene.begin();
        }
    }

    /// Dispose the top scene and push `scene` in its place.
    pub fn replace_scene(&mut self, scene: Box<dyn Scene>) -> Result<(), DirectorError> {
        let mut top = self.stack.pop().ok_or(DirectorError::EmptyStack)?;
        debug!("dispose {}", top.scene.name());
        top.scene.dispose();
        self.push_scene(scene);
        Ok(())
    }

    /// Dispose the top scene and resume its parent.
    ///
    /// Fails without touching the stack when the top is the only scene.
    pub fn return_scene(&mut self) -> Result<(), DirectorError> {
        if self.stack.len() < 2 {
            return Err(DirectorError::EmptyStack);
        }
        if let Some(mut top) = self.stack.pop() {
            debug!("dispose {}", top.scene.name());
            top.scene.dispose();
        }
        if let Some(parent) = self.stack.last_mut() {
            debug!("resume {}", parent.scene.name());
            parent.scene.begin();
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Scene at `index`, counted from the bottom.
    pub fn at(&self, index: usize) -> Option<&dyn Scene> {
        self.stack.get(index).map(|slot| slot.scene.as_ref())
    }

    /// Run one update pass bottom-to-top and collect the requested transitions.
    ///
    /// Every scene sees `pressed`/`released` through its own key state for
    /// the duration of its update only. Requests come back in stack order;
    /// hand them to [`Director::apply_requests`].
    pub fn update(&mut self, pressed: Option<Key>, released: Option<Key>) -> Vec<SceneRequest> {
        let last = self.stack.len().saturating_sub(1);
        let mut requests = Vec::new();

        for (depth, slot) in self.stack.iter_mut().enumerate() {
            slot.keys.update(pressed, released);
            let transition = slot.scene.update(&slot.keys, depth < last);
            slot.keys.clear();

            if transition != SceneTransition::None {
                requests.push(SceneRequest { depth, transition });
            }
        }

        requests
    }

    /// Draw every scene bottom-to-top so parents stay visible under sub-scenes.
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        let last = self.stack.len().saturating_sub(1);
        for (i, slot) in self.stack.iter().enumerate() {
            slot.scene.draw(renderer, i < last);
        }
    }

    /// Apply the requests of one update pass in order.
    ///
    /// `Call` and `Return` act on whatever is on top when they are applied.
    /// A request is dropped once an earlier request in the same batch has
    /// disposed the scene that made it.
    pub fn apply_requests(
        &mut self,
        requests: Vec<SceneRequest>,
        registry: &SceneRegistry,
        ctx: &mut SceneContext<'_>,
    ) -> Result<()> {
        // Slots below this index still hold the scenes that were updated
        let mut intact = self.stack.len();

        for request in requests {
            if request.depth >= intact {
                debug!(
                    "drop {:?} from disposed scene at depth {}",
                    request.transition, request.depth
                );
                continue;
            }

            let top = self.stack.len().saturating_sub(1);
            match request.transition {
                SceneTransition::Jump(_) => intact = 0,
                SceneTransition::Call(_) | SceneTransition::Return => intact = intact.min(top),
                SceneTransition::CallSub(_) | SceneTransition::None => {}
            }
            debug!("apply {:?} from depth {}", request.transition, request.depth);
            self.apply(request.transition, registry, ctx)?;
        }
        Ok(())
    }

    /// Carry out a transition, building new scenes through `registry`.
    pub fn apply(
        &mut self,
        transition: SceneTransition,
        registry: &SceneRegistry,
        ctx: &mut SceneContext<'_>,
    ) -> Result<()> {
        match transition {
            SceneTransition::None => {}
            SceneTransition::Jump(id) => {
                let scene = registry.create(id, ctx)?;
                self.run_scene(scene);
            }
            SceneTransition::CallSub(id) => {
                let scene = registry.create(id, ctx)?;
                self.push_scene(scene);
            }
            SceneTransition::Call(id) => {
                let scene = registry.create(id, ctx)?;
                self.replace_scene(scene)?;
            }
            SceneTransition::Return => self.return_scene()?,
        }
        Ok(())
    }
}
