use std::collections::HashMap;

use anyhow::Result;

use crate::director::DirectorError;
use crate::scene::{Scene, SceneContext, SceneId};

type SceneFactory = Box<dyn Fn(&mut SceneContext<'_>) -> Result<Box<dyn Scene>>>;

/// Capability table mapping scene ids to constructors.
#[derive(Default)]
pub struct SceneRegistry {
    factories: HashMap<SceneId, SceneFactory>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the constructor for `id`.
    pub fn register<F>(&mut self, id: SceneId, factory: F) -> &mut Self
    where
        F: Fn(&mut SceneContext<'_>) -> Result<Box<dyn Scene>> + 'static,
    {
        self.factories.insert(id, Box::new(factory));
        self
    }

    pub fn with<F>(mut self, id: SceneId, factory: F) -> Self
    where
        F: Fn(&mut SceneContext<'_>) -> Result<Box<dyn Scene>> + 'static,
    {
        self.register(id, factory);
        self
    }

    pub fn contains(&self, id: SceneId) -> bool {
        self.factories.contains_key(&id)
    }

    pub fn create(&self, id: SceneId, ctx: &mut SceneContext<'_>) -> Result<Box<dyn Scene>> {
        let factory = self
            .factories
            .get(&id)
            .ok_or(DirectorError::UnknownScene(id))?;
        factory(ctx)
    }
}
