//! Scene bookkeeping.
//!
//! Scenes are built by named builders registered in a [`SceneCatalog`] (the equivalent of a
//! build list). The [`SceneManager`] tracks which scenes are loaded and which one is active;
//! the world owns the objects and does the actual loading.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::scene::World;

/// Identifier of a loaded scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SceneId(u32);

impl SceneId {
    /// The scene persistent objects live in. Never unloaded.
    pub const PERSISTENT: SceneId = SceneId(0);

    #[inline]
    pub fn is_persistent(&self) -> bool {
        *self == Self::PERSISTENT
    }
}

/// How a scene load treats the scenes already loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadMode {
    /// Unload every non-persistent scene first.
    Single,
    /// Keep the loaded scenes.
    Additive,
}

type SceneBuilder = dyn Fn(&mut World) -> Result<()>;

/// Named scene builders.
#[derive(Clone, Default)]
pub struct SceneCatalog {
    builders: HashMap<String, Arc<SceneBuilder>>,
    order: Vec<String>,
}

impl SceneCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a scene builder. The builder runs with the new scene active, so
    /// objects it spawns land in that scene.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        builder: impl Fn(&mut World) -> Result<()> + 'static,
    ) -> &mut Self {
        let name = name.into();
        if self.builders.insert(name.clone(), Arc::new(builder)).is_none() {
            self.order.push(name);
        }
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.builders.contains_key(name)
    }

    /// Scene names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub(crate) fn builder(&self, name: &str) -> Result<Arc<SceneBuilder>> {
        self.builders
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownScene(name.to_string()))
    }
}

impl fmt::Debug for SceneCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneCatalog")
            .field("scenes", &self.order)
            .finish()
    }
}

/// A loaded scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneInfo {
    pub id: SceneId,
    pub name: String,
}

/// Loaded scenes and the active one.
#[derive(Debug)]
pub(crate) struct SceneManager {
    pub catalog: SceneCatalog,
    loaded: Vec<SceneInfo>,
    active: SceneId,
    next_id: u32,
}

impl SceneManager {
    pub const UNTITLED: &'static str = "Untitled";
    pub const PERSISTENT_NAME: &'static str = "DontDestroyOnLoad";

    pub fn new() -> Self {
        let mut manager = Self {
            catalog: SceneCatalog::new(),
            loaded: vec![SceneInfo {
                id: SceneId::PERSISTENT,
                name: Self::PERSISTENT_NAME.into(),
            }],
            active: SceneId::PERSISTENT,
            next_id: 1,
        };
        manager.active = manager.open(Self::UNTITLED);
        manager
    }

    /// Register a new loaded scene and return its id.
    pub fn open(&mut self, name: &str) -> SceneId {
        let id = SceneId(self.next_id);
        self.next_id += 1;
        self.loaded.push(SceneInfo {
            id,
            name: name.to_string(),
        });
        id
    }

    pub fn close(&mut self, id: SceneId) {
        if id.is_persistent() {
            return;
        }
        self.loaded.retain(|scene| scene.id != id);
        if self.active == id {
            self.active = self
                .loaded
                .iter()
                .rev()
                .find(|scene| !scene.id.is_persistent())
                .map_or(SceneId::PERSISTENT, |scene| scene.id);
        }
    }

    pub fn active(&self) -> SceneId {
        self.active
    }

    pub fn set_active(&mut self, id: SceneId) -> bool {
        if self.is_loaded(id) {
            self.active = id;
            true
        } else {
            false
        }
    }

    pub fn is_loaded(&self, id: SceneId) -> bool {
        self.loaded.iter().any(|scene| scene.id == id)
    }

    pub fn info(&self, id: SceneId) -> Option<&SceneInfo> {
        self.loaded.iter().find(|scene| scene.id == id)
    }

    /// Loaded scenes excluding the persistent one, oldest first.
    pub fn loaded(&self) -> impl Iterator<Item = &SceneInfo> {
        self.loaded.iter().filter(|scene| !scene.id.is_persistent())
    }

    pub fn find(&self, name: &str) -> Option<SceneId> {
        self.loaded()
            .find(|scene| scene.name == name)
            .map(|scene| scene.id)
    }
}
