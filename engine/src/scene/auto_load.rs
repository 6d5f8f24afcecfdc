//! Scenes loaded additively every time the game boots.

use crate::scene::{SceneCatalog, SceneReference};

/// Ordered list of scenes the world loads additively at boot, before the first scene's
/// components wake up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoLoadScenes {
    additive_scenes: Vec<SceneReference>,
}

impl AutoLoadScenes {
    pub fn new(scenes: impl IntoIterator<Item = SceneReference>) -> Self {
        let mut list = Self {
            additive_scenes: scenes.into_iter().collect(),
        };
        list.dedup();
        list
    }

    pub fn from_names<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Self {
        Self::new(names.into_iter().map(|n| SceneReference::new(n.as_ref())))
    }

    pub fn additive_scenes(&self) -> &[SceneReference] {
        &self.additive_scenes
    }

    pub fn add_scene(&mut self, scene: impl Into<SceneReference>) {
        self.additive_scenes.push(scene.into());
        self.dedup();
    }

    /// Refresh every reference against the catalog, then keep only named, unique entries in
    /// their original order.
    pub fn validate(&mut self, catalog: &SceneCatalog) {
        for scene in &mut self.additive_scenes {
            scene.validate(catalog);
        }
        self.dedup();
    }

    fn dedup(&mut self) {
        let mut unique: Vec<SceneReference> = Vec::with_capacity(self.additive_scenes.len());
        for scene in self.additive_scenes.drain(..) {
            if scene.is_assigned() && !unique.contains(&scene) {
                unique.push(scene);
            }
        }
        self.additive_scenes = unique;
    }
}
