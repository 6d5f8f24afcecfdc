use serde::{Deserialize, Serialize};

use crate::scene::SceneCatalog;

/// A serializable reference to a scene by name.
///
/// `validate` keeps the name in sync with the catalog: a reference to a scene that is no longer
/// registered is cleared, the same way a deleted scene asset leaves an empty field behind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneReference {
    scene_name: Option<String>,
}

impl SceneReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            scene_name: Some(name.into()),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    /// The referenced scene name. Blank names count as unassigned.
    pub fn scene_name(&self) -> Option<&str> {
        self.scene_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }

    pub fn is_assigned(&self) -> bool {
        self.scene_name().is_some()
    }

    pub fn validate(&mut self, catalog: &SceneCatalog) {
        if let Some(name) = self.scene_name.as_deref() {
            if !catalog.contains(name) {
                log::warn!("scene reference '{name}' no longer exists, clearing it");
                self.scene_name = None;
            }
        }
    }
}

impl From<&str> for SceneReference {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
