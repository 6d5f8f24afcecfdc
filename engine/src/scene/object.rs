use crate::scene::component::Component;
use crate::scene::{Entity, SceneId, Transform};

/// A component slot on an object. `value` is `None` while the component's hook is running or
/// after the component was removed. Slots are never reused, so a `ComponentId` never addresses
/// a later component.
pub(crate) struct ComponentSlot {
    pub value: Option<Box<dyn Component>>,
    pub enabled: bool,
    pub started: bool,
    pub removed: bool,
}

impl ComponentSlot {
    pub fn new(component: Box<dyn Component>) -> Self {
        Self {
            value: Some(component),
            enabled: true,
            started: false,
            removed: false,
        }
    }

    /// Live, enabled and not currently borrowed by a running hook.
    pub fn is_runnable(&self) -> bool {
        self.enabled && !self.removed && self.value.is_some()
    }
}

/// A node of the scene graph.
pub(crate) struct Object {
    pub name: String,
    pub transform: Transform,
    pub parent: Option<Entity>,
    pub children: Vec<Entity>,
    pub scene: SceneId,
    pub active: bool,
    pub components: Vec<ComponentSlot>,
}

impl Object {
    pub fn new(name: String, scene: SceneId) -> Self {
        Self {
            name,
            transform: Transform::default(),
            parent: None,
            children: Vec::new(),
            scene,
            active: true,
            components: Vec::new(),
        }
    }
}
