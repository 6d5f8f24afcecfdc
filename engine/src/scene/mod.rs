//! Minimal scene host: objects with transforms and components, grouped into scenes.
//!
//! Everything is owned by a [`World`]. Objects are addressed with generational [`Entity`]
//! handles; a handle to a destroyed object never aliases a new one.

mod auto_load;
mod component;
mod entity;
mod object;
mod prefab;
mod reference;
mod scenes;
mod transform;
mod world;

pub use auto_load::AutoLoadScenes;
pub use component::{AsAny, Component, ComponentId, Context, ImpactResponder};
pub use entity::{Allocator, Entity, Generation, Id};
pub use prefab::Prefab;
pub use reference::SceneReference;
pub use scenes::{LoadMode, SceneCatalog, SceneId, SceneInfo};
pub use transform::Transform;
pub use world::{Mode, World};
