//! Reusable object blueprints.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::scene::{Entity, World};

type Build = dyn Fn(&mut World, Entity) -> Result<()>;

/// A named recipe that fills a freshly spawned object with components and children.
///
/// ```rust,ignore
/// let explosion = Prefab::new("Explosion", |world, entity| {
///     world.add_component(entity, Lifetime::seconds(1.5))?;
///     Ok(())
/// });
/// world.instantiate(&explosion, position, rotation, None)?;
/// ```
#[derive(Clone)]
pub struct Prefab {
    name: String,
    build: Arc<Build>,
}

impl Prefab {
    pub fn new(
        name: impl Into<String>,
        build: impl Fn(&mut World, Entity) -> Result<()> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            build: Arc::new(build),
        }
    }

    /// A prefab that produces an empty object.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, |_, _| Ok(()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn build(&self, world: &mut World, entity: Entity) -> Result<()> {
        (self.build)(world, entity)
    }
}

impl fmt::Debug for Prefab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prefab").field("name", &self.name).finish()
    }
}
