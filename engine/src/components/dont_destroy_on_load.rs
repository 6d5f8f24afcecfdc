use crate::error::Result;
use crate::scene::{Component, Context, Entity, World};

/// Makes its object persistent on start, then removes itself.
#[derive(Debug, Default, Clone)]
pub struct DontDestroyOnLoad;

impl DontDestroyOnLoad {
    /// Make `entity` persistent right away. Detaches it from its parent first.
    pub fn apply(world: &mut World, entity: Entity) -> Result<()> {
        world.make_persistent(entity)
    }
}

impl Component for DontDestroyOnLoad {
    fn start(&mut self, ctx: &mut Context<'_>) -> Result<()> {
        Self::apply(ctx.world, ctx.entity())?;
        ctx.remove_self();
        Ok(())
    }
}
