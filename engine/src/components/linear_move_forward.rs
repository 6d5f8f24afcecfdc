use crate::error::Result;
use crate::scene::{Component, Context};

/// Moves its object along its forward (+Z) axis at a constant speed, in fixed update.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearMoveForward {
    /// Units per second.
    pub speed: f32,
}

impl LinearMoveForward {
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }
}

impl Default for LinearMoveForward {
    fn default() -> Self {
        Self { speed: 1.0 }
    }
}

impl Component for LinearMoveForward {
    fn fixed_update(&mut self, ctx: &mut Context<'_>) -> Result<()> {
        let entity = ctx.entity();
        let step = ctx.world.forward(entity)? * self.speed * ctx.time().fixed_delta_secs();
        let position = ctx.world.local_position(entity)?;
        ctx.world.set_local_position(entity, position + step)
    }
}
