use crate::error::{Error, Result};
use crate::physics::{QueryTriggerInteraction, SphereCollider, overlap_sphere};
use crate::scene::{Component, Context, Entity, Prefab};

/// Destroys an object as soon as the [`SphereCollider`] on the same object overlaps another
/// collider. Requires a `SphereCollider`.
///
/// Every hit object's first [`ImpactResponder`](crate::scene::ImpactResponder) is notified with
/// this object as the source before anything is destroyed.
#[derive(Debug, Default)]
pub struct DestroyOnCollision {
    /// Object to destroy on collision. `None` destroys the object this component is attached to.
    pub object_to_destroy: Option<Entity>,
    /// Prefab instantiated where the destroyed object was.
    pub spawn_in_place: Option<Prefab>,
    pub collides_with_triggers: bool,
}

impl DestroyOnCollision {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn destroying(mut self, target: Entity) -> Self {
        self.object_to_destroy = Some(target);
        self
    }

    pub fn spawning(mut self, prefab: Prefab) -> Self {
        self.spawn_in_place = Some(prefab);
        self
    }

    pub fn with_triggers(mut self, collides_with_triggers: bool) -> Self {
        self.collides_with_triggers = collides_with_triggers;
        self
    }

    fn missing_collider() -> Error {
        Error::MissingComponent {
            required: "DestroyOnCollision",
            missing: "SphereCollider",
        }
    }

    fn destroy_target(&self, ctx: &mut Context<'_>) -> Result<()> {
        let target = self
            .object_to_destroy
            .filter(|target| ctx.world.is_alive(*target))
            .unwrap_or(ctx.entity());
        if ctx.world.is_pending_destroy(target) {
            return Ok(());
        }

        if let Some(prefab) = &self.spawn_in_place {
            let position = ctx.world.world_position(target)?;
            let rotation = ctx.world.world_rotation(target)?;
            let parent = ctx.world.parent(target);
            ctx.world.instantiate(prefab, position, rotation, parent)?;
        }
        ctx.world.destroy(target)
    }
}

impl Component for DestroyOnCollision {
    fn awake(&mut self, ctx: &mut Context<'_>) -> Result<()> {
        if !ctx.world.has_component::<SphereCollider>(ctx.entity()) {
            return Err(Self::missing_collider());
        }
        Ok(())
    }

    fn fixed_update(&mut self, ctx: &mut Context<'_>) -> Result<()> {
        let this = ctx.entity();
        let collider = ctx
            .world
            .get_component::<SphereCollider>(this)
            .cloned()
            .ok_or_else(Self::missing_collider)?;

        let center = ctx.world.world_position(this)? + collider.center;
        let hits: Vec<Entity> = overlap_sphere(
            ctx.world,
            center,
            collider.radius,
            collider.include_layers,
            QueryTriggerInteraction::from_collides(self.collides_with_triggers),
        )
        .into_iter()
        .filter(|hit| *hit != this)
        .collect();

        if hits.is_empty() {
            return Ok(());
        }
        for hit in &hits {
            ctx.world.send_impact(*hit, this)?;
        }
        log::debug!("'{}' collided with {} object(s)", ctx.world.name(this).unwrap_or_default(), hits.len());
        self.destroy_target(ctx)
    }
}
