//! Components and their lifecycle hooks.
//!
//! Every behaviour attached to an object implements [`Component`]. The world drives the hooks in
//! this order while playing:
//!
//! ```text
//! add_component ─► awake
//! first frame   ─► start
//! every frame   ─► fixed_update (0..n times) ─► update
//! destruction   ─► on_destroy
//! quit          ─► on_application_quit
//! ```
//!
//! Hooks receive a [`Context`] carrying the world and the id of the running component. While a
//! hook runs, its component is taken out of the world, so it cannot be looked up through the
//! context; everything else can.
//!
//! Plain data components use `#[derive(Component)]`, which keeps every hook at its default.

use std::any::Any;

use crate::core::time::Time;
use crate::error::Result;
use crate::scene::{Entity, World};

/// Upcast helper, implemented for every `'static` type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A behaviour or data block attached to a scene object.
pub trait Component: AsAny {
    /// Called once when the component is added while playing.
    fn awake(&mut self, _ctx: &mut Context<'_>) -> Result<()> {
        Ok(())
    }

    /// Called once before the component's first update.
    fn start(&mut self, _ctx: &mut Context<'_>) -> Result<()> {
        Ok(())
    }

    /// Called once per fixed time step.
    fn fixed_update(&mut self, _ctx: &mut Context<'_>) -> Result<()> {
        Ok(())
    }

    /// Called once per frame.
    fn update(&mut self, _ctx: &mut Context<'_>) -> Result<()> {
        Ok(())
    }

    /// Called when the component's object is destroyed.
    fn on_destroy(&mut self, _ctx: &mut Context<'_>) -> Result<()> {
        Ok(())
    }

    /// Called once when the application starts shutting down.
    fn on_application_quit(&mut self, _ctx: &mut Context<'_>) -> Result<()> {
        Ok(())
    }

    /// Components that react to being hit return themselves here.
    fn impact_responder(&mut self) -> Option<&mut dyn ImpactResponder> {
        None
    }
}

/// Reacts to a [`DestroyOnCollision`](crate::components::DestroyOnCollision) overlap.
pub trait ImpactResponder {
    /// `source` is the object whose collision check hit this one.
    fn impact(&mut self, ctx: &mut Context<'_>, source: Entity) -> Result<()>;
}

/// Address of a component: its object and its slot on that object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId {
    pub entity: Entity,
    pub index: usize,
}

/// What a lifecycle hook can reach.
pub struct Context<'w> {
    pub world: &'w mut World,
    id: ComponentId,
}

impl<'w> Context<'w> {
    pub(crate) fn new(world: &'w mut World, id: ComponentId) -> Self {
        Self { world, id }
    }

    /// The object the running component is attached to.
    #[inline]
    pub fn entity(&self) -> Entity {
        self.id.entity
    }

    #[inline]
    pub fn id(&self) -> ComponentId {
        self.id
    }

    #[inline]
    pub fn time(&self) -> &Time {
        self.world.time()
    }

    /// Remove the running component once its hook returns.
    pub fn remove_self(&mut self) {
        self.world.remove_component(self.id);
    }
}
