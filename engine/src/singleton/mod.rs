//! Guarded singletons.
//!
//! A singleton is a type with at most one live instance, reachable from anywhere that can reach
//! the [`World`], persisting across scene loads, and released only while the application shuts
//! down. There are two ways to get one:
//!
//! 1. **Explicit**: a component constructs the instance during `awake` and registers it with
//!    [`World::bind_singleton`], passing its own object as the host.
//! 2. **Auto-create**: the first [`World::singleton`] call for a type spawns a host object named
//!    `"<Type> (Auto-Created)"` and builds the instance through [`Singleton::create`].
//!
//! Either way the host object is made persistent. Destroying it (or calling
//! [`World::teardown_singleton`]) before [`World::notify_shutdown`] fails with
//! [`Error::PrematureTeardown`](crate::Error::PrematureTeardown), which the engine treats as
//! fatal.
//!
//! # Example
//!
//! ```rust,ignore
//! use rusty_scene::Singleton;
//!
//! #[derive(Default, Singleton)]
//! struct Highscores(Vec<u32>);
//!
//! world.singleton::<Highscores>()?.0.push(1200);
//! ```
//!
//! [`World`]: crate::scene::World
//! [`World::bind_singleton`]: crate::scene::World::bind_singleton
//! [`World::singleton`]: crate::scene::World::singleton
//! [`World::teardown_singleton`]: crate::scene::World::teardown_singleton
//! [`World::notify_shutdown`]: crate::scene::World::notify_shutdown

mod registry;
mod shared;
mod slot;

pub use registry::Singletons;
pub use shared::SharedSingletons;
pub use slot::{ManagedSingleton, State};

use crate::error::Result;
use crate::scene::{Entity, World};

/// A type managed as a world singleton.
///
/// `create` is the on-demand construction strategy. It runs with the slot already reserved, so
/// code it triggers (component `awake` hooks on the host, for instance) observes the singleton
/// as assigned. Asking the world for the same singleton from inside `create` fails with
/// [`Error::SingletonUnderConstruction`](crate::Error::SingletonUnderConstruction).
///
/// `#[derive(Singleton)]` implements this through `Default`.
pub trait Singleton: 'static + Sized {
    fn create(world: &mut World, host: Entity) -> Result<Self>;
}
