//! Type-erased storage for the singletons of one [`World`](crate::scene::World).
//!
//! [`Singletons`] keeps one [`ManagedSingleton`] per type, keyed by [`TypeId`], together with
//! the entity hosting the instance. The world uses the host to refuse destruction of singleton
//! objects outside the shutdown window.

use std::{
    any::{Any, TypeId, type_name},
    collections::HashMap,
};

use crate::error::{Error, Result};
use crate::scene::Entity;
use crate::singleton::slot::{ManagedSingleton, State};

/// A slot plus the object its instance lives on.
struct Hosted<T> {
    slot: ManagedSingleton<T>,
    host: Option<Entity>,
}

/// Object-safe view of a `Hosted<T>`.
trait ErasedSlot: Any {
    fn type_name(&self) -> &'static str;
    fn host(&self) -> Option<Entity>;
    fn is_assigned(&self) -> bool;
    fn is_shutting_down(&self) -> bool;
    fn notify_shutdown(&mut self);
    fn teardown(&mut self) -> Result<()>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: 'static> ErasedSlot for Hosted<T> {
    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn host(&self) -> Option<Entity> {
        self.host
    }

    fn is_assigned(&self) -> bool {
        self.slot.is_assigned()
    }

    fn is_shutting_down(&self) -> bool {
        self.slot.is_shutting_down()
    }

    fn notify_shutdown(&mut self) {
        self.slot.notify_shutdown();
    }

    fn teardown(&mut self) -> Result<()> {
        self.slot.teardown()?;
        self.host = None;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Per-world singleton registry.
///
/// Once the registry has seen the shutdown signal, every slot it hands out is in its shutdown
/// window, including slots for types first reached during shutdown.
pub struct Singletons {
    slots: HashMap<TypeId, Box<dyn ErasedSlot>>,
    shutting_down: bool,
}

impl Singletons {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            shutting_down: false,
        }
    }

    fn hosted<T: 'static>(&self) -> Option<&Hosted<T>> {
        self.slots
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.as_any().downcast_ref::<Hosted<T>>())
    }

    fn hosted_mut<T: 'static>(&mut self) -> &mut Hosted<T> {
        let shutting_down = self.shutting_down;
        let hosted = self
            .slots
            .entry(TypeId::of::<T>())
            .or_insert_with(|| {
                Box::new(Hosted::<T> {
                    slot: ManagedSingleton::new(),
                    host: None,
                })
            })
            .as_any_mut()
            .downcast_mut::<Hosted<T>>()
            .expect("singleton slot stored under the TypeId of another type");
        if shutting_down {
            hosted.slot.notify_shutdown();
        }
        hosted
    }

    /// Bound or reserved for construction.
    pub fn is_assigned<T: 'static>(&self) -> bool {
        self.hosted::<T>().is_some_and(|h| h.slot.is_assigned())
    }

    pub fn state<T: 'static>(&self) -> State {
        self.hosted::<T>()
            .map_or(State::Unbound, |h| h.slot.state())
    }

    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.hosted::<T>().and_then(|h| h.slot.get())
    }

    pub fn get_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.slots
            .get_mut(&TypeId::of::<T>())
            .and_then(|slot| slot.as_any_mut().downcast_mut::<Hosted<T>>())
            .and_then(|h| h.slot.get_mut())
    }

    /// The object hosting the instance of `T`.
    pub fn host<T: 'static>(&self) -> Option<Entity> {
        self.hosted::<T>().and_then(|h| h.host)
    }

    pub fn is_shutting_down<T: 'static>(&self) -> bool {
        self.hosted::<T>().is_some_and(|h| h.slot.is_shutting_down())
    }

    /// Number of assigned singletons.
    pub fn len(&self) -> usize {
        self.slots.values().filter(|s| s.is_assigned()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn reserve<T: 'static>(&mut self, host: Entity) -> Result<()> {
        let hosted = self.hosted_mut::<T>();
        hosted.slot.reserve()?;
        hosted.host = Some(host);
        Ok(())
    }

    pub(crate) fn complete<T: 'static>(&mut self, instance: T) -> &mut T {
        self.hosted_mut::<T>().slot.complete(instance)
    }

    pub(crate) fn cancel<T: 'static>(&mut self) {
        let hosted = self.hosted_mut::<T>();
        hosted.slot.cancel();
        if !hosted.slot.is_assigned() {
            hosted.host = None;
        }
    }

    pub(crate) fn bind<T: 'static>(&mut self, host: Entity, instance: T) -> Result<&mut T> {
        let hosted = self.hosted_mut::<T>();
        if hosted.slot.is_assigned() {
            return Err(Error::AlreadyBound {
                type_name: type_name::<T>(),
            });
        }
        hosted.host = Some(host);
        hosted.slot.bind(instance)
    }

    /// Mark every slot, present and future, as shutting down.
    pub fn notify_shutdown(&mut self) {
        self.shutting_down = true;
        for slot in self.slots.values_mut() {
            slot.notify_shutdown();
        }
    }

    /// Release the instance of `T` together with the entity that hosted it.
    pub(crate) fn teardown<T: 'static>(&mut self) -> Result<(Option<T>, Option<Entity>)> {
        let hosted = self.hosted_mut::<T>();
        let instance = hosted.slot.teardown()?;
        Ok((instance, hosted.host.take()))
    }

    /// Fail if any of `entities` hosts a singleton that is not yet in its shutdown window.
    pub(crate) fn check_release(&self, entities: &[Entity]) -> Result<()> {
        for slot in self.slots.values() {
            let hosted_here = slot.host().is_some_and(|host| entities.contains(&host));
            if hosted_here && slot.is_assigned() && !slot.is_shutting_down() {
                return Err(Error::PrematureTeardown {
                    type_name: slot.type_name(),
                });
            }
        }
        Ok(())
    }

    /// Tear down every singleton hosted by `entity`. Callers run [`check_release`] first.
    pub(crate) fn release_hosted(&mut self, entity: Entity) -> Result<()> {
        for slot in self.slots.values_mut() {
            if slot.host() == Some(entity) && slot.is_assigned() {
                log::debug!("releasing singleton {}", slot.type_name());
                slot.teardown()?;
            }
        }
        Ok(())
    }
}

impl Default for Singletons {
    fn default() -> Self {
        Self::new()
    }
}
