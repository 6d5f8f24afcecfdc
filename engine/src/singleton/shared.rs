//! Thread-safe singleton registry for hosts that drive singletons from several threads.
//!
//! The check-then-set sequence runs under the `DashMap` shard lock for the type's key. The
//! constructor itself runs outside the lock after the key has been reserved, so a constructor
//! that touches other singletons in the same shard cannot deadlock. Threads that find a
//! reservation held by another thread back off until it resolves; the reserving thread itself
//! gets [`Error::SingletonUnderConstruction`].

use std::{
    any::{Any, TypeId, type_name},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, ThreadId},
};

use crossbeam::utils::Backoff;
use dashmap::{DashMap, mapref::entry::Entry};

use crate::error::{Error, Result};

type Instance = Arc<dyn Any + Send + Sync>;

enum SharedSlot {
    Constructing(ThreadId),
    Bound(Instance),
}

/// Releases a reservation unless construction completed, including when the constructor panics.
struct Reservation<'a> {
    slots: &'a DashMap<TypeId, SharedSlot>,
    key: TypeId,
    armed: bool,
}

impl Drop for Reservation<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.slots.remove(&self.key);
        }
    }
}

/// A registry of `Arc`-shared singletons, safe to use from any thread.
#[derive(Default)]
pub struct SharedSingletons {
    slots: DashMap<TypeId, SharedSlot>,
    shutting_down: AtomicBool,
}

impl SharedSingletons {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_assigned<T: Send + Sync + 'static>(&self) -> bool {
        self.slots.contains_key(&TypeId::of::<T>())
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::Acquire)
    }

    /// The bound instance, if construction has completed.
    pub fn get<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        match self.slots.get(&TypeId::of::<T>()).as_deref() {
            Some(SharedSlot::Bound(instance)) => Arc::clone(instance).downcast::<T>().ok(),
            _ => None,
        }
    }

    /// Return the instance of `T`, constructing it with `create` if nothing is bound. Exactly one
    /// caller runs `create`; errors from it are returned unmodified and release the reservation.
    pub fn get_or_try_init<T, E>(
        &self,
        create: impl FnOnce() -> std::result::Result<T, E>,
    ) -> std::result::Result<Arc<T>, E>
    where
        T: Send + Sync + 'static,
        E: From<Error>,
    {
        let key = TypeId::of::<T>();
        let me = thread::current().id();
        let backoff = Backoff::new();

        loop {
            match self.slots.entry(key) {
                Entry::Vacant(vacant) => {
                    vacant.insert(SharedSlot::Constructing(me));
                    break;
                }
                Entry::Occupied(occupied) => match occupied.get() {
                    SharedSlot::Bound(instance) => return Ok(downcast::<T>(instance)?),
                    SharedSlot::Constructing(owner) if *owner == me => {
                        return Err(E::from(Error::SingletonUnderConstruction {
                            type_name: type_name::<T>(),
                        }));
                    }
                    SharedSlot::Constructing(_) => {}
                },
            }
            backoff.snooze();
        }

        let mut reservation = Reservation {
            slots: &self.slots,
            key,
            armed: true,
        };
        let instance = Arc::new(create()?);
        self.slots
            .insert(key, SharedSlot::Bound(Arc::clone(&instance) as Instance));
        reservation.armed = false;
        log::debug!("constructed shared singleton {}", type_name::<T>());
        Ok(instance)
    }

    /// Bind a caller-constructed instance.
    pub fn bind<T: Send + Sync + 'static>(&self, instance: T) -> Result<Arc<T>> {
        match self.slots.entry(TypeId::of::<T>()) {
            Entry::Occupied(_) => Err(Error::AlreadyBound {
                type_name: type_name::<T>(),
            }),
            Entry::Vacant(vacant) => {
                let instance = Arc::new(instance);
                vacant.insert(SharedSlot::Bound(Arc::clone(&instance) as Instance));
                Ok(instance)
            }
        }
    }

    /// Observe the application shutdown signal for every slot.
    pub fn notify_shutdown(&self) {
        self.shutting_down.store(true, Ordering::Release);
    }

    /// Release the instance of `T`. Outstanding `Arc`s stay valid; the registry just stops
    /// handing the instance out.
    pub fn teardown<T: Send + Sync + 'static>(&self) -> Result<Option<Arc<T>>> {
        if !self.is_shutting_down() {
            return Err(Error::PrematureTeardown {
                type_name: type_name::<T>(),
            });
        }
        match self.slots.remove(&TypeId::of::<T>()) {
            Some((_, SharedSlot::Bound(instance))) => Ok(Some(downcast::<T>(&instance)?)),
            _ => Ok(None),
        }
    }

    /// Release everything and start a new lifecycle. Only legal in the shutdown window.
    pub fn clear(&self) -> Result<()> {
        if !self.is_shutting_down() {
            return Err(Error::PrematureTeardown {
                type_name: "SharedSingletons",
            });
        }
        self.slots.clear();
        self.shutting_down.store(false, Ordering::Release);
        Ok(())
    }
}

fn downcast<T: Send + Sync + 'static>(instance: &Instance) -> Result<Arc<T>> {
    Arc::clone(instance)
        .downcast::<T>()
        .map_err(|_| Error::InvalidArgument(format!("slot does not hold a {}", type_name::<T>())))
}
