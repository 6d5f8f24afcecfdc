//! The guarded slot behind every singleton.
//!
//! [`ManagedSingleton`] owns at most one `T` and enforces the lifecycle
//!
//! ```text
//! Unbound ──bind / reserve+complete──► Bound ──notify_shutdown──► ShuttingDown ──teardown──► Unbound
//! ```
//!
//! `teardown` outside the shutdown window is [`Error::PrematureTeardown`] and leaves the instance
//! where it is. On-demand construction reserves the slot before the constructor runs, so anything
//! the constructor does that asks "is the slot assigned?" already sees `true`.

use std::any::type_name;

use crate::error::{Error, Result};

/// Observable lifecycle state of a [`ManagedSingleton`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// No instance, nothing reserved.
    Unbound,
    /// Reserved for on-demand construction, instance not yet available.
    Constructing,
    /// Instance bound.
    Bound,
    /// Instance bound and the shutdown signal observed; teardown is legal.
    ShuttingDown,
}

#[derive(Debug)]
enum Slot<T> {
    Unbound,
    Reserved,
    Bound(T),
}

/// A slot holding at most one instance of `T`.
#[derive(Debug)]
pub struct ManagedSingleton<T> {
    slot: Slot<T>,
    shutting_down: bool,
}

impl<T> ManagedSingleton<T> {
    pub const fn new() -> Self {
        Self {
            slot: Slot::Unbound,
            shutting_down: false,
        }
    }

    /// True once an instance is bound or its construction has been reserved.
    #[inline]
    pub fn is_assigned(&self) -> bool {
        !matches!(self.slot, Slot::Unbound)
    }

    #[inline]
    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down
    }

    pub fn state(&self) -> State {
        match (&self.slot, self.shutting_down) {
            (Slot::Unbound, _) => State::Unbound,
            (Slot::Reserved, _) => State::Constructing,
            (Slot::Bound(_), false) => State::Bound,
            (Slot::Bound(_), true) => State::ShuttingDown,
        }
    }

    pub fn get(&self) -> Option<&T> {
        match &self.slot {
            Slot::Bound(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        match &mut self.slot {
            Slot::Bound(instance) => Some(instance),
            _ => None,
        }
    }

    /// Return the bound instance, constructing it with `create` on first access.
    ///
    /// Errors from `create` are returned unmodified and leave the slot unbound.
    pub fn get_or_try_init<E>(
        &mut self,
        create: impl FnOnce() -> std::result::Result<T, E>,
    ) -> std::result::Result<&mut T, E>
    where
        E: From<Error>,
    {
        if !self.is_assigned() {
            self.reserve()?;
            match create() {
                Ok(instance) => return Ok(self.complete(instance)),
                Err(err) => {
                    self.cancel();
                    return Err(err);
                }
            }
        }
        if matches!(self.slot, Slot::Reserved) {
            return Err(E::from(self.under_construction()));
        }
        Ok(self.bind_reserved())
    }

    /// Bind an instance constructed by the caller.
    pub fn bind(&mut self, instance: T) -> Result<&mut T> {
        if self.is_assigned() {
            return Err(Error::AlreadyBound {
                type_name: type_name::<T>(),
            });
        }
        self.slot = Slot::Bound(instance);
        Ok(self.bind_reserved())
    }

    /// First phase of on-demand construction: mark the slot assigned before anything is built.
    pub fn reserve(&mut self) -> Result<()> {
        if self.is_assigned() {
            return Err(Error::AlreadyBound {
                type_name: type_name::<T>(),
            });
        }
        self.slot = Slot::Reserved;
        Ok(())
    }

    /// Second phase of on-demand construction. A slot that was not reserved is overwritten only
    /// if it is unbound; a bound instance always wins.
    pub fn complete(&mut self, instance: T) -> &mut T {
        if !matches!(self.slot, Slot::Bound(_)) {
            self.slot = Slot::Bound(instance);
        }
        self.bind_reserved()
    }

    /// Drop a reservation whose construction failed.
    pub fn cancel(&mut self) {
        if matches!(self.slot, Slot::Reserved) {
            self.slot = Slot::Unbound;
        }
    }

    /// Observe the application shutdown signal.
    pub fn notify_shutdown(&mut self) {
        self.shutting_down = true;
    }

    /// Release the instance. Only legal after [`notify_shutdown`](Self::notify_shutdown); the
    /// slot is back to `Unbound` afterwards and the shutdown flag is cleared for the next
    /// lifecycle.
    pub fn teardown(&mut self) -> Result<Option<T>> {
        if !self.shutting_down {
            return Err(Error::PrematureTeardown {
                type_name: type_name::<T>(),
            });
        }
        self.shutting_down = false;
        match std::mem::replace(&mut self.slot, Slot::Unbound) {
            Slot::Bound(instance) => Ok(Some(instance)),
            _ => Ok(None),
        }
    }

    fn bind_reserved(&mut self) -> &mut T {
        match &mut self.slot {
            Slot::Bound(instance) => instance,
            _ => unreachable!("slot was bound immediately before"),
        }
    }

    fn under_construction(&self) -> Error {
        Error::SingletonUnderConstruction {
            type_name: type_name::<T>(),
        }
    }
}

impl<T> Default for ManagedSingleton<T> {
    fn default() -> Self {
        Self::new()
    }
}
