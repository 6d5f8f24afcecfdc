//! Entity identifiers for scene objects.
//!
//! An [`Entity`] combines an [`Id`] with a [`Generation`]. When an object is destroyed its id
//! goes back to the [`Allocator`]'s dead pool with the generation bumped, so stale handles to
//! the old object never match the object that reuses the slot:
//!
//! ```rust,ignore
//! let entity = allocator.alloc(); // Entity { id: 0, generation: 0 }
//! allocator.free(entity);
//! let reused = allocator.alloc();  // Entity { id: 0, generation: 1 }
//! ```

/// The generation of an entity. Starts at `FIRST` and is incremented each time the id is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u32);

impl Generation {
    /// The first generation of an entity.
    const FIRST: Self = Self(0);

    /// Get the next generation from the current.
    #[inline]
    pub fn next(&self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// An entity slot identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u32);

impl From<u32> for Id {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// A handle to a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity {
    id: Id,
    generation: Generation,
}

impl Entity {
    /// Construct an entity in its first generation. Primarily used for testing.
    #[inline]
    pub(crate) fn new(id: impl Into<Id>) -> Self {
        Self::new_with_generation(id.into(), Generation::FIRST)
    }

    #[inline]
    pub(crate) const fn new_with_generation(id: Id, generation: Generation) -> Self {
        Self { id, generation }
    }

    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    #[inline]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Get the index of this entity if it were to live in indexable storage (e.g. Vec)
    #[inline]
    pub fn index(&self) -> usize {
        self.id.0 as usize
    }

    /// Get a new entity with the same id but the next generation.
    #[inline]
    pub fn genned(&self) -> Self {
        Self::new_with_generation(self.id, self.generation.next())
    }
}

/// Hands out entities, reusing freed ids with a bumped generation.
#[derive(Debug, Default)]
pub struct Allocator {
    next_id: u32,
    dead_pool: Vec<Entity>,
}

impl Allocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self) -> Entity {
        if let Some(entity) = self.dead_pool.pop() {
            return entity;
        }
        let entity = Entity::new(self.next_id);
        self.next_id += 1;
        entity
    }

    /// Return an entity to the pool. Its next use carries the next generation.
    pub fn free(&mut self, entity: Entity) {
        self.dead_pool.push(entity.genned());
    }

    /// Number of ids ever handed out.
    pub fn capacity(&self) -> usize {
        self.next_id as usize
    }
}
