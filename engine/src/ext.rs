//! Destroy helpers that pick the right kind of destruction for the world's mode.
//!
//! In edit mode objects are destroyed immediately, while playing the destruction is deferred to
//! the end of the frame like [`World::destroy`].

use crate::error::Result;
use crate::scene::{Entity, Mode, World};

pub trait ObjectExt {
    /// Destroy the object immediately in edit mode, at the end of the frame in play mode.
    fn destroy_in_any_mode(&mut self, entity: Entity) -> Result<()>;
}

pub trait TransformExt {
    /// Destroy every child of `entity`, last to first, in any mode.
    fn destroy_all_children(&mut self, entity: Entity) -> Result<()>;

    /// Destroy the object a transform belongs to, in any mode.
    fn destroy_transform_in_any_mode(&mut self, entity: Entity) -> Result<()>;
}

impl ObjectExt for World {
    fn destroy_in_any_mode(&mut self, entity: Entity) -> Result<()> {
        match self.mode() {
            Mode::Edit => self.destroy_immediate(entity),
            Mode::Play => self.destroy(entity),
        }
    }
}

impl TransformExt for World {
    fn destroy_all_children(&mut self, entity: Entity) -> Result<()> {
        let children = self.children(entity).to_vec();
        for child in children.into_iter().rev() {
            self.destroy_in_any_mode(child)?;
        }
        Ok(())
    }

    fn destroy_transform_in_any_mode(&mut self, entity: Entity) -> Result<()> {
        self.destroy_in_any_mode(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent_with_children(world: &mut World, count: usize) -> (Entity, Vec<Entity>) {
        let parent = world.spawn("parent");
        let children = (0..count)
            .map(|i| world.spawn_child(format!("child {i}"), parent).unwrap())
            .collect();
        (parent, children)
    }

    #[test]
    fn edit_mode_destroys_immediately() {
        let mut world = World::new(Mode::Edit);
        let (parent, children) = parent_with_children(&mut world, 2);
        world.destroy_transform_in_any_mode(parent).unwrap();
        assert!(!world.is_alive(parent));
        assert!(children.iter().all(|c| !world.is_alive(*c)));
    }

    #[test]
    fn play_mode_defers_destruction() {
        let mut world = World::new(Mode::Play);
        let (parent, _) = parent_with_children(&mut world, 0);
        world.destroy_in_any_mode(parent).unwrap();
        assert!(world.is_alive(parent));
        world.flush_destroyed().unwrap();
        assert!(world.roots(world.active_scene()).is_empty());
    }

    #[test]
    fn destroy_all_children_keeps_parent() {
        let mut world = World::new(Mode::Edit);
        let (parent, children) = parent_with_children(&mut world, 3);
        world.destroy_all_children(parent).unwrap();
        assert!(world.is_alive(parent));
        assert!(world.children(parent).is_empty());
        assert!(children.iter().all(|c| !world.is_alive(*c)));
    }

    #[test]
    fn destroy_all_children_in_play_mode() {
        let mut world = World::new(Mode::Play);
        let (parent, children) = parent_with_children(&mut world, 3);
        world.destroy_all_children(parent).unwrap();
        assert_eq!(world.children(parent).len(), 3);
        world.flush_destroyed().unwrap();
        assert!(world.children(parent).is_empty());
        assert!(children.iter().all(|c| !world.is_alive(*c)));
    }
}
