//! Deterministic worlds for the benchmarks.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rusty_scene::physics::SphereCollider;
use rusty_scene::scene::Mode;
use rusty_scene::{Entity, World};

/// Scatter `count` sphere colliders uniformly inside a cube of half-size `extent`, on layers
/// 0..4.
pub fn scatter_colliders(world: &mut World, count: usize, extent: f32, seed: u64) -> Vec<Entity> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let entity = world.spawn(format!("Collider {i}"));
            let position = Vec3::new(
                rng.gen_range(-extent..extent),
                rng.gen_range(-extent..extent),
                rng.gen_range(-extent..extent),
            );
            let collider = SphereCollider::new(rng.gen_range(0.1..1.0)).on_layer(rng.gen_range(0..4));
            world
                .set_local_position(entity, position)
                .and_then(|_| world.add_component(entity, collider))
                .expect("fresh entity");
            entity
        })
        .collect()
}

/// A play-mode world with `count` scattered colliders.
pub fn collider_world(count: usize, seed: u64) -> World {
    let mut world = World::new(Mode::Play);
    scatter_colliders(&mut world, count, 50.0, seed);
    world
}

/// Spawn a hierarchy `depth` levels deep with `breadth` children per node. Returns the root.
pub fn hierarchy(world: &mut World, depth: usize, breadth: usize) -> Entity {
    let root = world.spawn("root");
    let mut level = vec![root];
    for d in 0..depth {
        let mut next = Vec::with_capacity(level.len() * breadth);
        for parent in level {
            for b in 0..breadth {
                next.push(
                    world
                        .spawn_child(format!("node {d}.{b}"), parent)
                        .expect("parent is alive"),
                );
            }
        }
        level = next;
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scatter_is_deterministic() {
        let a = collider_world(10, 1);
        let b = collider_world(10, 1);
        let pos = |w: &World| {
            let e = w.find("Collider 3").unwrap();
            w.world_position(e).unwrap()
        };
        assert_eq!(pos(&a), pos(&b));
    }

    #[test]
    fn hierarchy_size() {
        let mut world = World::new(Mode::Play);
        hierarchy(&mut world, 2, 3);
        assert_eq!(world.object_count(), 1 + 3 + 9);
    }
}
