use glam::Vec3;

use crate::physics::{LayerMask, QueryTriggerInteraction, SphereCollider};
use crate::scene::{Entity, Transform, World};

/// Objects whose sphere collider overlaps the sphere at `center` (world space) with `radius`.
///
/// Colliders on inactive objects, disabled colliders and colliders on layers outside `mask` are
/// skipped; triggers are reported only with [`QueryTriggerInteraction::Collide`]. Each object is
/// reported once, in world order.
pub fn overlap_sphere(
    world: &World,
    center: Vec3,
    radius: f32,
    mask: LayerMask,
    triggers: QueryTriggerInteraction,
) -> Vec<Entity> {
    let mut hits: Vec<Entity> = Vec::new();
    for id in world.find_objects_by_type::<SphereCollider>() {
        if hits.last() == Some(&id.entity)
            || !world.is_active_in_hierarchy(id.entity)
            || !world.is_component_enabled(id)
        {
            continue;
        }
        let Some(collider) = world.component::<SphereCollider>(id) else {
            continue;
        };
        if !mask.contains(collider.layer) {
            continue;
        }
        if collider.is_trigger && triggers == QueryTriggerInteraction::Ignore {
            continue;
        }
        let Ok(matrix) = world.world_matrix(id.entity) else {
            continue;
        };
        let world_center = matrix.transform_point3(collider.center);
        let scale = Transform::from_matrix(matrix).scale.abs().max_element();
        let reach = radius + collider.radius * scale;
        if world_center.distance_squared(center) <= reach * reach {
            hits.push(id.entity);
        }
    }
    hits
}
