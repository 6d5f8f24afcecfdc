//! Collision queries.
//!
//! There is no simulation: colliders are plain components and [`overlap_sphere`] answers "which
//! objects touch this sphere right now".

mod collider;
mod query;

pub use collider::{LayerMask, QueryTriggerInteraction, SphereCollider};
pub use query::overlap_sphere;
