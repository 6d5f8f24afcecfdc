//! Local transform of a scene object.
//!
//! Positions follow a left-handed, +Y up convention with +Z forward. The world-space values
//! of an object depend on its parents and are computed by the
//! [`World`](crate::scene::World).

use glam::{Mat4, Quat, Vec3};

/// Position, rotation and scale relative to the parent object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Build the local transform that yields `world` under a parent with matrix `parent`.
    pub fn relative_to(world: Mat4, parent: Mat4) -> Self {
        let (scale, rotation, position) = (parent.inverse() * world).to_scale_rotation_translation();
        Self {
            position,
            rotation: rotation.normalize(),
            scale,
        }
    }

    /// Decompose a matrix into a transform.
    pub fn from_matrix(matrix: Mat4) -> Self {
        let (scale, rotation, position) = matrix.to_scale_rotation_translation();
        Self {
            position,
            rotation: rotation.normalize(),
            scale,
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq_vec3(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.matrix(), Mat4::IDENTITY);
        assert_eq!(t.forward(), Vec3::Z);
    }

    #[test]
    fn relative_to_inverts_parent() {
        let parent = Transform::from_position(Vec3::new(10.0, 0.0, 0.0)).with_scale(Vec3::splat(2.0));
        let world = Transform::from_position(Vec3::new(14.0, 2.0, 0.0)).with_scale(Vec3::splat(2.0));

        let local = Transform::relative_to(world.matrix(), parent.matrix());
        assert!(approx_eq_vec3(local.position, Vec3::new(2.0, 1.0, 0.0)));
        assert!(approx_eq_vec3(local.scale, Vec3::ONE));
    }

    #[test]
    fn forward_follows_rotation() {
        let t = Transform::new().with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        assert!(approx_eq_vec3(t.forward(), Vec3::X));
    }
}
