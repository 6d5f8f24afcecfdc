//! Random direction sampling and a running seed.
//!
//! [`RandomExt`] is implemented for every [`rand::Rng`]:
//!
//! ```rust,ignore
//! let mut rng = ChaCha8Rng::seed_from_u64(next_seed() as u64);
//! let spawn_offset = rng.next_inside_circle_direction(3.0);
//! let impulse = rng.next_on_sphere_direction(10.0);
//! ```

use std::f32::consts::TAU;
use std::sync::atomic::{AtomicU32, Ordering};

use glam::{Vec2, Vec3};
use rand::Rng;

pub trait RandomExt: Rng {
    /// A direction of length `|radius|`.
    fn next_on_circle_direction(&mut self, radius: f32) -> Vec2 {
        unit_circle(self) * radius
    }

    /// A unit direction scaled component-wise by a random `[0, 1)` vector and `radius`. Never
    /// longer than `|radius|`.
    fn next_inside_circle_direction(&mut self, radius: f32) -> Vec2 {
        let scale = Vec2::new(self.r#gen(), self.r#gen());
        unit_circle(self) * scale * radius
    }

    /// A direction of length `|radius|`.
    fn next_on_sphere_direction(&mut self, radius: f32) -> Vec3 {
        unit_sphere(self) * radius
    }

    /// Like [`next_inside_circle_direction`](Self::next_inside_circle_direction), in 3D.
    fn next_inside_sphere_direction(&mut self, radius: f32) -> Vec3 {
        let scale = Vec3::new(self.r#gen(), self.r#gen(), self.r#gen());
        unit_sphere(self) * scale * radius
    }
}

impl<R: Rng + ?Sized> RandomExt for R {}

fn unit_circle<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    Vec2::from_angle(angle)
}

fn unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let z: f32 = rng.gen_range(-1.0..=1.0);
    let angle = rng.gen_range(0.0..TAU);
    let ring = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(ring * angle.cos(), ring * angle.sin(), z)
}

/// A running seed: every call returns the previous seed plus one, never zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSequence(u32);

impl SeedSequence {
    pub const fn new(seed: u32) -> Self {
        Self(seed)
    }

    #[inline]
    pub const fn current(&self) -> u32 {
        self.0
    }

    pub fn set(&mut self, seed: u32) {
        self.0 = seed;
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u32 {
        self.0 = following(self.0);
        self.0
    }
}

#[inline]
fn following(seed: u32) -> u32 {
    seed.wrapping_add(1).max(1)
}

static RUNNING_SEED: AtomicU32 = AtomicU32::new(0);

/// Advance the process-wide seed sequence.
pub fn next_seed() -> u32 {
    let previous = RUNNING_SEED
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |seed| Some(following(seed)))
        .unwrap_or_else(|seed| seed);
    following(previous)
}

/// Reset the process-wide seed sequence. The next call to [`next_seed`] returns `seed + 1`.
pub fn set_next_seed(seed: u32) {
    RUNNING_SEED.store(seed, Ordering::Relaxed);
}
