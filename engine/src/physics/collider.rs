use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::Component;

/// A set of the 32 collision layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(u32);

impl LayerMask {
    pub const NOTHING: LayerMask = LayerMask(0);
    pub const EVERYTHING: LayerMask = LayerMask(u32::MAX);

    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub fn from_layers(layers: impl IntoIterator<Item = u8>) -> Self {
        layers
            .into_iter()
            .fold(Self::NOTHING, |mask, layer| mask.with(layer))
    }

    /// Layers above 31 are ignored.
    #[inline]
    pub const fn with(self, layer: u8) -> Self {
        if layer < 32 {
            Self(self.0 | (1 << layer))
        } else {
            self
        }
    }

    #[inline]
    pub const fn contains(&self, layer: u8) -> bool {
        layer < 32 && self.0 & (1 << layer) != 0
    }

    #[inline]
    pub const fn bits(&self) -> u32 {
        self.0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::EVERYTHING
    }
}

/// Whether a query reports trigger colliders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryTriggerInteraction {
    Collide,
    #[default]
    Ignore,
}

impl QueryTriggerInteraction {
    pub fn from_collides(collides_with_triggers: bool) -> Self {
        if collides_with_triggers {
            Self::Collide
        } else {
            Self::Ignore
        }
    }
}

/// A sphere in the local space of its object. The world radius is scaled by the largest axis of
/// the object's world scale.
#[derive(Debug, Clone, PartialEq, Component)]
pub struct SphereCollider {
    pub center: Vec3,
    pub radius: f32,
    /// Layer this collider lives on, 0..32.
    pub layer: u8,
    /// Layers queries issued on behalf of this collider look at.
    pub include_layers: LayerMask,
    pub is_trigger: bool,
}

impl SphereCollider {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }

    pub fn on_layer(mut self, layer: u8) -> Self {
        self.layer = layer;
        self
    }

    pub fn including(mut self, include_layers: LayerMask) -> Self {
        self.include_layers = include_layers;
        self
    }

    pub fn trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }
}

impl Default for SphereCollider {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            radius: 0.5,
            layer: 0,
            include_layers: LayerMask::EVERYTHING,
            is_trigger: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_mask_membership() {
        let mask = LayerMask::from_layers([0, 3, 31]);
        assert!(mask.contains(0));
        assert!(mask.contains(3));
        assert!(mask.contains(31));
        assert!(!mask.contains(1));
        assert!(!mask.contains(40));
        assert_eq!(mask.with(40), mask);
        assert_eq!(LayerMask::NOTHING.bits(), 0);
    }

    #[test]
    fn collider_builders() {
        let collider = SphereCollider::new(2.0).on_layer(4).trigger();
        assert_eq!(collider.radius, 2.0);
        assert_eq!(collider.layer, 4);
        assert!(collider.is_trigger);
        assert_eq!(collider.include_layers, LayerMask::EVERYTHING);
    }
}
