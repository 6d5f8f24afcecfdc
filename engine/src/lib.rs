//! Scene utilities on a small entity/component scene host.
//!
//! - [`singleton`]: guarded singletons that survive scene loads and refuse early teardown.
//! - [`scene`]: the [`World`] with objects, transforms, components, prefabs and scenes.
//! - [`physics`]: sphere colliders and overlap queries.
//! - [`components`]: collision destruction, forward movement, persistence, scene auto-loading,
//!   quit on key press.
//! - [`ext`]: destroy helpers that respect edit and play mode.
//! - [`math`]: random direction sampling and a running seed.
//! - [`core`]: time, input, config, logging and the frame loop.

extern crate self as rusty_scene;

pub mod components;
pub mod core;
pub mod error;
pub mod ext;
pub mod math;
pub mod physics;
pub mod scene;
pub mod singleton;

pub use error::{Error, Result};
pub use rusty_scene_macros::{Component, Singleton};
pub use scene::{Entity, World};
