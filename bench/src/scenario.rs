//! Mine field scenario.
//!
//! Ships fly forward through a field of mines; every mine that touches a ship is destroyed and
//! replaced with debris. This exercises:
//! - Fixed update hooks on many components
//! - Overlap queries from `DestroyOnCollision`
//! - Deferred destruction and prefab instantiation
//! - Singleton access from impact responders

use std::time::Duration;

use glam::{Quat, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rusty_scene::components::{DestroyOnCollision, LinearMoveForward};
use rusty_scene::core::time::FIFTY_FPS;
use rusty_scene::core::{Config, Engine};
use rusty_scene::physics::{LayerMask, SphereCollider};
use rusty_scene::scene::{Component, Context, ImpactResponder, Prefab, SceneCatalog};
use rusty_scene::{Entity, Result, Singleton, World};

/// Configuration for the mine field scenario.
#[derive(Debug, Clone)]
pub struct MineFieldConfig {
    pub ship_count: usize,
    pub mine_count: usize,
    /// Mines are placed in `[-width, width] x [0, length]` on the XZ plane.
    pub width: f32,
    pub length: f32,
    /// Random seed for reproducibility.
    pub seed: u64,
}

impl Default for MineFieldConfig {
    fn default() -> Self {
        Self {
            ship_count: 50,
            mine_count: 1_000,
            width: 50.0,
            length: 200.0,
            seed: 12345,
        }
    }
}

const SHIP_LAYER: u8 = 0;
const MINE_LAYER: u8 = 1;

#[derive(Debug, Default, Singleton)]
pub struct Hits(pub u64);

#[derive(Debug, Default)]
struct Armor;

impl Component for Armor {
    fn impact_responder(&mut self) -> Option<&mut dyn ImpactResponder> {
        Some(self)
    }
}

impl ImpactResponder for Armor {
    fn impact(&mut self, ctx: &mut Context<'_>, _source: Entity) -> Result<()> {
        ctx.world.singleton::<Hits>()?.0 += 1;
        Ok(())
    }
}

fn build(world: &mut World, config: &MineFieldConfig) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let debris = Prefab::empty("Debris");

    for i in 0..config.ship_count {
        let ship = world.spawn(format!("Ship {i}"));
        let x = rng.gen_range(-config.width..config.width);
        world.set_local_position(ship, Vec3::new(x, 0.0, -10.0))?;
        world.add_component(ship, LinearMoveForward::new(rng.gen_range(5.0..20.0)))?;
        world.add_component(ship, SphereCollider::new(1.0))?;
        world.add_component(ship, Armor)?;
    }

    let field = world.spawn("Mine Field");
    for i in 0..config.mine_count {
        let mine = world.spawn_child(format!("Mine {i}"), field)?;
        let position = Vec3::new(
            rng.gen_range(-config.width..config.width),
            0.0,
            rng.gen_range(0.0..config.length),
        );
        world.set_local_position(mine, position)?;
        world.set_local_rotation(mine, Quat::from_rotation_y(rng.r#gen::<f32>()))?;
        // Mines only look for ships.
        let collider = SphereCollider::new(0.5)
            .on_layer(MINE_LAYER)
            .including(LayerMask::from_layers([SHIP_LAYER]));
        world.add_component(mine, collider)?;
        world.add_component(mine, DestroyOnCollision::new().spawning(debris.clone()))?;
    }
    Ok(())
}

/// Mine field benchmark scenario.
pub struct MineFieldScenario {
    config: MineFieldConfig,
    engine: Engine,
}

impl MineFieldScenario {
    pub fn with_config(config: MineFieldConfig) -> Self {
        let mut catalog = SceneCatalog::new();
        let scene_config = config.clone();
        catalog.register("mine field", move |world: &mut World| build(world, &scene_config));
        let engine_config = Config {
            fixed_time_step_ns: FIFTY_FPS,
            first_scene: Some("mine field".into()),
            ..Config::default()
        };
        Self {
            config,
            engine: Engine::new(&engine_config, catalog),
        }
    }

    pub fn config(&self) -> &MineFieldConfig {
        &self.config
    }

    /// Boot the engine and load the field.
    pub fn setup(&mut self) {
        self.engine.boot().expect("mine field scene loads");
    }

    /// One frame worth exactly one fixed step.
    pub fn update(&mut self) {
        self.engine
            .update_with_delta(Duration::from_nanos(FIFTY_FPS))
            .expect("frame runs");
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn world(&self) -> &World {
        self.engine.world()
    }

    pub fn hits(&self) -> u64 {
        self.world().try_singleton::<Hits>().map_or(0, |h| h.0)
    }
}

impl Default for MineFieldScenario {
    fn default() -> Self {
        Self::with_config(MineFieldConfig::default())
    }
}
