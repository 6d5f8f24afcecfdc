//! The demo scenes.
//!
//! `hud` is loaded additively at boot and made persistent, `title` waits a second and loads
//! `arena`, where a ship flies forward into a row of mines.

use glam::{Quat, Vec3};
use rusty_scene::components::{
    DestroyOnCollision, DontDestroyOnLoad, LinearMoveForward, PressKeyToQuit, SceneAutoLoader,
};
use rusty_scene::core::KeyCode;
use rusty_scene::ext::TransformExt;
use rusty_scene::physics::SphereCollider;
use rusty_scene::scene::{Component, Context, ImpactResponder, Prefab, SceneCatalog};
use rusty_scene::{Entity, Result, Singleton, World};

const FIELD_LENGTH: f32 = 20.0;

#[derive(Debug, Default, Singleton)]
pub struct Score {
    pub hits: u32,
}

/// Counts the mines that hit its object.
#[derive(Debug, Default)]
struct Hull;

impl Component for Hull {
    fn impact_responder(&mut self) -> Option<&mut dyn ImpactResponder> {
        Some(self)
    }
}

impl ImpactResponder for Hull {
    fn impact(&mut self, ctx: &mut Context<'_>, source: Entity) -> Result<()> {
        let score = ctx.world.singleton::<Score>()?;
        score.hits += 1;
        let hits = score.hits;
        log::info!(
            "hull hit by '{}', {hits} hit(s) so far",
            ctx.world.name(source).unwrap_or_default()
        );
        Ok(())
    }
}

/// Logs the ship position once per second and quits once the ship left the field.
#[derive(Debug, Default)]
struct Reporter {
    ship: Option<Entity>,
    elapsed: f32,
}

impl Component for Reporter {
    fn start(&mut self, ctx: &mut Context<'_>) -> Result<()> {
        self.ship = ctx.world.find("Ship");
        Ok(())
    }

    fn update(&mut self, ctx: &mut Context<'_>) -> Result<()> {
        self.elapsed += ctx.time().delta_secs();
        if self.elapsed < 1.0 {
            return Ok(());
        }
        self.elapsed = 0.0;
        let Some(ship) = self.ship.filter(|s| ctx.world.is_alive(*s)) else {
            return Ok(());
        };
        let position = ctx.world.world_position(ship)?;
        log::info!("ship at {position:.1}");
        if position.z > FIELD_LENGTH {
            log::info!("ship left the mine field, clearing it");
            if let Some(field) = ctx.world.find("Mine Field") {
                ctx.world.destroy_all_children(field)?;
            }
            ctx.world.request_quit();
        }
        Ok(())
    }
}

fn debris() -> Prefab {
    Prefab::new("Debris", |world, entity| {
        world.add_component(entity, LinearMoveForward::new(0.5))?;
        log::debug!("debris spawned at {:.1}", world.world_position(entity)?);
        Ok(())
    })
}

fn hud(world: &mut World, quit_key: KeyCode) -> Result<()> {
    let hud = world.spawn("HUD");
    world.add_component(hud, DontDestroyOnLoad)?;
    world.add_component(hud, PressKeyToQuit::new(quit_key))?;
    Ok(())
}

fn title(world: &mut World) -> Result<()> {
    let title = world.spawn("Title");
    let mut loader = SceneAutoLoader::new("arena", 1.0);
    loader.validate(world.catalog());
    world.add_component(title, loader)?;
    Ok(())
}

fn arena(world: &mut World) -> Result<()> {
    let ship = world.spawn("Ship");
    world.add_component(ship, LinearMoveForward::new(4.0))?;
    world.add_component(ship, SphereCollider::new(0.5))?;
    world.add_component(ship, Hull)?;

    let field = world.spawn("Mine Field");
    let prefab = debris();
    for (i, z) in [5.0, 10.0, 15.0].into_iter().enumerate() {
        let mine = world.spawn_child(format!("Mine {i}"), field)?;
        world.set_local_position(mine, Vec3::new(0.0, 0.0, z))?;
        world.set_local_rotation(mine, Quat::from_rotation_y(i as f32))?;
        world.add_component(mine, SphereCollider::new(0.75))?;
        world.add_component(mine, DestroyOnCollision::new().spawning(prefab.clone()))?;
    }
    // Off to the side, never hit.
    let stray = world.spawn_child("Stray Mine", field)?;
    world.set_local_position(stray, Vec3::new(8.0, 0.0, 10.0))?;
    world.add_component(stray, SphereCollider::new(0.75))?;
    world.add_component(stray, DestroyOnCollision::new())?;

    let reporter = world.spawn("Reporter");
    world.add_component(reporter, Reporter::default())?;
    Ok(())
}

/// The demo scenes, with the HUD quitting on `quit_key`.
pub fn catalog(quit_key: KeyCode) -> SceneCatalog {
    let mut catalog = SceneCatalog::new();
    catalog
        .register("hud", move |world: &mut World| hud(world, quit_key))
        .register("title", title)
        .register("arena", arena);
    catalog
}
