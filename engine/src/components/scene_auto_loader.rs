use crate::error::{Error, Result};
use crate::scene::{Component, Context, LoadMode, SceneCatalog, SceneReference, World};

/// Loads a scene once, after waiting a number of seconds. Removes itself afterwards.
#[derive(Debug, Clone, Default)]
pub struct SceneAutoLoader {
    pub scene_to_load: SceneReference,
    /// Seconds to wait after start.
    pub time_to_wait_before_load: f32,
    elapsed: f32,
}

impl SceneAutoLoader {
    pub fn new(scene_to_load: impl Into<SceneReference>, time_to_wait_before_load: f32) -> Self {
        Self {
            scene_to_load: scene_to_load.into(),
            time_to_wait_before_load,
            elapsed: 0.0,
        }
    }

    /// Drop unknown scene names and clamp the wait to zero or more.
    pub fn validate(&mut self, catalog: &SceneCatalog) {
        self.scene_to_load.validate(catalog);
        self.time_to_wait_before_load = self.time_to_wait_before_load.max(0.0);
    }

    /// Disable and remove every loader in the world.
    pub fn disable_all(world: &mut World) {
        for id in world.find_objects_by_type::<SceneAutoLoader>() {
            world.set_component_enabled(id, false);
            world.remove_component(id);
        }
    }

    /// Make the first loader in the world load its scene now. Returns whether one was found.
    pub fn load_now(world: &mut World) -> Result<bool> {
        let Some(id) = world.find_any_object_by_type::<SceneAutoLoader>() else {
            return Ok(false);
        };
        let scene = world
            .component::<SceneAutoLoader>(id)
            .and_then(|loader| loader.scene_to_load.scene_name().map(str::to_string));
        world.remove_component(id);
        match scene {
            Some(scene) => {
                Self::request(world, &scene)?;
                Ok(true)
            }
            None => Err(Self::unassigned()),
        }
    }

    fn request(world: &mut World, scene: &str) -> Result<()> {
        log::info!("SceneAutoLoader: loading {scene}");
        world.load_scene(scene, LoadMode::Single)
    }

    fn unassigned() -> Error {
        Error::InvalidArgument("SceneAutoLoader: scene not assigned".into())
    }
}

impl Component for SceneAutoLoader {
    fn start(&mut self, _ctx: &mut Context<'_>) -> Result<()> {
        if !self.scene_to_load.is_assigned() {
            return Err(Self::unassigned());
        }
        self.elapsed = 0.0;
        Ok(())
    }

    fn update(&mut self, ctx: &mut Context<'_>) -> Result<()> {
        self.elapsed += ctx.time().delta_secs();
        if self.elapsed < self.time_to_wait_before_load {
            return Ok(());
        }
        let scene = self.scene_to_load.scene_name().ok_or_else(Self::unassigned)?;
        Self::request(ctx.world, scene)?;
        ctx.remove_self();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::Time;
    use crate::scene::Mode;
    use std::time::Duration;

    fn world_with_menu() -> World {
        let mut world = World::new(Mode::Play);
        world.register_scene("menu", |world| {
            world.spawn("menu root");
            Ok(())
        });
        world
    }

    fn frame(world: &mut World, delta: Duration) {
        let time = world.time().advance(delta);
        world.set_time(time);
        world.run_start().unwrap();
        world.run_update().unwrap();
        world.end_frame().unwrap();
    }

    #[test]
    fn start_without_scene_fails() {
        let mut world = world_with_menu();
        let entity = world.spawn("loader");
        world.add_component(entity, SceneAutoLoader::default()).unwrap();
        assert!(matches!(world.run_start(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn waits_then_requests_single_load() {
        let mut world = world_with_menu();
        let entity = world.spawn("loader");
        world.add_component(entity, SceneAutoLoader::new("menu", 1.0)).unwrap();

        frame(&mut world, Duration::from_millis(600));
        assert!(!world.has_pending_loads());

        frame(&mut world, Duration::from_millis(600));
        assert!(world.has_pending_loads());
        assert!(!world.has_component::<SceneAutoLoader>(entity));

        world.apply_pending_loads().unwrap();
        assert_eq!(world.active_scene_name(), Some("menu"));
        assert!(!world.is_alive(entity));
    }

    #[test]
    fn validate_clamps_and_clears() {
        let world = world_with_menu();
        let mut loader = SceneAutoLoader::new("gone", -3.0);
        loader.validate(world.catalog());
        assert_eq!(loader.time_to_wait_before_load, 0.0);
        assert!(!loader.scene_to_load.is_assigned());
    }

    #[test]
    fn disable_all_and_load_now() {
        let mut world = world_with_menu();
        let a = world.spawn("a");
        world.add_component(a, SceneAutoLoader::new("menu", 10.0)).unwrap();
        assert!(SceneAutoLoader::load_now(&mut world).unwrap());
        assert!(world.has_pending_loads());

        let mut world = world_with_menu();
        let b = world.spawn("b");
        world.add_component(b, SceneAutoLoader::new("menu", 0.0)).unwrap();
        SceneAutoLoader::disable_all(&mut world);
        frame(&mut world, Duration::from_millis(16));
        assert!(!world.has_pending_loads());
        assert!(!SceneAutoLoader::load_now(&mut world).unwrap());
    }
}
