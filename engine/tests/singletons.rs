use std::sync::atomic::{AtomicU32, Ordering};

use rusty_scene::scene::{Component, Context, LoadMode, Mode};
use rusty_scene::singleton::Singleton;
use rusty_scene::{Entity, Error, Result, World};

static CONSTRUCTED: AtomicU32 = AtomicU32::new(0);

/// Every construction gets a fresh serial number.
#[derive(Debug)]
struct AudioManager {
    serial: u32,
    volume: f32,
}

impl Singleton for AudioManager {
    fn create(_world: &mut World, _host: Entity) -> Result<Self> {
        Ok(AudioManager {
            serial: CONSTRUCTED.fetch_add(1, Ordering::SeqCst),
            volume: 1.0,
        })
    }
}

#[derive(Debug, Default, rusty_scene::Singleton)]
struct Settings {
    difficulty: u8,
}

#[derive(Debug, Default, rusty_scene::Singleton)]
struct Stats {
    touches: u32,
}

/// Touches `Stats` for the first time while the application shuts down.
#[derive(Debug, Default)]
struct QuitCounter;

impl Component for QuitCounter {
    fn on_application_quit(&mut self, ctx: &mut Context<'_>) -> Result<()> {
        ctx.world.singleton::<Stats>()?.touches += 1;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct DestroyCounter;

impl Component for DestroyCounter {
    fn on_destroy(&mut self, ctx: &mut Context<'_>) -> Result<()> {
        ctx.world.singleton::<Stats>()?.touches += 1;
        Ok(())
    }
}

#[derive(Debug)]
struct Reentrant;

impl Singleton for Reentrant {
    fn create(world: &mut World, _host: Entity) -> Result<Self> {
        world.singleton::<Reentrant>()?;
        Ok(Reentrant)
    }
}

#[derive(Debug)]
struct Broken;

impl Singleton for Broken {
    fn create(_world: &mut World, _host: Entity) -> Result<Self> {
        Err(Error::InvalidArgument("no audio device".into()))
    }
}

#[test]
fn first_access_constructs_and_later_access_is_stable() {
    let mut world = World::new(Mode::Play);
    assert!(!world.has_singleton::<AudioManager>());

    let first = world.singleton::<AudioManager>().unwrap() as *const AudioManager;
    let serial = world.try_singleton::<AudioManager>().unwrap().serial;
    assert!(world.has_singleton::<AudioManager>());

    for _ in 0..3 {
        let again = world.singleton::<AudioManager>().unwrap();
        assert_eq!(again as *const AudioManager, first);
        assert_eq!(again.serial, serial);
    }
}

#[test]
fn binding_a_second_instance_keeps_the_first() {
    let mut world = World::new(Mode::Play);
    world.singleton::<AudioManager>().unwrap().volume = 0.25;

    let other_host = world.spawn("Other Audio");
    let err = world
        .bind_singleton(
            other_host,
            AudioManager {
                serial: u32::MAX,
                volume: 1.0,
            },
        )
        .unwrap_err();
    assert!(matches!(err, Error::AlreadyBound { .. }));
    assert!(!err.is_fatal());
    assert_eq!(world.singleton::<AudioManager>().unwrap().volume, 0.25);
}

#[test]
fn teardown_before_shutdown_is_fatal_and_keeps_instance() {
    let mut world = World::new(Mode::Play);
    world.singleton::<AudioManager>().unwrap();

    let err = world.teardown_singleton::<AudioManager>().unwrap_err();
    assert!(matches!(err, Error::PrematureTeardown { .. }));
    assert!(err.is_fatal());
    assert!(world.has_singleton::<AudioManager>());
}

#[test]
fn full_lifecycle_constructs_a_new_instance() {
    let mut world = World::new(Mode::Play);
    let a = world.singleton::<AudioManager>().unwrap().serial;

    world.notify_shutdown().unwrap();
    let released = world.teardown_singleton::<AudioManager>().unwrap();
    assert_eq!(released.map(|m| m.serial), Some(a));
    assert!(!world.has_singleton::<AudioManager>());

    let c = world.singleton::<AudioManager>().unwrap().serial;
    assert_ne!(a, c);
}

#[test]
fn derived_singletons_use_default() {
    let mut world = World::new(Mode::Play);
    assert_eq!(world.singleton::<Settings>().unwrap().difficulty, 0);
    world.singleton::<Settings>().unwrap().difficulty = 3;
    assert_eq!(world.try_singleton::<Settings>().unwrap().difficulty, 3);

    let host = world.singletons().host::<Settings>().unwrap();
    assert_eq!(world.name(host), Some("Settings (Auto-Created)"));
}

#[test]
fn reentrant_construction_is_refused() {
    let mut world = World::new(Mode::Play);
    let err = world.singleton::<Reentrant>().unwrap_err();
    assert!(matches!(err, Error::SingletonUnderConstruction { .. }));
    assert!(!world.has_singleton::<Reentrant>());
}

#[test]
fn failed_construction_leaves_nothing_behind() {
    let mut world = World::new(Mode::Play);
    let before = world.object_count();

    let err = world.singleton::<Broken>().unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(ref msg) if msg == "no audio device"));
    assert!(!world.has_singleton::<Broken>());
    assert_eq!(world.object_count(), before);
}

#[test]
fn explicitly_bound_host_survives_scene_switches() {
    let mut world = World::new(Mode::Play);
    world.register_scene("level 1", |_| Ok(()));
    world.register_scene("level 2", |_| Ok(()));
    world.load_scene_now("level 1", LoadMode::Single).unwrap();

    let host = world.spawn("Audio");
    world
        .bind_singleton(
            host,
            AudioManager {
                serial: 7,
                volume: 0.5,
            },
        )
        .unwrap();
    assert!(world.is_persistent(host));

    world.load_scene_now("level 2", LoadMode::Single).unwrap();
    assert!(world.is_alive(host));
    assert_eq!(world.singleton::<AudioManager>().unwrap().serial, 7);

    assert!(world.destroy_immediate(host).unwrap_err().is_fatal());
    world.shutdown().unwrap();
    assert!(!world.is_alive(host));
    assert!(!world.has_singleton::<AudioManager>());
}

#[test]
fn singleton_first_reached_while_quitting_is_released_by_shutdown() {
    let mut world = World::new(Mode::Play);
    let entity = world.spawn("Counter");
    world.add_component(entity, QuitCounter).unwrap();

    world.shutdown().unwrap();
    assert_eq!(world.object_count(), 0);
    assert!(!world.has_singleton::<Stats>());
}

#[test]
fn singleton_first_reached_from_on_destroy_is_released_by_shutdown() {
    let mut world = World::new(Mode::Play);
    let entity = world.spawn("Counter");
    world.add_component(entity, DestroyCounter).unwrap();

    world.shutdown().unwrap();
    assert_eq!(world.object_count(), 0);
    assert!(!world.has_singleton::<Stats>());
}

#[test]
fn singleton_created_after_notify_shutdown_can_be_torn_down() {
    let mut world = World::new(Mode::Play);
    world.notify_shutdown().unwrap();

    world.singleton::<Stats>().unwrap().touches = 2;
    assert_eq!(world.try_singleton::<Stats>().unwrap().touches, 2);
    let host = world.singletons().host::<Stats>().unwrap();
    world.destroy_immediate(host).unwrap();
    assert!(!world.is_alive(host));
    assert!(!world.has_singleton::<Stats>());
}
