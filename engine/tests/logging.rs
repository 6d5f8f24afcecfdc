use log::LevelFilter;
use rusty_scene::core::logger::ChannelLogger;
use rusty_scene::core::{Config, Engine};
use rusty_scene::scene::SceneCatalog;

#[test]
fn scene_loads_are_logged_through_the_channel_logger() {
    let (logger, receiver) = ChannelLogger::with_receiver(LevelFilter::Info);
    logger.install().unwrap();

    let mut catalog = SceneCatalog::new();
    catalog.register("intro", |_| Ok(()));
    let config = Config {
        first_scene: Some("intro".into()),
        ..Config::default()
    };
    let mut engine = Engine::new(&config, catalog);
    engine.boot().unwrap();

    let messages: Vec<String> = receiver.try_iter().map(|m| m.message).collect();
    assert!(
        messages.iter().any(|m| m.contains("loading scene 'intro'")),
        "{messages:?}"
    );
    assert!(receiver.try_iter().all(|m| m.level <= log::Level::Info));
}
