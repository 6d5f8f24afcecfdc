mod args;
mod demo;
mod terminal;

use std::process::ExitCode;

use clap::Parser;
use rusty_scene::core::{Config, Engine, logger, runner};

use crate::args::Args;
use crate::demo::Score;

fn default_config() -> Config {
    Config {
        first_scene: Some("title".into()),
        additive_scenes: vec!["hud".into()],
        ..Config::default()
    }
}

fn run(args: Args) -> rusty_scene::Result<()> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => default_config(),
    };
    logger::init(args.log_level.unwrap_or(config.level_filter()));

    let mut engine = Engine::new(&config, demo::catalog(config.quit_key));
    engine.boot()?;

    let frames = match args.frames {
        Some(count) => engine.run(runner::frames(count))?,
        None => terminal::run_interactive(&mut engine)?,
    };
    let hits = engine.world().try_singleton::<Score>().map_or(0, |s| s.hits);
    engine.stop()?;
    log::info!("ran {frames} frames, {hits} hit(s)");
    Ok(())
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("rusty: {err}");
            ExitCode::FAILURE
        }
    }
}
