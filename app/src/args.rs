use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

/// Scene utilities demo: a ship flies into a mine field. Press the quit key to exit.
#[derive(Debug, Parser)]
#[command(name = "rusty", version)]
pub struct Args {
    /// TOML config file. Defaults to the built-in demo configuration.
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Run this many fixed-step frames without a terminal, then exit.
    #[arg(long, short)]
    pub frames: Option<u64>,

    /// Override the config's log level (off, error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<LevelFilter>,
}
