//! Engine configuration loaded from TOML.
//!
//! ```toml
//! fixed_time_step_ns = 20000000
//! first_scene = "arena"
//! additive_scenes = ["audio", "hud"]
//! log_level = "debug"
//! quit_key = "Escape"
//! ```
//!
//! Every field is optional and falls back to [`Config::default`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::input::KeyCode;
use crate::core::time::SIXTY_FPS;
use crate::error::{Error, Result};
use crate::scene::Mode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fixed update step in nano seconds.
    pub fixed_time_step_ns: u64,
    /// Scene loaded once the additive boot scenes are in place.
    pub first_scene: Option<String>,
    /// Scenes loaded additively at boot, in order, before the first scene.
    pub additive_scenes: Vec<String>,
    /// `log` level filter used by [`crate::core::logger::init`].
    pub log_level: String,
    /// Key used by the demo's quit component.
    pub quit_key: KeyCode,
    /// Edit or play mode for the world.
    pub mode: Mode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fixed_time_step_ns: SIXTY_FPS,
            first_scene: None,
            additive_scenes: Vec::new(),
            log_level: "info".into(),
            quit_key: KeyCode::Escape,
            mode: Mode::Play,
        }
    }
}

impl Config {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        log::debug!("loading config from {}", path.display());
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<()> {
        if self.fixed_time_step_ns == 0 {
            return Err(Error::Config("fixed_time_step_ns must be greater than zero".into()));
        }
        if self.log_level.parse::<log::LevelFilter>().is_err() {
            return Err(Error::Config(format!("unknown log level '{}'", self.log_level)));
        }
        Ok(())
    }

    /// The parsed log level. Falls back to `Info` for unparsable values.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
