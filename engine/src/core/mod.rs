pub mod config;
pub mod engine;
pub mod input;
pub mod logger;
pub mod runner;
mod state;
pub mod time;

pub use config::Config;
pub use engine::Engine;
pub use input::{Input, KeyCode};
pub use state::State;
pub use time::Time;
