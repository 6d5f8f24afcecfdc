//! Ways of driving an [`Engine`]. Every runner returns the number of frames it ran.

use std::time::Duration;

use crate::core::engine::Engine;
use crate::error::Result;

pub type Runner = Box<dyn FnOnce(&mut Engine) -> Result<u64>>;

/// Run frames on the wall clock until the engine stops.
pub fn looped(engine: &mut Engine) -> Result<u64> {
    let mut frames = 0;
    while engine.update()? {
        frames += 1;
        std::thread::sleep(Duration::from_millis(1));
    }
    Ok(frames + 1)
}

/// Run a single frame.
pub fn once(engine: &mut Engine) -> Result<u64> {
    engine.update()?;
    Ok(1)
}

/// Run at most `count` frames of exactly one fixed step each, stopping early if the engine
/// stops.
pub fn frames(count: u64) -> impl FnOnce(&mut Engine) -> Result<u64> {
    move |engine| {
        let step = engine.time().fixed_delta();
        for frame in 0..count {
            if !engine.update_with_delta(step)? {
                return Ok(frame + 1);
            }
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::scene::SceneCatalog;

    #[test]
    fn frames_runs_the_requested_count() {
        let mut engine = Engine::new(&Config::default(), SceneCatalog::new());
        engine.boot().unwrap();
        assert_eq!(engine.run(frames(5)).unwrap(), 5);
        assert_eq!(engine.time().frame_count, 5);
    }

    #[test]
    fn frames_stop_with_the_engine() {
        let mut engine = Engine::new(&Config::default(), SceneCatalog::new());
        engine.boot().unwrap();
        engine.world_mut().request_quit();
        assert_eq!(engine.run(frames(5)).unwrap(), 1);
    }

    #[test]
    fn once_runs_one_frame() {
        let mut engine = Engine::new(&Config::default(), SceneCatalog::new());
        engine.boot().unwrap();
        assert_eq!(engine.run(once).unwrap(), 1);
    }
}
