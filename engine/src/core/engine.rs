//! The frame loop.
//!
//! Each call to [`Engine::update`] produces one frame:
//!
//! ```text
//! pending scene loads ─► start ─► fixed_update × n ─► update ─► deferred destroys ─► input reset
//! ```
//!
//! `n` is decided by the fixed time step accumulator in [`Time`]; it may be zero or several
//! depending on how long the previous frame took. When a component requested quit during the
//! frame, the engine signals shutdown, destroys the world and stops.

use std::time::Duration;

use crate::core::config::Config;
use crate::core::state::State;
use crate::core::time::Time;
use crate::error::Result;
use crate::scene::{AutoLoadScenes, SceneCatalog, World};

pub struct Engine {
    world: World,
    time: Time,
    state: State,
    auto_load: AutoLoadScenes,
    first_scene: Option<String>,
}

impl Engine {
    /// Build an engine for `config`, with the scenes of `catalog` available for loading.
    pub fn new(config: &Config, catalog: SceneCatalog) -> Self {
        let mut world = World::new(config.mode);
        *world.catalog_mut() = catalog;
        Self {
            world,
            time: Time::new(config.fixed_time_step_ns),
            state: State::Dead,
            auto_load: AutoLoadScenes::from_names(&config.additive_scenes),
            first_scene: config.first_scene.clone(),
        }
    }

    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[inline]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    #[inline]
    pub fn time(&self) -> &Time {
        &self.time
    }

    /// Load the boot scenes: the auto-load scenes additively, then the first scene.
    pub fn boot(&mut self) -> Result<()> {
        log::info!("Revving the engine");
        self.state = State::Starting;
        self.auto_load.validate(self.world.catalog());
        if let Err(err) = self
            .world
            .boot(&self.auto_load, self.first_scene.as_deref())
        {
            self.state = State::Stopped;
            return Err(err);
        }
        self.time.reset_now();
        self.world.set_time(self.time);
        self.state = State::Running;
        Ok(())
    }

    /// Run one frame with the wall clock delta. Returns `false` once the engine has stopped.
    pub fn update(&mut self) -> Result<bool> {
        let next = self.time.next();
        self.step(next)
    }

    /// Run one frame with an explicit delta.
    pub fn update_with_delta(&mut self, delta: Duration) -> Result<bool> {
        let next = self.time.advance(delta);
        self.step(next)
    }

    fn step(&mut self, time: Time) -> Result<bool> {
        if self.state != State::Running {
            return Ok(false);
        }
        match self.frame(time) {
            Ok(running) => Ok(running),
            Err(err) => {
                if err.is_fatal() {
                    log::error!("fatal error, stopping the engine: {err}");
                    self.state = State::Stopped;
                } else {
                    log::error!("frame {} failed: {err}", self.time.frame_count);
                }
                Err(err)
            }
        }
    }

    fn frame(&mut self, time: Time) -> Result<bool> {
        self.time = time;
        self.world.set_time(self.time);
        self.world.apply_pending_loads()?;
        self.world.run_start()?;
        while self.time.has_fixed() {
            self.time.increment_fixed();
            self.world.set_time(self.time);
            self.world.run_fixed_update()?;
        }
        self.world.run_update()?;
        self.world.end_frame()?;

        if self.world.is_quit_requested() {
            self.stop()?;
            return Ok(false);
        }
        Ok(true)
    }

    /// Signal shutdown and destroy every object. Safe to call more than once.
    pub fn stop(&mut self) -> Result<()> {
        if self.state == State::Stopped {
            return Ok(());
        }
        self.state = State::Stopping;
        log::info!("Killing the engine");
        let result = self.world.shutdown();
        self.state = State::Stopped;
        log::info!("Engine stopped after {} frames", self.time.frame_count);
        result
    }

    /// Drive the engine with a runner.
    pub fn run(&mut self, runner: impl FnOnce(&mut Engine) -> Result<u64>) -> Result<u64> {
        runner(self)
    }
}
