//! Frame timing for engine runs.
//!
//! Criterion reports the mean cost of a frame; [`FrameStats`] adds the distribution (median,
//! p99, spread), which matters for frames whose cost changes as the world changes.

use std::time::{Duration, Instant};

use rusty_scene::core::Engine;

/// Statistics collected from frame timing measurements.
#[derive(Debug, Clone)]
pub struct FrameStats {
    pub frame_count: usize,
    pub total: Duration,
    /// Frame times, ascending.
    sorted: Vec<Duration>,
}

impl FrameStats {
    pub fn from_times(mut times: Vec<Duration>) -> Self {
        times.sort();
        Self {
            frame_count: times.len(),
            total: times.iter().sum(),
            sorted: times,
        }
    }

    pub fn average(&self) -> Duration {
        match self.frame_count {
            0 => Duration::ZERO,
            n => self.total / n as u32,
        }
    }

    pub fn min(&self) -> Duration {
        self.sorted.first().copied().unwrap_or_default()
    }

    pub fn max(&self) -> Duration {
        self.sorted.last().copied().unwrap_or_default()
    }

    /// Frame time at percentile `p` (0-100).
    pub fn percentile(&self, p: usize) -> Duration {
        if self.sorted.is_empty() {
            return Duration::ZERO;
        }
        let index = (self.sorted.len() * p.min(100) / 100).min(self.sorted.len() - 1);
        self.sorted[index]
    }

    pub fn median(&self) -> Duration {
        self.percentile(50)
    }

    pub fn p99(&self) -> Duration {
        self.percentile(99)
    }
}

impl std::fmt::Display for FrameStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ms = |d: Duration| d.as_secs_f64() * 1000.0;
        write!(
            f,
            "{} frames, avg: {:.3}ms, median: {:.3}ms, p99: {:.3}ms, min: {:.3}ms, max: {:.3}ms",
            self.frame_count,
            ms(self.average()),
            ms(self.median()),
            ms(self.p99()),
            ms(self.min()),
            ms(self.max()),
        )
    }
}

/// Run up to `frame_count` fixed-step frames and time each one. Stops early if the engine
/// stops.
pub fn measure_engine(engine: &mut Engine, frame_count: usize) -> rusty_scene::Result<FrameStats> {
    let step = engine.time().fixed_delta();
    let mut times = Vec::with_capacity(frame_count);
    for _ in 0..frame_count {
        let start = Instant::now();
        let running = engine.update_with_delta(step)?;
        times.push(start.elapsed());
        if !running {
            break;
        }
    }
    Ok(FrameStats::from_times(times))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusty_scene::core::Config;
    use rusty_scene::scene::SceneCatalog;

    #[test]
    fn stats_from_known_times() {
        let stats = FrameStats::from_times(
            [10, 12, 11, 15, 10].map(Duration::from_millis).to_vec(),
        );
        assert_eq!(stats.frame_count, 5);
        assert_eq!(stats.min(), Duration::from_millis(10));
        assert_eq!(stats.max(), Duration::from_millis(15));
        assert_eq!(stats.median(), Duration::from_millis(11));
        // 58ms / 5
        assert_eq!(stats.average(), Duration::from_micros(11_600));
    }

    #[test]
    fn empty_stats_are_zero() {
        let stats = FrameStats::from_times(Vec::new());
        assert_eq!(stats.average(), Duration::ZERO);
        assert_eq!(stats.p99(), Duration::ZERO);
    }

    #[test]
    fn measure_engine_stops_with_engine() {
        let mut engine = Engine::new(&Config::default(), SceneCatalog::new());
        engine.boot().unwrap();
        assert_eq!(measure_engine(&mut engine, 4).unwrap().frame_count, 4);

        engine.world_mut().request_quit();
        assert_eq!(measure_engine(&mut engine, 4).unwrap().frame_count, 1);
    }
}
