use std::time::{Duration, Instant};

pub const SIXTY_FPS: u64 = 16_666_666;
pub const FIFTY_FPS: u64 = 20_000_000;

/// Frame timing for the scene loop. Each frame captures total elapsed time, the delta since the
/// previous frame and an accumulator that decides how many fixed updates the frame owes. New
/// frames are produced from the previous one with `next()` (wall clock) or `advance()` (an
/// explicit delta, used by tests and fixed-step runners).
#[derive(Debug, Copy, Clone)]
pub struct Time {
    // The instant when this frame was created
    instant: Instant,
    /// The fixed time step in nano seconds
    pub fixed_time_step: u64,
    /// The time delta since the last frame
    pub delta: Duration,
    /// The total elapsed time since the first frame
    pub time: Duration,
    /// The total elapsed time since the first frame but incremented by the fixed time step
    pub fixed_time: Duration,
    /// The number of frames produced so far
    pub frame_count: u64,
    accumulator: u64,
}

impl Time {
    /// Construct a new `Time` with delta and time set to `0`. Caller must provide a fixed time
    /// step in nano seconds.
    pub fn new(fixed_time_step: u64) -> Self {
        Self {
            fixed_time_step: fixed_time_step.max(1),
            instant: Instant::now(),
            delta: Duration::ZERO,
            time: Duration::ZERO,
            fixed_time: Duration::ZERO,
            frame_count: 0,
            accumulator: 0,
        }
    }

    /// The fixed step as a `Duration`.
    pub fn fixed_delta(&self) -> Duration {
        Duration::from_nanos(self.fixed_time_step)
    }

    /// The fixed step in seconds.
    pub fn fixed_delta_secs(&self) -> f32 {
        self.fixed_delta().as_secs_f32()
    }

    /// The frame delta in seconds.
    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Increment the fixed frame time accumulation
    pub fn increment_fixed(&mut self) {
        self.fixed_time += self.fixed_delta();
        self.accumulator -= self.fixed_time_step;
    }

    /// Create the next frame from an existing frame using the wall clock delta.
    pub fn next(self) -> Self {
        let delta = self.instant.elapsed();
        self.advance(delta)
    }

    /// Create the next frame from an existing frame with an explicit delta.
    pub fn advance(self, delta: Duration) -> Self {
        Self {
            fixed_time_step: self.fixed_time_step,
            instant: Instant::now(),
            delta,
            time: self.time + delta,
            fixed_time: self.fixed_time,
            frame_count: self.frame_count + 1,
            accumulator: self.accumulator + delta.as_nanos() as u64,
        }
    }

    /// Determine whether this frame has accumulated enough delta for a fixed frame.
    pub fn has_fixed(&self) -> bool {
        self.accumulator >= self.fixed_time_step
    }

    /// Reset the time frame to now with zeroed accumulator.
    pub fn reset_now(&mut self) {
        self.instant = Instant::now();
        self.accumulator = 0;
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new(SIXTY_FPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates_fixed_steps() {
        let mut time = Time::new(FIFTY_FPS).advance(Duration::from_millis(50));
        let mut fixed = 0;
        while time.has_fixed() {
            time.increment_fixed();
            fixed += 1;
        }
        assert_eq!(fixed, 2);
        assert_eq!(time.fixed_time, Duration::from_millis(40));
        assert_eq!(time.frame_count, 1);

        // Remaining 10ms carries into the next frame
        let time = time.advance(Duration::from_millis(10));
        assert!(time.has_fixed());
    }

    #[test]
    fn zero_step_is_clamped() {
        let time = Time::new(0);
        assert_eq!(time.fixed_time_step, 1);
    }

    #[test]
    fn reset_clears_accumulator() {
        let mut time = Time::new(FIFTY_FPS).advance(Duration::from_millis(100));
        time.reset_now();
        assert!(!time.has_fixed());
    }
}
