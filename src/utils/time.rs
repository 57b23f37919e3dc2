use std::time::{Duration, Instant};

/// Tracks frame timing and elapsed time.
pub struct Timer {
    start_time: Instant,
    last_update: Instant,
    /// Time since last tick
    pub delta: Duration,
    /// Total elapsed time since creation
    pub elapsed: Duration,
    /// Total number of ticks
    pub frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_update: now,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Advances to now. `Instant` is monotonic, so `delta` is never negative.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.delta = now.saturating_duration_since(self.last_update);
        self.elapsed = now.saturating_duration_since(self.start_time);
        self.last_update = now;
        self.frame_count += 1;
    }

    /// Restarts delta measurement without counting a frame, e.g. after the
    /// window was hidden.
    pub fn reset_delta(&mut self) {
        self.last_update = Instant::now();
        self.delta = Duration::ZERO;
    }

    #[must_use]
    pub fn dt_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }
}
