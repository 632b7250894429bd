//! Frames-per-second counter, updated once per second.

use std::time::{Duration, Instant};

/// How often the displayed value is recomputed.
const SAMPLE_PERIOD: Duration = Duration::from_secs(1);

/// Counts frames and reports their rate over the last full sample period.
#[derive(Clone, Copy, Debug)]
pub struct FpsCounter {
    last_calc: Instant,
    frames: u32,
    current: f32,
}

impl FpsCounter {
    /// Start counting from `now`. Reports 0 until the first period ends.
    pub const fn new(now: Instant) -> Self {
        Self {
            last_calc: now,
            frames: 0,
            current: 0.0,
        }
    }

    /// Record one frame at `now` and return the current rate.
    pub fn tick(&mut self, now: Instant) -> f32 {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.last_calc);
        if elapsed >= SAMPLE_PERIOD {
            self.current = self.frames as f32 / elapsed.as_secs_f32();
            self.frames = 0;
            self.last_calc = now;
        }
        self.current
    }

    #[inline]
    pub const fn current(&self) -> f32 {
        self.current
    }
}
