//! Fixed-rate tick scheduler.
//!
//! Wall time accumulates between calls and is spent in whole simulation
//! steps, so the orrery ticks at a steady cadence regardless of how often
//! the driver wakes up.

use std::time::{Duration, Instant};

use tracing::warn;

/// Longest frame the accumulator accepts before clamping. Beyond this the
/// loop falls behind instead of running a burst of catch-up steps.
pub const MAX_FRAME_TIME: f64 = 0.25;

pub struct GameLoop {
    previous_time: Instant,
    accumulator: f64,
    step: f64,
    update_count: u64,
}

impl GameLoop {
    /// A loop stepping `ticks_per_second` times per wall-clock second.
    pub fn new(ticks_per_second: f64) -> Self {
        Self {
            previous_time: Instant::now(),
            accumulator: 0.0,
            step: 1.0 / ticks_per_second.max(1.0),
            update_count: 0,
        }
    }

    /// Seconds per step.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Measure elapsed wall time and run as many whole steps as it covers.
    /// Returns the number of steps run.
    pub fn tick(&mut self, update_fn: impl FnMut(f64)) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.previous_time).as_secs_f64();
        self.previous_time = now;
        self.advance(frame_time, update_fn)
    }

    /// Feed an explicit frame time into the accumulator.
    pub fn advance(&mut self, frame_time: f64, mut update_fn: impl FnMut(f64)) -> u32 {
        let frame_time = if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            MAX_FRAME_TIME
        } else {
            frame_time.max(0.0)
        };

        self.accumulator += frame_time;
        let mut steps = 0;
        while self.accumulator >= self.step {
            update_fn(self.step);
            self.accumulator -= self.step;
            self.update_count += 1;
            steps += 1;
        }
        steps
    }

    /// Wall time left until the accumulator holds another whole step.
    pub fn until_next_step(&self) -> Duration {
        Duration::from_secs_f64((self.step - self.accumulator).max(0.0))
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }
}
