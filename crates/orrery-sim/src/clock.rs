//! Simulated calendar clock driven by discrete ticks.
//!
//! The clock never integrates wall-clock deltas. Each tick advances the
//! simulated date by a fixed slice of a day scaled by the speed multiplier,
//! and reports the angular rate every body should advance by.

use chrono::{DateTime, TimeDelta, Utc};
use orrery_config::SimulationConfig;

/// Source of real time. Injected so tests can pin the wall clock.
pub trait WallClock {
    fn now(&self) -> DateTime<Utc>;

    /// Wall time in seconds, used only for render-side oscillations.
    fn seconds(&self) -> f64 {
        self.now().timestamp_millis() as f64 / 1000.0
    }
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemWallClock;

impl WallClock for SystemWallClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A wall clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedWallClock(pub DateTime<Utc>);

impl WallClock for FixedWallClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct SimulationClock {
    simulated_date: DateTime<Utc>,
    /// Simulated milliseconds per second of ticks at speed 1.
    base_tick_ms: f64,
    ticks_per_second: f64,
    speed: f64,
    max_speed: f64,
    speed_step: f64,
    paused: bool,
    /// Angular rate while the speed multiplier is 0.
    fallback_rate: f64,
}

impl SimulationClock {
    /// Clock starting at `start`. A negative or NaN max speed pins the
    /// speed at 0; a NaN initial speed falls back to the default.
    pub fn new(config: &SimulationConfig, start: DateTime<Utc>) -> Self {
        let max_speed = config.max_speed.max(0.0);
        let mut clock = Self {
            simulated_date: start,
            base_tick_ms: config.base_tick_ms,
            ticks_per_second: config.ticks_per_second,
            speed: SimulationConfig::default().initial_speed.min(max_speed),
            max_speed,
            speed_step: config.speed_step,
            paused: config.start_paused,
            fallback_rate: config.realtime_fallback_rate,
        };
        clock.set_speed(config.initial_speed);
        clock
    }

    pub fn simulated_date(&self) -> DateTime<Utc> {
        self.simulated_date
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Set the speed multiplier, clamped to `0..=max_speed`.
    pub fn set_speed(&mut self, speed: f64) {
        if speed.is_nan() {
            log::debug!("Ignoring NaN speed");
            return;
        }
        self.speed = speed.clamp(0.0, self.max_speed);
    }

    /// Nudge the speed by `steps` multiples of the configured step.
    pub fn adjust_speed(&mut self, steps: f64) {
        self.set_speed(self.speed + steps * self.speed_step);
    }

    /// Angular rate multiplier for one tick at the current speed.
    pub fn rate(&self) -> f64 {
        if self.speed == 0.0 {
            self.fallback_rate
        } else {
            self.speed
        }
    }

    /// Simulated time one tick advances at the current speed.
    pub fn tick_duration(&self) -> TimeDelta {
        let ms = self.base_tick_ms * self.speed / self.ticks_per_second;
        TimeDelta::try_milliseconds(ms.round() as i64).unwrap_or(TimeDelta::MAX)
    }

    /// Advance one tick. Returns the angular rate to apply to every body, or
    /// `None` while paused.
    pub fn tick(&mut self, wall: &dyn WallClock) -> Option<f64> {
        if self.paused {
            return None;
        }

        if self.speed == 0.0 {
            self.simulated_date = wall.now();
        } else {
            match self.simulated_date.checked_add_signed(self.tick_duration()) {
                Some(date) => self.simulated_date = date,
                None => log::warn!(
                    "Simulated date overflowed at {}; holding",
                    self.simulated_date
                ),
            }
        }

        Some(self.rate())
    }
}
