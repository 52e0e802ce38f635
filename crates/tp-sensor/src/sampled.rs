//! Fixed-cadence timing primitives for the sampling loop.
//!
//! The loop samples on a fixed period. Deadlines advance by whole periods so
//! time spent acquiring and reporting does not stretch the cadence.

use crate::model::SensorConfig;
use std::time::{Duration, Instant};
use tp_core::{TpError, TpResult};

/// Sample configuration for the acquisition loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleConfig {
    /// Sample period.
    pub interval: Duration,
}

impl SampleConfig {
    /// Create a new sample configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArg` if `interval` is zero.
    pub fn new(interval: Duration) -> TpResult<Self> {
        if interval.is_zero() {
            return Err(TpError::InvalidArg {
                what: "sample interval must be positive",
            });
        }
        Ok(Self { interval })
    }
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            interval: SensorConfig::GROVE_V1_2.sample_interval(),
        }
    }
}

/// Sample clock tracks when the next sample is due.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleClock {
    /// Sample configuration.
    pub config: SampleConfig,
    /// Instant of next scheduled sample.
    pub next_sample_time: Instant,
}

impl SampleClock {
    /// Start a clock whose first deadline is one period after `now`.
    pub fn new(config: SampleConfig, now: Instant) -> Self {
        Self {
            config,
            next_sample_time: now + config.interval,
        }
    }

    /// Check if a sample is due at `now`.
    pub fn should_sample(&self, now: Instant) -> bool {
        now >= self.next_sample_time
    }

    /// Advance to the next deadline.
    ///
    /// Should be called after a sample has been taken. If the loop has fallen
    /// more than a period behind, the clock re-anchors on `now` rather than
    /// firing a burst of catch-up samples.
    pub fn advance(&mut self, now: Instant) {
        self.next_sample_time += self.config.interval;
        if self.next_sample_time <= now {
            self.next_sample_time = now + self.config.interval;
        }
    }

    /// Reset the clock to start from `now`.
    pub fn reset(&mut self, now: Instant) {
        self.next_sample_time = now + self.config.interval;
    }

    /// Get the time until the next sample.
    pub fn time_until_sample(&self, now: Instant) -> Duration {
        self.next_sample_time.saturating_duration_since(now)
    }
}

/// Source of time and blocking delay for the sampling loop.
pub trait Timer {
    fn now(&self) -> Instant;

    /// Block the calling thread for `duration`.
    fn sleep(&mut self, duration: Duration);
}

impl<T: Timer + ?Sized> Timer for &mut T {
    fn now(&self) -> Instant {
        (**self).now()
    }

    fn sleep(&mut self, duration: Duration) {
        (**self).sleep(duration)
    }
}

/// Wall-clock timer backed by `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimer;

impl Timer for SystemTimer {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
