//! Interval timers for generation and display cadence

use std::time::{Duration, Instant};

/// A drift-tolerant interval timer.
///
/// Elapsed wall time accumulates on `tick`; `reset` subtracts one period
/// instead of zeroing the accumulator, so a slow frame does not starve the
/// configured rate.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period: Duration,
    acc: Duration,
    last: Instant,
}

impl IntervalTimer {
    pub fn new(period_seconds: f32) -> Self {
        Self {
            period: to_period(period_seconds),
            acc: Duration::ZERO,
            last: Instant::now(),
        }
    }

    /// Change the firing period without losing accumulated time.
    pub fn set(&mut self, period_seconds: f32) {
        self.period = to_period(period_seconds);
    }

    /// Advance by the wall time elapsed since the previous tick.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.acc += now.duration_since(self.last);
        self.last = now;
    }

    /// Advance by an explicit duration, for headless stepping and tests.
    pub fn advance(&mut self, elapsed: Duration) {
        self.acc += elapsed;
    }

    pub fn is_ready(&self) -> bool {
        self.acc >= self.period
    }

    /// Consume one period from the accumulator.
    pub fn reset(&mut self) {
        self.acc = self.acc.saturating_sub(self.period);
    }

    /// Accumulated time since the last reset, in seconds.
    pub fn interval(&self) -> f32 {
        self.acc.as_secs_f32()
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

/// Negative, NaN, and overflowing periods collapse to zero (always ready).
fn to_period(seconds: f32) -> Duration {
    Duration::try_from_secs_f32(seconds).unwrap_or(Duration::ZERO)
}
