//! Simulation clock: maps real elapsed time onto simulated time.

use spooler_shared::SimTime;
use std::time::{Duration, Instant};

const MICROS_PER_MILLI: u64 = 1_000;
const TICK_MICROS: u64 = 1_000_000;

#[derive(Debug, Clone)]
pub struct SimClock {
    start_us: u64,
    /// Total real time fed in so far; simulated time is derived from it
    real_elapsed: Duration,
    /// Simulated time in microseconds since simulated midnight
    simulated_us: u64,
    /// Marker of the last per-second tick handed out
    last_tick_us: u64,
    speed_multiplier: f64,
    real_anchor: Option<Instant>,
}

impl SimClock {
    /// Clock starting at `start` that runs `speed_multiplier` simulated seconds
    /// per real second.
    pub fn new(start: SimTime, speed_multiplier: f64) -> Self {
        debug_assert!(speed_multiplier > 0.0, "speed multiplier must be positive");
        let start_us = start.as_millis() * MICROS_PER_MILLI;
        Self {
            start_us,
            real_elapsed: Duration::ZERO,
            simulated_us: start_us,
            last_tick_us: start_us,
            speed_multiplier,
            real_anchor: None,
        }
    }

    /// Move simulated time forward by `real_elapsed * speed_multiplier`.
    ///
    /// Scaling is applied to the running real total, not to each delta, so
    /// sub-microsecond fractions carry over between calls.
    pub fn advance(&mut self, real_elapsed: Duration) {
        self.real_elapsed = self.real_elapsed.saturating_add(real_elapsed);
        let scaled = (self.real_elapsed.as_micros() as f64 * self.speed_multiplier).round() as u64;
        let simulated_us = self.start_us.saturating_add(scaled);
        // f64 rounding must never move time backwards
        self.simulated_us = self.simulated_us.max(simulated_us);
        tracing::trace!(simulated = %self.now(), "clock advanced");
    }

    /// Advance by the real time elapsed since the previous `sync`.
    ///
    /// The first call only records the anchor.
    pub fn sync(&mut self, real_now: Instant) {
        if let Some(anchor) = self.real_anchor {
            self.advance(real_now.saturating_duration_since(anchor));
        }
        self.real_anchor = Some(real_now);
    }

    pub fn now(&self) -> SimTime {
        SimTime::from_millis(self.simulated_us / MICROS_PER_MILLI)
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    /// Instant of the next pending per-second tick, if a whole simulated second
    /// has passed since the previous one. Each call consumes one tick, so a
    /// large jump yields several ticks one second apart.
    pub fn next_tick(&mut self) -> Option<SimTime> {
        if self.simulated_us.saturating_sub(self.last_tick_us) >= TICK_MICROS {
            self.last_tick_us += TICK_MICROS;
            Some(SimTime::from_millis(self.last_tick_us / MICROS_PER_MILLI))
        } else {
            None
        }
    }

    /// Instant of the next tick without consuming it.
    pub fn peek_tick(&self) -> Option<SimTime> {
        if self.simulated_us.saturating_sub(self.last_tick_us) >= TICK_MICROS {
            Some(SimTime::from_millis((self.last_tick_us + TICK_MICROS) / MICROS_PER_MILLI))
        } else {
            None
        }
    }

    pub fn second_elapsed_since_last_tick(&mut self) -> bool {
        self.next_tick().is_some()
    }

    /// Simulated time of day as `HH:MM:SS`.
    pub fn formatted_time_of_day(&self) -> String {
        self.now().to_string()
    }
}
