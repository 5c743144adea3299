use spooler_shared::TimeSource;
use std::time::{Duration, Instant};

/// Real host time: `std::time::Instant` and a blocking thread sleep.
#[derive(Debug, Default)]
pub struct StdTimeSource;

impl TimeSource for StdTimeSource {
    fn now_monotonic(&mut self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration)
        }
    }
}

/// Step used when `ManualTimeSource::new` is given a zero step.
pub const DEFAULT_MANUAL_STEP: Duration = Duration::from_millis(1);

/// Virtual host time for deterministic runs.
///
/// Time stands still until `sleep` is called; every `sleep` moves the virtual
/// instant forward by the fixed `step`, whatever duration was requested.
#[derive(Debug, Clone)]
pub struct ManualTimeSource {
    now: Instant,
    step: Duration,
}

impl ManualTimeSource {
    /// A zero `step` would freeze the run, so it is replaced by [`DEFAULT_MANUAL_STEP`].
    pub fn new(step: Duration) -> Self {
        let step = if step.is_zero() { DEFAULT_MANUAL_STEP } else { step };
        Self {
            now: Instant::now(),
            step,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn advance(&mut self, delta: Duration) {
        self.now += delta;
    }
}

impl TimeSource for ManualTimeSource {
    fn now_monotonic(&mut self) -> Instant {
        self.now
    }

    fn sleep(&mut self, _duration: Duration) {
        self.now += self.step;
    }
}
