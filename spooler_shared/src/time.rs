//! Simulated timestamps.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const MILLIS_PER_SECOND: u64 = 1_000;
pub const MILLIS_PER_MINUTE: u64 = MILLIS_PER_SECOND * 60;
pub const MILLIS_PER_HOUR: u64 = MILLIS_PER_MINUTE * 60;
pub const MILLIS_PER_DAY: u64 = MILLIS_PER_HOUR * 24;

/// A point on the simulated timeline, in milliseconds.
///
/// The origin is midnight of the simulated start day, so `Display` renders the
/// time of day directly. Timestamps past one day keep counting up and the
/// rendered time wraps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimTime(u64);

impl SimTime {
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub const fn from_secs(secs: u64) -> Self {
        Self(secs * MILLIS_PER_SECOND)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    pub fn plus_millis(self, millis: u64) -> Self {
        Self(self.0.saturating_add(millis))
    }

    /// Milliseconds from `earlier` to `self`, zero if `earlier` is later.
    pub fn millis_since(self, earlier: SimTime) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// `(hours, minutes, seconds)` of the time of day.
    pub fn time_of_day(self) -> (u64, u64, u64) {
        let today = self.0 % MILLIS_PER_DAY;
        let hours = today / MILLIS_PER_HOUR;
        let minutes = (today % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE;
        let seconds = (today % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND;
        (hours, minutes, seconds)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.time_of_day();
        write!(f, "{:02}:{:02}:{:02}", h, m, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_zero_pads() {
        assert_eq!(SimTime::from_millis(0).to_string(), "00:00:00");
        assert_eq!(SimTime::from_secs(3_661).to_string(), "01:01:01");
        // Sub-second remainder is truncated
        assert_eq!(SimTime::from_millis(59_999).to_string(), "00:00:59");
    }

    #[test]
    fn test_display_wraps_at_midnight() {
        let late = SimTime::from_secs(23 * 3_600 + 59 * 60 + 59);
        assert_eq!(late.to_string(), "23:59:59");
        assert_eq!(late.plus_millis(1_000).to_string(), "00:00:00");
        assert_eq!(SimTime::from_secs(2 * 86_400 + 30).to_string(), "00:00:30");
    }

    #[test]
    fn test_millis_since_saturates() {
        let a = SimTime::from_secs(10);
        let b = SimTime::from_secs(12);
        assert_eq!(b.millis_since(a), 2_000);
        assert_eq!(a.millis_since(b), 0);
    }
}
