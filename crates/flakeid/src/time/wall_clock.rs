use crate::TimeSource;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Snowflake epoch: Monday, January 1, 2024 00:00:00 UTC
pub const SNOWFLAKE_EPOCH: Duration = Duration::from_millis(1_704_067_200_000);

/// Unix epoch: Thursday, January 1, 1970 00:00:00 UTC
pub const UNIX_EPOCH_MS: Duration = Duration::from_millis(0);

/// A wall-clock time source that returns milliseconds elapsed since a
/// user-defined epoch.
///
/// Every call queries `SystemTime::now()`, so external adjustments to the
/// system clock (e.g., NTP corrections) are visible to callers. That is
/// deliberate: a generator built on this clock can detect a regression and
/// report it instead of emitting out-of-order IDs.
#[derive(Clone, Debug)]
pub struct WallClock {
    epoch_millis: u64,
}

impl Default for WallClock {
    /// Constructs a wall clock aligned to the default [`SNOWFLAKE_EPOCH`].
    ///
    /// Panics if system time is earlier than the epoch.
    fn default() -> Self {
        Self::with_epoch(SNOWFLAKE_EPOCH)
    }
}

impl WallClock {
    /// Constructs a wall clock using a custom epoch as the origin (t = 0),
    /// specified as a [`Duration`] since 1970-01-01 UTC.
    ///
    /// The provided epoch defines the zero-point for all timestamps returned
    /// by this clock, which in turn controls the zero-point of the 41-bit
    /// timestamp field in generated IDs.
    ///
    /// # Panics
    ///
    /// Panics if the current system time is earlier than the given epoch.
    ///
    /// # Example
    ///
    /// ```
    /// use flakeid::{SNOWFLAKE_EPOCH, TimeSource, WallClock};
    ///
    /// let clock = WallClock::with_epoch(SNOWFLAKE_EPOCH);
    /// assert!(clock.current_millis() > 0);
    /// ```
    #[must_use]
    pub fn with_epoch(epoch: Duration) -> Self {
        let system_now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before UNIX_EPOCH");
        system_now
            .checked_sub(epoch)
            .expect("system clock before custom epoch");

        Self {
            epoch_millis: epoch.as_millis() as u64,
        }
    }
}

impl TimeSource for WallClock {
    fn current_millis(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as u64);
        // Saturating: a clock stepped back past the epoch reads as 0, which
        // the generator reports as a regression rather than underflowing.
        now.saturating_sub(self.epoch_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_epoch_is_2024() {
        assert_eq!(SNOWFLAKE_EPOCH.as_millis(), 1_704_067_200_000);
    }

    #[test]
    fn clock_advances() {
        let clock = WallClock::default();
        let a = clock.current_millis();
        std::thread::sleep(Duration::from_millis(2));
        let b = clock.current_millis();
        assert!(b > a);
    }

    #[test]
    fn epoch_offset_applies() {
        let since_unix = WallClock::with_epoch(UNIX_EPOCH_MS).current_millis();
        let since_snowflake = WallClock::default().current_millis();
        let delta = since_unix - since_snowflake;
        // Both reads happen within a small window, so the difference is the
        // epoch offset give or take a few milliseconds.
        assert!(delta.abs_diff(SNOWFLAKE_EPOCH.as_millis() as u64) < 1_000);
    }
}
