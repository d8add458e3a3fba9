//! Remaining quiz time.

use std::time::{Duration, Instant};

/// Counts down from the time left reported when the page was loaded.
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    initial: Duration,
    started: Instant,
}

impl Countdown {
    /// Start counting down from `time_left_secs` now.
    ///
    /// A negative value means the quiz is already over.
    pub fn start(time_left_secs: i64) -> Self {
        Self::start_at(time_left_secs, Instant::now())
    }

    /// Start counting down from `time_left_secs` at `started`.
    pub fn start_at(time_left_secs: i64, started: Instant) -> Self {
        let secs = u64::try_from(time_left_secs).unwrap_or(0);
        Self {
            initial: Duration::from_secs(secs),
            started,
        }
    }

    /// Time left at `now`, never below zero.
    pub fn time_left_at(&self, now: Instant) -> Duration {
        self.initial
            .saturating_sub(now.saturating_duration_since(self.started))
    }

    /// Time left now.
    pub fn time_left(&self) -> Duration {
        self.time_left_at(Instant::now())
    }

    /// Whether time has run out.
    pub fn is_over(&self) -> bool {
        self.time_left().is_zero()
    }
}

/// Format a duration as `HH:MM:SS`, dropping sub-second precision.
pub fn format_clock(duration: Duration) -> String {
    let total = duration.as_secs();
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total / 60) % 60,
        total % 60
    )
}
