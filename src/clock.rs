use chrono::{DateTime, Utc};

/// Source of wall-clock time for the countdowns.
///
/// Everything that projects remaining time asks the clock instead of calling
/// `Utc::now()` directly, so tests can move time forward without sleeping.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// The real wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
pub use manual::ManualClock;
