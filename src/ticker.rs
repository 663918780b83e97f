use std::time::{Duration, Instant};

/// Display refresh period in milliseconds
pub const DISPLAY_TICK_MS: u64 = 1000;

/// Get the display tick duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DISPLAY_TICK_MS)
}

/// Fixed-rate schedule for the display tick.
///
/// The event loop polls input with `until_next` as its timeout and refreshes
/// when `due` says so. Dropping the ticker is all it takes to stop ticking.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next: Instant,
}

impl Ticker {
    /// First tick is due immediately
    pub fn new(period: Duration, now: Instant) -> Self {
        Self { period, next: now }
    }

    /// Time left until the next tick (zero if overdue)
    pub fn until_next(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }

    /// Whether a tick is due, scheduling the following one if so
    pub fn due(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.period;
        // After a long stall, skip the missed ticks instead of replaying them
        if self.next <= now {
            self.next = now + self.period;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_duration() {
        assert_eq!(tick_duration(), Duration::from_millis(1000));
    }

    #[test]
    fn test_first_tick_is_immediate() {
        let start = Instant::now();
        let mut ticker = Ticker::new(tick_duration(), start);
        assert_eq!(ticker.until_next(start), Duration::ZERO);
        assert!(ticker.due(start));
        assert!(!ticker.due(start));
    }

    #[test]
    fn test_fixed_cadence() {
        let start = Instant::now();
        let mut ticker = Ticker::new(tick_duration(), start);
        ticker.due(start);

        let almost = start + Duration::from_millis(999);
        assert!(!ticker.due(almost));
        assert_eq!(ticker.until_next(almost), Duration::from_millis(1));

        // A late check doesn't push the schedule back
        assert!(ticker.due(start + Duration::from_millis(1200)));
        assert_eq!(
            ticker.until_next(start + Duration::from_millis(1200)),
            Duration::from_millis(800)
        );
    }

    #[test]
    fn test_stall_skips_missed_ticks() {
        let start = Instant::now();
        let mut ticker = Ticker::new(tick_duration(), start);
        ticker.due(start);

        let later = start + Duration::from_secs(30);
        assert!(ticker.due(later));
        assert!(!ticker.due(later + Duration::from_millis(500)));
    }
}
