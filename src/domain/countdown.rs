use crate::error::FocusError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Default countdown length in minutes
pub const DEFAULT_DURATION_MINUTES: u64 = 25;

/// Accepted range for user-entered durations (minutes)
pub const MIN_DURATION_MINUTES: u64 = 1;
pub const MAX_DURATION_MINUTES: u64 = 300;

/// Quick presets offered next to the custom input
pub const PRESET_MINUTES: [u64; 3] = [5, 15, 25];

/// Parse a user-entered duration in minutes.
pub fn parse_minutes(input: &str) -> Result<u64, FocusError> {
    let trimmed = input.trim();
    let value: u64 = trimmed
        .parse()
        .map_err(|_| FocusError::NotANumber(trimmed.to_string()))?;

    if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&value) {
        return Err(FocusError::DurationOutOfRange {
            value,
            min: MIN_DURATION_MINUTES,
            max: MAX_DURATION_MINUTES,
        });
    }

    Ok(value)
}

/// Parse a duration, falling back to the 25 minute default on bad input
pub fn minutes_or_default(input: &str) -> u64 {
    match parse_minutes(input) {
        Ok(minutes) => minutes,
        Err(e) => {
            warn!(input, error = %e, "Invalid duration, using default");
            DEFAULT_DURATION_MINUTES
        }
    }
}

/// Clamp an already-numeric duration into the accepted range
pub fn clamp_minutes(minutes: u64) -> u64 {
    if (MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&minutes) {
        minutes
    } else {
        DEFAULT_DURATION_MINUTES
    }
}

/// Seconds left after running from `start` until `now`, counting down from `baseline`.
///
/// Whole elapsed seconds are subtracted; a `now` before `start` counts as no
/// time elapsed, and the result never goes below zero.
pub fn remaining_after(baseline: u64, start: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let elapsed_ms = now.signed_duration_since(start).num_milliseconds().max(0);
    let elapsed_secs = (elapsed_ms / 1000) as u64;
    baseline.saturating_sub(elapsed_secs)
}

/// A countdown as seen at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection {
    /// Seconds left
    pub remaining_secs: u64,
    /// Full length of the countdown (denominator for progress)
    pub total_secs: u64,
    /// Whether the countdown is running at this instant
    pub running: bool,
}

impl Projection {
    pub fn minutes(&self) -> u64 {
        self.remaining_secs / 60
    }

    pub fn seconds(&self) -> u64 {
        self.remaining_secs % 60
    }

    /// Zero-padded "MM:SS"
    pub fn clock(&self) -> String {
        format!("{:02}:{:02}", self.minutes(), self.seconds())
    }

    /// "M:SS", as used in the focus mode title
    pub fn short_clock(&self) -> String {
        format!("{}:{:02}", self.minutes(), self.seconds())
    }

    /// Fraction of the countdown still left, in [0, 1]
    pub fn progress(&self) -> f64 {
        if self.total_secs == 0 {
            return 0.0;
        }
        (self.remaining_secs as f64 / self.total_secs as f64).clamp(0.0, 1.0)
    }

    /// Fraction already used up, in [0, 1]
    pub fn elapsed_fraction(&self) -> f64 {
        1.0 - self.progress()
    }

    pub fn is_zero(&self) -> bool {
        self.remaining_secs == 0
    }
}

/// Shared shape of the pomodoro timer and the blocking session.
///
/// The display driver only needs these three operations to poll either one.
pub trait Countdown {
    fn is_running(&self) -> bool;

    /// Pure projection of the remaining time at `now`
    fn project(&self, now: DateTime<Utc>) -> Projection;

    /// Finish a running countdown whose projection reached zero.
    /// Returns false (and changes nothing) otherwise.
    fn complete(&mut self, now: DateTime<Utc>) -> bool;
}

/// Persisted state of the pomodoro timer.
///
/// While running, remaining time is always derived from `start_instant` and
/// `baseline_remaining_seconds`; the baseline only holds the remaining time
/// directly when the timer is stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownState {
    pub is_running: bool,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub start_instant: Option<DateTime<Utc>>,
    pub baseline_remaining_seconds: u64,
    pub configured_duration_seconds: u64,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_completion_instant: Option<DateTime<Utc>>,
}

impl Default for CountdownState {
    fn default() -> Self {
        Self::with_minutes(DEFAULT_DURATION_MINUTES)
    }
}

impl CountdownState {
    /// Idle countdown of `minutes`, ready to start
    pub fn with_minutes(minutes: u64) -> Self {
        let seconds = minutes * 60;
        Self {
            is_running: false,
            start_instant: None,
            baseline_remaining_seconds: seconds,
            configured_duration_seconds: seconds,
            last_completion_instant: None,
        }
    }

    /// Repair a record read from storage so the invariants hold again
    pub fn normalized(mut self) -> Self {
        if self.configured_duration_seconds == 0 {
            warn!("Stored timer has no duration, resetting to default");
            return Self::default();
        }

        match (self.is_running, self.start_instant) {
            (true, None) => {
                warn!("Stored timer is running without a start instant, stopping it");
                self.is_running = false;
            }
            (false, Some(_)) => {
                self.start_instant = None;
            }
            _ => {}
        }

        if self.baseline_remaining_seconds > self.configured_duration_seconds {
            self.baseline_remaining_seconds = self.configured_duration_seconds;
        }

        self
    }

    pub fn configured_minutes(&self) -> u64 {
        self.configured_duration_seconds / 60
    }

    /// Start counting down. No-op while running or when nothing is left.
    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_running || self.baseline_remaining_seconds == 0 {
            return false;
        }
        self.is_running = true;
        self.start_instant = Some(now);
        debug!(remaining = self.baseline_remaining_seconds, "Timer started");
        true
    }

    /// Freeze the projected remaining time into the baseline. No-op while idle.
    pub fn pause(&mut self, now: DateTime<Utc>) -> bool {
        if !self.is_running {
            return false;
        }
        let remaining = self.project(now).remaining_secs;
        self.baseline_remaining_seconds = remaining;
        self.is_running = false;
        self.start_instant = None;
        debug!(remaining, "Timer paused");
        true
    }

    /// Start when idle, pause when running
    pub fn toggle(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_running {
            self.pause(now)
        } else {
            self.start(now)
        }
    }

    /// Stop and refill to the configured duration
    pub fn reset(&mut self) {
        self.baseline_remaining_seconds = self.configured_duration_seconds;
        self.is_running = false;
        self.start_instant = None;
        debug!(seconds = self.configured_duration_seconds, "Timer reset");
    }

    /// Change the duration (out-of-range values fall back to 25 minutes), then reset
    pub fn reconfigure(&mut self, minutes: u64) {
        self.configured_duration_seconds = clamp_minutes(minutes) * 60;
        self.reset();
    }

    /// Reconfigure from raw user input
    pub fn reconfigure_from_input(&mut self, input: &str) {
        self.reconfigure(minutes_or_default(input));
    }
}

impl Countdown for CountdownState {
    fn is_running(&self) -> bool {
        self.is_running
    }

    fn project(&self, now: DateTime<Utc>) -> Projection {
        let remaining = match (self.is_running, self.start_instant) {
            (true, Some(start)) => remaining_after(self.baseline_remaining_seconds, start, now),
            _ => self.baseline_remaining_seconds,
        };

        Projection {
            remaining_secs: remaining.min(self.configured_duration_seconds),
            total_secs: self.configured_duration_seconds,
            running: self.is_running,
        }
    }

    fn complete(&mut self, now: DateTime<Utc>) -> bool {
        if !self.is_running || !self.project(now).is_zero() {
            return false;
        }
        self.is_running = false;
        self.start_instant = None;
        self.baseline_remaining_seconds = 0;
        self.last_completion_instant = Some(now);
        debug!("Timer completed");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
    }

    fn at(secs: i64) -> DateTime<Utc> {
        t0() + Duration::seconds(secs)
    }

    #[test]
    fn test_default_is_idle_25_minutes() {
        let state = CountdownState::default();
        assert!(!state.is_running);
        assert!(state.start_instant.is_none());
        assert_eq!(state.configured_duration_seconds, 1500);
        assert_eq!(state.baseline_remaining_seconds, 1500);
    }

    #[test]
    fn test_parse_minutes() {
        assert_eq!(parse_minutes("10"), Ok(10));
        assert_eq!(parse_minutes(" 300 "), Ok(300));
        assert_eq!(
            parse_minutes("abc"),
            Err(FocusError::NotANumber("abc".to_string()))
        );
        assert!(matches!(
            parse_minutes("0"),
            Err(FocusError::DurationOutOfRange { value: 0, .. })
        ));
        assert!(matches!(
            parse_minutes("301"),
            Err(FocusError::DurationOutOfRange { value: 301, .. })
        ));
        assert!(parse_minutes("-5").is_err());
    }

    #[test]
    fn test_minutes_or_default() {
        assert_eq!(minutes_or_default("45"), 45);
        assert_eq!(minutes_or_default(""), 25);
        assert_eq!(minutes_or_default("lots"), 25);
        assert_eq!(minutes_or_default("1000"), 25);
    }

    #[test]
    fn test_remaining_after_floors_partial_seconds() {
        let start = t0();
        let now = start + Duration::milliseconds(2_999);
        assert_eq!(remaining_after(100, start, now), 98);
    }

    #[test]
    fn test_remaining_after_ignores_clock_going_backwards() {
        assert_eq!(remaining_after(100, t0(), at(-30)), 100);
    }

    #[test]
    fn test_projection_split_and_clock() {
        let state = CountdownState {
            baseline_remaining_seconds: 754,
            ..CountdownState::default()
        };
        let p = state.project(t0());
        assert_eq!(p.minutes(), 12);
        assert_eq!(p.seconds(), 34);
        assert_eq!(p.clock(), "12:34");
        assert_eq!(p.short_clock(), "12:34");

        let small = Projection {
            remaining_secs: 65,
            total_secs: 300,
            running: true,
        };
        assert_eq!(small.clock(), "01:05");
        assert_eq!(small.short_clock(), "1:05");
    }

    #[test]
    fn test_projection_progress_is_clamped() {
        let half = Projection {
            remaining_secs: 750,
            total_secs: 1500,
            running: true,
        };
        assert_eq!(half.progress(), 0.5);
        assert_eq!(half.elapsed_fraction(), 0.5);

        let empty_total = Projection {
            remaining_secs: 10,
            total_secs: 0,
            running: false,
        };
        assert_eq!(empty_total.progress(), 0.0);
    }

    #[test]
    fn test_idle_projection_is_baseline() {
        let state = CountdownState {
            baseline_remaining_seconds: 321,
            ..CountdownState::default()
        };
        assert_eq!(state.project(at(10_000)).remaining_secs, 321);
    }

    #[test]
    fn test_monotonic_while_running() {
        let mut state = CountdownState::default();
        state.start(t0());

        let mut previous = state.project(t0()).remaining_secs;
        for secs in (0..2000).step_by(7) {
            let remaining = state.project(at(secs)).remaining_secs;
            assert!(remaining <= previous, "time ran backwards at +{}s", secs);
            assert!(remaining <= state.configured_duration_seconds);
            previous = remaining;
        }
        assert_eq!(previous, 0);
    }

    #[test]
    fn test_never_negative_after_long_suspension() {
        let mut state = CountdownState::default();
        state.start(t0());
        assert_eq!(state.project(at(3600)).remaining_secs, 0);
        assert_eq!(state.project(at(86_400 * 30)).remaining_secs, 0);
    }

    #[test]
    fn test_bound_holds_for_corrupt_baseline() {
        let state = CountdownState {
            is_running: true,
            start_instant: Some(t0()),
            baseline_remaining_seconds: 9_999,
            configured_duration_seconds: 600,
            last_completion_instant: None,
        };
        assert_eq!(state.project(at(5)).remaining_secs, 600);
    }

    #[test]
    fn test_pause_resume_fidelity() {
        let mut state = CountdownState::default();
        assert!(state.start(t0()));

        assert!(state.pause(at(70)));
        assert_eq!(state.baseline_remaining_seconds, 1430);
        assert!(!state.is_running);
        assert!(state.start_instant.is_none());

        assert!(state.start(at(200)));
        assert_eq!(state.project(at(300)).remaining_secs, 1330);
    }

    #[test]
    fn test_start_guards() {
        let mut state = CountdownState::default();
        assert!(state.start(t0()));
        // Already running: start instant must not move
        assert!(!state.start(at(30)));
        assert_eq!(state.start_instant, Some(t0()));

        let mut empty = CountdownState {
            baseline_remaining_seconds: 0,
            ..CountdownState::default()
        };
        assert!(!empty.start(t0()));
        assert!(!empty.is_running);
    }

    #[test]
    fn test_pause_when_idle_is_noop() {
        let mut state = CountdownState::default();
        let before = state.clone();
        assert!(!state.pause(at(10)));
        assert_eq!(state, before);
    }

    #[test]
    fn test_toggle() {
        let mut state = CountdownState::default();
        assert!(state.toggle(t0()));
        assert!(state.is_running);
        assert!(state.toggle(at(60)));
        assert!(!state.is_running);
        assert_eq!(state.baseline_remaining_seconds, 1440);
    }

    #[test]
    fn test_reset_from_running() {
        let mut state = CountdownState::default();
        state.start(t0());
        state.reset();
        assert!(!state.is_running);
        assert!(state.start_instant.is_none());
        assert_eq!(state.baseline_remaining_seconds, 1500);
    }

    #[test]
    fn test_reconfigure_while_running_resets_baseline() {
        let mut state = CountdownState::default();
        state.start(t0());

        state.reconfigure(10);

        assert!(!state.is_running);
        assert!(state.start_instant.is_none());
        assert_eq!(state.configured_duration_seconds, 600);
        assert_eq!(state.baseline_remaining_seconds, 600);
    }

    #[test]
    fn test_reconfigure_from_bad_input_uses_default() {
        let mut state = CountdownState::with_minutes(5);
        state.reconfigure_from_input("ten");
        assert_eq!(state.configured_duration_seconds, 1500);

        state.reconfigure_from_input("0");
        assert_eq!(state.configured_duration_seconds, 1500);

        state.reconfigure_from_input("90");
        assert_eq!(state.configured_duration_seconds, 5400);
    }

    #[test]
    fn test_complete_only_at_zero_while_running() {
        let mut state = CountdownState::with_minutes(1);
        assert!(!state.complete(at(100)), "idle countdown cannot complete");

        state.start(t0());
        assert!(!state.complete(at(59)));
        assert!(state.is_running);

        assert!(state.complete(at(60)));
        assert!(!state.is_running);
        assert!(state.start_instant.is_none());
        assert_eq!(state.baseline_remaining_seconds, 0);
        assert_eq!(state.last_completion_instant, Some(at(60)));

        // Second completion is a no-op
        assert!(!state.complete(at(61)));
        assert_eq!(state.last_completion_instant, Some(at(60)));
    }

    #[test]
    fn test_completed_timer_needs_reset_before_start() {
        let mut state = CountdownState::with_minutes(1);
        state.start(t0());
        state.complete(at(60));

        assert!(!state.start(at(61)));
        state.reset();
        assert!(state.start(at(62)));
    }

    #[test]
    fn test_json_shape_round_trips_through_storage() {
        let mut state = CountdownState::default();
        state.start(t0());

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["isRunning"], true);
        assert_eq!(json["startInstant"], t0().timestamp_millis());
        assert_eq!(json["baselineRemainingSeconds"], 1500);
        assert_eq!(json["configuredDurationSeconds"], 1500);

        let back: CountdownState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_missing_optional_fields_deserialize() {
        let json = r#"{"isRunning":false,"baselineRemainingSeconds":90,"configuredDurationSeconds":300}"#;
        let state: CountdownState = serde_json::from_str(json).unwrap();
        assert_eq!(state.start_instant, None);
        assert_eq!(state.last_completion_instant, None);
        assert_eq!(state.baseline_remaining_seconds, 90);
    }

    #[test]
    fn test_normalized_repairs_invariants() {
        let running_without_start = CountdownState {
            is_running: true,
            start_instant: None,
            baseline_remaining_seconds: 100,
            configured_duration_seconds: 300,
            last_completion_instant: None,
        }
        .normalized();
        assert!(!running_without_start.is_running);
        assert_eq!(running_without_start.baseline_remaining_seconds, 100);

        let idle_with_start = CountdownState {
            is_running: false,
            start_instant: Some(t0()),
            ..CountdownState::default()
        }
        .normalized();
        assert!(idle_with_start.start_instant.is_none());

        let zero_duration = CountdownState {
            configured_duration_seconds: 0,
            ..CountdownState::default()
        }
        .normalized();
        assert_eq!(zero_duration, CountdownState::default());

        let oversized = CountdownState {
            baseline_remaining_seconds: 5000,
            configured_duration_seconds: 600,
            ..CountdownState::default()
        }
        .normalized();
        assert_eq!(oversized.baseline_remaining_seconds, 600);
    }
}
