use crate::domain::{Countdown, Projection};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use crossterm::{execute, terminal::SetTitle};
use std::io;
use tracing::{debug, info};

/// Window title shown when no countdown is driving it
pub const BASELINE_TITLE: &str = "FOCUS";

/// What one display tick saw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub projection: Projection,
    /// The countdown hit zero on this tick and was completed
    pub completed: bool,
    /// Title to show, None when the countdown isn't running
    pub title: Option<String>,
}

/// Polls one countdown: projects it, completes it at zero, and formats its title.
///
/// The driver holds no timing state of its own. Everything is re-derived from
/// the countdown on each call, so it can be dropped and recreated freely.
#[derive(Clone, Copy)]
pub struct DisplayDriver {
    label: &'static str,
    format_title: fn(&Projection) -> String,
}

impl DisplayDriver {
    pub fn timer() -> Self {
        Self {
            label: "timer",
            format_title: |p| format!("⏱ {} remaining - FOCUS", p.clock()),
        }
    }

    pub fn session() -> Self {
        Self {
            label: "focus session",
            format_title: |p| format!("🚫 Focus Mode: {} - FOCUS", p.short_clock()),
        }
    }

    /// Re-project `countdown` at `now`, completing it if it just ran out
    pub fn tick<C: Countdown>(&self, countdown: &mut C, now: DateTime<Utc>) -> Tick {
        let projection = countdown.project(now);

        if countdown.is_running() && projection.is_zero() {
            // complete() re-checks the running flag, so a second poll is a no-op
            let completed = countdown.complete(now);
            if completed {
                info!(countdown = self.label, "Countdown finished");
            }
            return Tick {
                projection: countdown.project(now),
                completed,
                title: None,
            };
        }

        let title = countdown
            .is_running()
            .then(|| (self.format_title)(&projection));

        Tick {
            projection,
            completed: false,
            title,
        }
    }
}

/// Somewhere a window title can be written
pub trait TitleSink {
    fn set_title(&mut self, title: &str) -> Result<()>;
}

/// Writes the terminal window title through crossterm
#[derive(Debug, Default)]
pub struct TerminalTitle;

impl TitleSink for TerminalTitle {
    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(io::stdout(), SetTitle(title)).context("Failed to set terminal title")
    }
}

/// Owns the window title while the dashboard runs and puts the baseline back on drop
pub struct TitleGuard<S: TitleSink> {
    sink: S,
    baseline: String,
    current: Option<String>,
}

impl<S: TitleSink> TitleGuard<S> {
    pub fn new(sink: S, baseline: &str) -> Self {
        let mut guard = Self {
            sink,
            baseline: baseline.to_string(),
            current: None,
        };
        guard.write(baseline.to_string());
        guard
    }

    /// Show `title`, or the baseline for None. Unchanged titles aren't rewritten.
    pub fn show(&mut self, title: Option<&str>) {
        match title {
            Some(title) if self.current.as_deref() != Some(title) => {
                self.current = Some(title.to_string());
                self.write(title.to_string());
            }
            Some(_) => {}
            None => self.restore(),
        }
    }

    /// Put the baseline title back
    pub fn restore(&mut self) {
        if self.current.take().is_some() {
            self.write(self.baseline.clone());
        }
    }

    fn write(&mut self, title: String) {
        if let Err(e) = self.sink.set_title(&title) {
            debug!(error = %e, "Could not update window title");
        }
    }
}

impl<S: TitleSink> Drop for TitleGuard<S> {
    fn drop(&mut self) {
        self.restore();
    }
}

#[cfg(test)]
pub use recording::RecordingTitle;


#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BlockingSession, CountdownState};
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_tick_running_timer_sets_title() {
        let driver = DisplayDriver::timer();
        let mut timer = CountdownState::default();
        timer.start(t0());

        let tick = driver.tick(&mut timer, t0() + Duration::seconds(61));
        assert_eq!(tick.projection.remaining_secs, 1439);
        assert!(!tick.completed);
        assert_eq!(tick.title.as_deref(), Some("⏱ 23:59 remaining - FOCUS"));
    }

    #[test]
    fn test_tick_idle_timer_has_no_title() {
        let driver = DisplayDriver::timer();
        let mut timer = CountdownState::with_minutes(5);

        let tick = driver.tick(&mut timer, t0());
        assert_eq!(tick.projection.clock(), "05:00");
        assert_eq!(tick.title, None);
    }

    #[test]
    fn test_completion_fires_once_across_polls() {
        let driver = DisplayDriver::timer();
        let mut timer = CountdownState::default();
        timer.start(t0());

        let mut completions = 0;
        for secs in [1499, 1500, 1501, 2000, 9000] {
            let tick = driver.tick(&mut timer, t0() + Duration::seconds(secs));
            if tick.completed {
                completions += 1;
                assert_eq!(secs, 1500);
            }
        }

        assert_eq!(completions, 1);
        assert!(!timer.is_running);
        assert_eq!(timer.last_completion_instant, Some(t0() + Duration::seconds(1500)));
    }

    #[test]
    fn test_reload_survival() {
        let mut timer = CountdownState::default();
        timer.start(t0());
        let json = serde_json::to_string(&timer).unwrap();

        // A fresh driver over a rehydrated record picks up where the old one left off
        let mut rehydrated: CountdownState = serde_json::from_str(&json).unwrap();
        let driver = DisplayDriver::timer();

        let first = driver.tick(&mut rehydrated, t0() + Duration::seconds(1500));
        let second = driver.tick(&mut rehydrated, t0() + Duration::seconds(1501));

        assert_eq!(first.projection.remaining_secs, 0);
        assert!(first.completed);
        assert!(!second.completed);
    }

    #[test]
    fn test_session_title_uses_short_clock() {
        let driver = DisplayDriver::session();
        let mut session = BlockingSession::default();
        session.start(10, t0());

        let tick = driver.tick(&mut session, t0() + Duration::seconds(5));
        assert_eq!(tick.title.as_deref(), Some("🚫 Focus Mode: 9:55 - FOCUS"));
    }

    #[test]
    fn test_session_completes_after_long_gap() {
        let driver = DisplayDriver::session();
        let mut session = BlockingSession::default();
        session.start(1, t0());

        let tick = driver.tick(&mut session, t0() + Duration::hours(5));
        assert!(tick.completed);
        assert_eq!(tick.title, None);
        assert!(!session.is_active);
    }

    #[test]
    fn test_title_guard_skips_repeats_and_restores() {
        let sink = RecordingTitle::default();
        let mut guard = TitleGuard::new(sink.clone(), BASELINE_TITLE);

        guard.show(Some("24:59"));
        guard.show(Some("24:59"));
        guard.show(Some("24:58"));
        assert_eq!(sink.count(), 3);

        guard.show(None);
        assert_eq!(sink.last().as_deref(), Some(BASELINE_TITLE));

        // Already at baseline, nothing more to write
        guard.show(None);
        assert_eq!(sink.count(), 4);
    }

    #[test]
    fn test_title_guard_restores_on_drop() {
        let sink = RecordingTitle::default();
        {
            let mut guard = TitleGuard::new(sink.clone(), BASELINE_TITLE);
            guard.show(Some("🚫 Focus Mode: 9:55 - FOCUS"));
        }
        assert_eq!(sink.last().as_deref(), Some(BASELINE_TITLE));
    }
}
