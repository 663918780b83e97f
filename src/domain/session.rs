use super::countdown::{clamp_minutes, remaining_after, Countdown, Projection, DEFAULT_DURATION_MINUTES};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Persisted focus-mode window.
///
/// A session is binary: it runs until its duration elapses or it is ended by
/// hand. There is no pause, so the remaining time is always derived from the
/// start time and the full duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockingSession {
    pub is_active: bool,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub start_time: Option<DateTime<Utc>>,
    /// Length in minutes
    pub duration: u64,
}

impl Default for BlockingSession {
    fn default() -> Self {
        Self {
            is_active: false,
            start_time: None,
            duration: DEFAULT_DURATION_MINUTES,
        }
    }
}

impl BlockingSession {
    /// Repair a record read from storage
    pub fn normalized(mut self) -> Self {
        if self.is_active && self.start_time.is_none() {
            warn!("Stored focus session is active without a start time, ending it");
            self.is_active = false;
        }
        if !self.is_active {
            self.start_time = None;
        }
        self.duration = clamp_minutes(self.duration);
        self
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration * 60
    }

    /// Begin a fresh session of `minutes`. No-op while a session is active.
    pub fn start(&mut self, minutes: u64, now: DateTime<Utc>) -> bool {
        if self.is_active {
            return false;
        }
        self.duration = clamp_minutes(minutes);
        self.is_active = true;
        self.start_time = Some(now);
        debug!(minutes = self.duration, "Focus session started");
        true
    }

    /// Stop early. The session is discarded, not resumable.
    pub fn end(&mut self) -> bool {
        if !self.is_active {
            return false;
        }
        self.is_active = false;
        self.start_time = None;
        debug!("Focus session ended");
        true
    }

    /// Change the duration for the next session. Locked while active.
    pub fn set_duration(&mut self, minutes: u64) -> bool {
        if self.is_active {
            return false;
        }
        self.duration = clamp_minutes(minutes);
        true
    }
}

impl Countdown for BlockingSession {
    fn is_running(&self) -> bool {
        self.is_active
    }

    fn project(&self, now: DateTime<Utc>) -> Projection {
        let total = self.duration_secs();
        let remaining = match (self.is_active, self.start_time) {
            (true, Some(start)) => remaining_after(total, start, now),
            _ => total,
        };

        Projection {
            remaining_secs: remaining,
            total_secs: total,
            running: self.is_active,
        }
    }

    fn complete(&mut self, now: DateTime<Utc>) -> bool {
        if !self.is_active || !self.project(now).is_zero() {
            return false;
        }
        self.is_active = false;
        self.start_time = None;
        debug!("Focus session elapsed");
        true
    }
}
