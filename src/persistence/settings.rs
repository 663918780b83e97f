use super::store::{keys, KvStore};
use crate::domain::DEFAULT_DURATION_MINUTES;
use anyhow::Result;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_session_minutes() -> u64 {
    DEFAULT_DURATION_MINUTES
}

/// User preferences stored under the `settings` key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Desktop notifications when a countdown finishes
    #[serde(default = "default_true")]
    pub timer_alerts: bool,

    /// Terminal bell when a countdown finishes
    #[serde(default = "default_true")]
    pub sound: bool,

    /// Show the remaining time in the terminal window title
    #[serde(default = "default_true")]
    pub window_title: bool,

    /// Length a fresh focus session starts with. Set with `focus session default <MIN>`.
    #[serde(default = "default_session_minutes")]
    pub default_session_minutes: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timer_alerts: true,
            sound: true,
            window_title: true,
            default_session_minutes: DEFAULT_DURATION_MINUTES,
        }
    }
}

/// Load settings from the store
pub fn load_settings(store: &KvStore) -> Settings {
    store.load(keys::SETTINGS, Settings::default())
}

/// Save settings to the store
pub fn save_settings(store: &KvStore, settings: &Settings) -> Result<()> {
    store.save(keys::SETTINGS, settings)
}
