use super::files::{atomic_write, read_file};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Storage keys used by the dashboard
pub mod keys {
    pub const TIMER: &str = "pomodoroTimer";
    pub const SESSION: &str = "blockingSession";
    pub const SITES: &str = "blockedSites";
    pub const NOTIFICATION_PERMISSION: &str = "notificationPermission";
    pub const SETTINGS: &str = "settings";
}

/// Key-value store keeping one JSON document per key (`<key>.json`).
///
/// Every save replaces the whole document atomically, so a reader never sees
/// half of a record.
#[derive(Debug, Clone)]
pub struct KvStore {
    dir: PathBuf,
}

impl KvStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create store directory: {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Load a value, returning `default` when it is missing or unreadable
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let path = self.path(key);
        let content = match read_file(&path) {
            Ok(Some(content)) => content,
            Ok(None) => return default,
            Err(e) => {
                warn!(key, error = %e, "Could not read stored value, using default");
                return default;
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, path = %path.display(), error = %e, "Stored value is malformed, using default");
                default
            }
        }
    }

    /// Replace the stored value for `key`
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)
            .with_context(|| format!("Failed to serialize {}", key))?;
        atomic_write(self.path(key), &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CountdownState;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_key_returns_default() {
        let temp_dir = tempdir().unwrap();
        let store = KvStore::open(temp_dir.path()).unwrap();

        let state = store.load(keys::TIMER, CountdownState::default());
        assert_eq!(state, CountdownState::default());
        assert!(!store.load(keys::NOTIFICATION_PERMISSION, false));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempdir().unwrap();
        let store = KvStore::open(temp_dir.path()).unwrap();

        let state = CountdownState::with_minutes(10);
        store.save(keys::TIMER, &state).unwrap();

        assert!(temp_dir.path().join("pomodoroTimer.json").exists());
        assert_eq!(store.load(keys::TIMER, CountdownState::default()), state);
    }

    #[test]
    fn test_corrupted_value_falls_back_to_default() {
        let temp_dir = tempdir().unwrap();
        let store = KvStore::open(temp_dir.path()).unwrap();
        fs::write(temp_dir.path().join("pomodoroTimer.json"), "{ not json").unwrap();

        let state = store.load(keys::TIMER, CountdownState::default());
        assert_eq!(state, CountdownState::default());
    }

    #[test]
    fn test_wrong_shape_falls_back_to_default() {
        let temp_dir = tempdir().unwrap();
        let store = KvStore::open(temp_dir.path()).unwrap();
        store.save(keys::NOTIFICATION_PERMISSION, &"yes").unwrap();

        assert!(!store.load(keys::NOTIFICATION_PERMISSION, false));
    }

    #[test]
    fn test_open_creates_directory() {
        let temp_dir = tempdir().unwrap();
        let nested = temp_dir.path().join("deep").join("store");
        let store = KvStore::open(&nested).unwrap();
        assert!(store.dir().is_dir());
    }
}
