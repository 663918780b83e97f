//! Best-effort desktop notifications and sound.
//! Uses osascript on macOS and notify-rust elsewhere; the bell is written to the terminal.

use crate::persistence::{keys, KvStore, Settings};
use anyhow::{Context, Result};
use std::io::Write;
#[cfg(target_os = "macos")]
use std::process::{Command, Stdio};
use tracing::debug;

/// Outcome of asking for permission to notify
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Something that can show notifications and make noise
pub trait Notifier {
    /// Probe whether notifications can be shown at all
    fn request_permission(&mut self) -> Permission;

    fn show(&self, title: &str, body: &str) -> Result<()>;

    fn beep(&self) -> Result<()>;
}

/// Notifier backed by the platform's notification service
#[derive(Debug, Default)]
pub struct DesktopNotifier;

#[cfg(target_os = "macos")]
impl DesktopNotifier {
    fn available() -> bool {
        Command::new("osascript")
            .args(["-e", "return"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    fn display(title: &str, body: &str) -> Result<()> {
        let script = format!(
            r#"display notification "{}" with title "{}""#,
            body.replace('"', "\\\""),
            title.replace('"', "\\\"")
        );
        let output = Command::new("osascript")
            .arg("-e")
            .arg(&script)
            .output()
            .context("Failed to run osascript")?;
        if !output.status.success() {
            anyhow::bail!("osascript exited with {}", output.status);
        }
        Ok(())
    }
}

#[cfg(not(target_os = "macos"))]
impl DesktopNotifier {
    #[cfg(unix)]
    fn available() -> bool {
        notify_rust::get_server_information().is_ok()
    }

    #[cfg(not(unix))]
    fn available() -> bool {
        true
    }

    fn display(title: &str, body: &str) -> Result<()> {
        notify_rust::Notification::new()
            .appname("focus")
            .summary(title)
            .body(body)
            .show()
            .context("Failed to show desktop notification")?;
        Ok(())
    }
}

impl Notifier for DesktopNotifier {
    fn request_permission(&mut self) -> Permission {
        if Self::available() {
            Permission::Granted
        } else {
            Permission::Denied
        }
    }

    fn show(&self, title: &str, body: &str) -> Result<()> {
        Self::display(title, body)
    }

    fn beep(&self) -> Result<()> {
        let mut stdout = std::io::stdout();
        stdout.write_all(b"\x07").context("Failed to ring terminal bell")?;
        stdout.flush().context("Failed to flush terminal bell")?;
        Ok(())
    }
}

/// Fire-and-forget alerts gated by settings and the cached permission
pub struct Alerts {
    notifier: Box<dyn Notifier>,
    permission: Permission,
    pub notifications_enabled: bool,
    pub sound_enabled: bool,
}

impl Alerts {
    /// Build alerts from the cached permission, probing only if nothing was ever cached
    pub fn new(notifier: Box<dyn Notifier>, store: &KvStore, settings: &Settings) -> Self {
        let cached: Option<bool> = store.load(keys::NOTIFICATION_PERMISSION, None);
        let mut alerts = Self {
            notifier,
            permission: if cached == Some(true) { Permission::Granted } else { Permission::Denied },
            notifications_enabled: settings.timer_alerts,
            sound_enabled: settings.sound,
        };
        if cached.is_none() && settings.timer_alerts {
            alerts.probe(store);
        }
        alerts
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }

    /// Turn notifications on or off. Turning them on asks again unless already granted.
    pub fn set_notifications(&mut self, enabled: bool, store: &KvStore) {
        self.notifications_enabled = enabled;
        if enabled && self.permission != Permission::Granted {
            self.probe(store);
        }
    }

    fn probe(&mut self, store: &KvStore) {
        self.permission = self.notifier.request_permission();
        let granted = self.permission == Permission::Granted;
        debug!(granted, "Probed notification permission");
        if let Err(e) = store.save(keys::NOTIFICATION_PERMISSION, &granted) {
            debug!(error = %e, "Could not cache notification permission");
        }
    }

    /// Show a notification if allowed. Failures are swallowed.
    pub fn notify(&self, title: &str, body: &str) {
        if !self.notifications_enabled || self.permission != Permission::Granted {
            return;
        }
        if let Err(e) = self.notifier.show(title, body) {
            debug!(error = %e, "Notification failed");
        }
    }

    /// Ring the bell if allowed. Failures are swallowed.
    pub fn beep(&self) {
        if !self.sound_enabled {
            return;
        }
        if let Err(e) = self.notifier.beep() {
            debug!(error = %e, "Bell failed");
        }
    }

    /// Completion alert: notification plus sound
    pub fn countdown_finished(&self, title: &str, body: &str) {
        self.notify(title, body);
        self.beep();
    }
}

#[cfg(test)]
pub use recording::RecordingNotifier;


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_permission_is_probed_once_and_cached() {
        let temp_dir = tempdir().unwrap();
        let store = KvStore::open(temp_dir.path()).unwrap();
        let notifier = RecordingNotifier::granting();

        let alerts = Alerts::new(Box::new(notifier.clone()), &store, &Settings::default());
        assert_eq!(alerts.permission(), Permission::Granted);
        assert!(store.load(keys::NOTIFICATION_PERMISSION, false));

        let _again = Alerts::new(Box::new(notifier.clone()), &store, &Settings::default());
        assert_eq!(*notifier.permission_requests.borrow(), 1);
    }

    #[test]
    fn test_denied_permission_skips_show() {
        let temp_dir = tempdir().unwrap();
        let store = KvStore::open(temp_dir.path()).unwrap();
        let notifier = RecordingNotifier::denying();

        let alerts = Alerts::new(Box::new(notifier.clone()), &store, &Settings::default());
        alerts.countdown_finished("Time's up", "Take a break");

        assert!(notifier.shown_titles().is_empty());
        assert_eq!(notifier.beep_count(), 1);
    }

    #[test]
    fn test_denied_permission_is_cached() {
        let temp_dir = tempdir().unwrap();
        let store = KvStore::open(temp_dir.path()).unwrap();
        let notifier = RecordingNotifier::denying();

        for _ in 0..3 {
            let alerts = Alerts::new(Box::new(notifier.clone()), &store, &Settings::default());
            assert_eq!(alerts.permission(), Permission::Denied);
        }

        assert_eq!(*notifier.permission_requests.borrow(), 1);
        assert_eq!(store.load(keys::NOTIFICATION_PERMISSION, None), Some(false));
    }

    #[test]
    fn test_enabling_notifications_asks_again() {
        let temp_dir = tempdir().unwrap();
        let store = KvStore::open(temp_dir.path()).unwrap();
        let notifier = RecordingNotifier::denying();
        let mut alerts = Alerts::new(Box::new(notifier.clone()), &store, &Settings::default());

        alerts.set_notifications(false, &store);
        assert_eq!(*notifier.permission_requests.borrow(), 1);

        alerts.set_notifications(true, &store);
        assert_eq!(*notifier.permission_requests.borrow(), 2);
    }

    #[test]
    fn test_disabled_alerts_do_not_probe() {
        let temp_dir = tempdir().unwrap();
        let store = KvStore::open(temp_dir.path()).unwrap();
        let notifier = RecordingNotifier::granting();
        let settings = Settings {
            timer_alerts: false,
            sound: false,
            ..Settings::default()
        };

        let alerts = Alerts::new(Box::new(notifier.clone()), &store, &settings);
        alerts.countdown_finished("Time's up", "Take a break");

        assert_eq!(*notifier.permission_requests.borrow(), 0);
        assert!(notifier.shown_titles().is_empty());
        assert_eq!(notifier.beep_count(), 0);
    }

    #[test]
    fn test_failures_are_swallowed() {
        let temp_dir = tempdir().unwrap();
        let store = KvStore::open(temp_dir.path()).unwrap();
        let notifier = RecordingNotifier {
            fail: true,
            ..RecordingNotifier::granting()
        };

        let alerts = Alerts::new(Box::new(notifier.clone()), &store, &Settings::default());
        alerts.countdown_finished("Time's up", "Take a break");

        assert!(notifier.shown_titles().is_empty());
    }
}
