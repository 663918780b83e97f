use crate::clock::Clock;
use crate::domain::{
    clamp_minutes, minutes_or_default, BlockedSite, BlockedSites, BlockingSession, Countdown, CountdownState,
    FormKind, Page, Projection, UiMode,
};
use crate::driver::DisplayDriver;
use crate::error::FocusError;
use crate::notifications::{Alerts, Notifier};
use crate::persistence::{keys, load_settings, save_settings, KvStore, Settings};
use anyhow::Result;
use tracing::info;

const TIMER_DONE_TITLE: &str = "⏰ Time's up!";
const TIMER_DONE_BODY: &str = "Your focus timer has finished. Time for a break!";
const FOCUS_STARTED_TITLE: &str = "🚫 Focus Mode Activated";
const FOCUS_ENDED_TITLE: &str = "✅ Focus Mode Ended";
const FOCUS_ENDED_BODY: &str = "You can now access all websites";

/// Message box shown over the dashboard until a key is pressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalState {
    pub title: String,
    pub message: String,
}

/// Input form state for minutes and new sites
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub kind: FormKind,
    pub primary: String,   // minutes, or the site url
    pub secondary: String, // site name (AddSite only)
    pub editing_field: usize,
}

/// Result of checking a host against the blocked list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// No focus session is running, nothing is blocked
    Inactive,
    Blocked(BlockedSite),
    Allowed,
}

/// Main application state
pub struct AppState {
    store: KvStore,
    clock: Box<dyn Clock>,
    pub alerts: Alerts,
    pub settings: Settings,
    pub timer: CountdownState,
    pub session: BlockingSession,
    pub sites: BlockedSites,
    timer_driver: DisplayDriver,
    session_driver: DisplayDriver,
    pub timer_view: Projection,
    pub session_view: Projection,
    pub window_title: Option<String>,
    pub page: Page,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    pub modal: Option<ModalState>,
    pub selected_site: usize,
    pub needs_save: bool,
}

impl AppState {
    /// Load everything from the store and take a first look at both countdowns.
    ///
    /// A countdown that ran out while nothing was watching completes here,
    /// firing its alerts once.
    pub fn load(store: KvStore, clock: Box<dyn Clock>, notifier: Box<dyn Notifier>) -> Self {
        let settings = load_settings(&store);
        let timer = store
            .load(keys::TIMER, CountdownState::default())
            .normalized();
        let default_session = BlockingSession {
            duration: settings.default_session_minutes,
            ..BlockingSession::default()
        };
        let session = store.load(keys::SESSION, default_session).normalized();
        let sites = store.load(keys::SITES, BlockedSites::default());
        let alerts = Alerts::new(notifier, &store, &settings);

        let now = clock.now();
        let timer_view = timer.project(now);
        let session_view = session.project(now);

        let mut app = Self {
            store,
            clock,
            alerts,
            settings,
            timer,
            session,
            sites,
            timer_driver: DisplayDriver::timer(),
            session_driver: DisplayDriver::session(),
            timer_view,
            session_view,
            window_title: None,
            page: Page::Timer,
            ui_mode: UiMode::Normal,
            input_form: None,
            modal: None,
            selected_site: 0,
            needs_save: false,
        };
        app.refresh();
        app
    }

    /// One display tick: re-project both countdowns and fire completions
    pub fn refresh(&mut self) {
        let now = self.clock.now();
        let timer_tick = self.timer_driver.tick(&mut self.timer, now);
        let session_tick = self.session_driver.tick(&mut self.session, now);

        if timer_tick.completed {
            self.needs_save = true;
            self.alerts.countdown_finished(TIMER_DONE_TITLE, TIMER_DONE_BODY);
            self.show_modal(TIMER_DONE_TITLE, TIMER_DONE_BODY);
        }

        if session_tick.completed {
            self.needs_save = true;
            self.alerts.countdown_finished(FOCUS_ENDED_TITLE, FOCUS_ENDED_BODY);
            self.show_modal(FOCUS_ENDED_TITLE, FOCUS_ENDED_BODY);
        }

        self.timer_view = timer_tick.projection;
        self.session_view = session_tick.projection;

        // The focus session title outranks the timer's
        self.window_title = if self.settings.window_title {
            session_tick.title.or(timer_tick.title)
        } else {
            None
        };
    }

    /// Status line under the big timer
    pub fn timer_status(&self) -> &'static str {
        if self.timer.is_running {
            "Timer Running"
        } else if self.timer_view.is_zero() && self.timer.last_completion_instant.is_some() {
            "Time's up"
        } else {
            "Ready to Start"
        }
    }

    // --- Timer ---

    /// Start when idle, pause when running
    pub fn toggle_timer(&mut self) {
        let now = self.clock.now();
        if self.timer.toggle(now) {
            self.needs_save = true;
        }
        self.refresh();
    }

    pub fn reset_timer(&mut self) {
        self.timer.reset();
        self.needs_save = true;
        self.refresh();
    }

    /// Reconfigure to a preset or any other whole number of minutes
    pub fn set_timer_minutes(&mut self, minutes: u64) {
        self.timer.reconfigure(minutes);
        self.needs_save = true;
        self.refresh();
    }

    // --- Focus session ---

    /// Begin a focus session with the current session length
    pub fn start_session(&mut self) {
        let now = self.clock.now();
        let minutes = self.session.duration;
        if self.session.start(minutes, now) {
            info!(minutes, "Focus mode activated");
            self.alerts.notify(
                FOCUS_STARTED_TITLE,
                &format!("Website blocking active for {} minutes", self.session.duration),
            );
            self.needs_save = true;
        }
        self.refresh();
    }

    /// Stop the focus session early
    pub fn end_session(&mut self) {
        if self.session.end() {
            info!("Focus mode ended early");
            self.alerts.notify(FOCUS_ENDED_TITLE, FOCUS_ENDED_BODY);
            self.needs_save = true;
        }
        self.refresh();
    }

    /// Change the session length. Ignored while a session is running.
    pub fn set_session_minutes(&mut self, minutes: u64) -> bool {
        let changed = self.session.set_duration(minutes);
        if changed {
            self.needs_save = true;
            self.refresh();
        }
        changed
    }

    /// Change the length new sessions start with. An idle session picks it up right away.
    pub fn set_default_session_minutes(&mut self, minutes: u64) {
        let minutes = clamp_minutes(minutes);
        self.settings.default_session_minutes = minutes;
        self.session.set_duration(minutes);
        info!(minutes, "Default session length changed");
        self.needs_save = true;
        self.refresh();
    }

    // --- Blocked sites ---

    pub fn add_site(&mut self, url: &str, name: &str) -> Result<(), FocusError> {
        let now = self.clock.now();
        let site = self.sites.add(url, name, now)?;
        info!(url = %site.url, "Site blocked");
        self.selected_site = self.sites.len() - 1;
        self.needs_save = true;
        Ok(())
    }

    pub fn remove_site(&mut self, id_or_url: &str) -> Result<BlockedSite, FocusError> {
        let site = self.sites.remove(id_or_url)?;
        info!(url = %site.url, "Site unblocked");
        self.clamp_site_selection();
        self.needs_save = true;
        Ok(site)
    }

    pub fn remove_selected_site(&mut self) {
        if let Some(site) = self.sites.remove_at(self.selected_site) {
            info!(url = %site.url, "Site unblocked");
            self.clamp_site_selection();
            self.needs_save = true;
        }
    }

    fn clamp_site_selection(&mut self) {
        self.selected_site = self.selected_site.min(self.sites.len().saturating_sub(1));
    }

    pub fn select_next_site(&mut self) {
        if self.selected_site + 1 < self.sites.len() {
            self.selected_site += 1;
        }
    }

    pub fn select_previous_site(&mut self) {
        self.selected_site = self.selected_site.saturating_sub(1);
    }

    /// Would visiting `host` be blocked right now? A match counts as a hit.
    pub fn check_site(&mut self, host: &str) -> CheckOutcome {
        // An expired session must not block anything
        self.refresh();
        if !self.session.is_active {
            return CheckOutcome::Inactive;
        }

        match self.sites.record_hit(host) {
            Some(site) => {
                let site = site.clone();
                self.needs_save = true;
                CheckOutcome::Blocked(site)
            }
            None => CheckOutcome::Allowed,
        }
    }

    /// Show what a blocked page looks like, using the first site
    pub fn test_block(&mut self) {
        let message = match self.sites.get(0) {
            Some(site) => format!(
                "Access to {} is currently blocked.\n\nStay focused on your goals! 💪",
                site.name
            ),
            None => {
                self.show_modal("Nothing to test", "Add some blocked sites first!");
                return;
            }
        };
        self.show_modal("🚫 Website Blocked", &message);
    }

    // --- Settings ---

    pub fn toggle_notifications(&mut self) {
        self.settings.timer_alerts = !self.settings.timer_alerts;
        self.alerts
            .set_notifications(self.settings.timer_alerts, &self.store);
        self.needs_save = true;
    }

    pub fn toggle_sound(&mut self) {
        self.settings.sound = !self.settings.sound;
        self.alerts.sound_enabled = self.settings.sound;
        self.needs_save = true;
    }

    pub fn toggle_window_title(&mut self) {
        self.settings.window_title = !self.settings.window_title;
        self.needs_save = true;
        self.refresh();
    }

    // --- Navigation, forms and modals ---

    pub fn next_page(&mut self) {
        self.page = self.page.next();
    }

    /// Open an input form, pre-filled with the current value
    pub fn open_form(&mut self, kind: FormKind) {
        let primary = match kind {
            FormKind::TimerMinutes => self.timer.configured_minutes().to_string(),
            FormKind::SessionMinutes => {
                if self.session.is_active {
                    return;
                }
                self.session.duration.to_string()
            }
            FormKind::AddSite => String::new(),
        };

        self.input_form = Some(InputFormState {
            kind,
            primary,
            secondary: String::new(),
            editing_field: 0,
        });
        self.ui_mode = kind.ui_mode();
    }

    /// Move to the next field of the input form
    pub fn input_form_toggle_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.editing_field = (form.editing_field + 1) % form.kind.field_count();
        }
    }

    /// Add character to input form (current field)
    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                0 => form.primary.push(c),
                _ => form.secondary.push(c),
            }
        }
    }

    /// Backspace in input form (current field)
    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                0 => form.primary.pop(),
                _ => form.secondary.pop(),
            };
        }
    }

    /// Apply the input form and close it
    pub fn submit_input_form(&mut self) {
        let Some(form) = self.input_form.take() else {
            return;
        };
        self.ui_mode = UiMode::Normal;

        match form.kind {
            FormKind::TimerMinutes => {
                self.timer.reconfigure_from_input(&form.primary);
                self.needs_save = true;
                self.refresh();
            }
            FormKind::SessionMinutes => {
                self.set_session_minutes(minutes_or_default(&form.primary));
            }
            FormKind::AddSite => {
                if let Err(e) = self.add_site(&form.primary, &form.secondary) {
                    self.show_modal("Can't block site", &e.to_string());
                }
            }
        }
    }

    /// Cancel input form
    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    pub fn show_modal(&mut self, title: &str, message: &str) {
        self.modal = Some(ModalState {
            title: title.to_string(),
            message: message.to_string(),
        });
        self.ui_mode = UiMode::Modal;
    }

    /// Dismiss the modal, going back to an open form if there was one
    pub fn close_modal(&mut self) {
        self.modal = None;
        self.ui_mode = match &self.input_form {
            Some(form) => form.kind.ui_mode(),
            None => UiMode::Normal,
        };
    }

    /// Save state to the store
    pub fn save(&mut self) -> Result<()> {
        self.store.save(keys::TIMER, &self.timer)?;
        self.store.save(keys::SESSION, &self.session)?;
        self.store.save(keys::SITES, &self.sites)?;
        save_settings(&self.store, &self.settings)?;

        self.needs_save = false;
        Ok(())
    }
}
