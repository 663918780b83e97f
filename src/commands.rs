use crate::app::{AppState, CheckOutcome};
use crate::domain::{parse_minutes, DEFAULT_DURATION_MINUTES};
use anyhow::Result;
use clap::Subcommand;
use std::fmt::Write;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TimerAction {
    /// Show the remaining time
    Status,
    /// Start (or resume) the timer
    Start,
    /// Pause the timer
    Pause,
    /// Stop and refill to the configured length
    Reset,
    /// Set the timer length in minutes (1-300)
    Set { minutes: String },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Show whether focus mode is on
    Status,
    /// Start a focus session
    Start {
        /// Session length in minutes (1-300). Defaults to the last used length.
        #[arg(short, long)]
        minutes: Option<String>,
    },
    /// End the focus session early
    Stop,
    /// Set the length new sessions start with (1-300 minutes)
    Default { minutes: String },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SitesAction {
    /// List blocked sites
    List,
    /// Block a site
    Add {
        url: String,
        /// Display name (defaults to the url)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Unblock a site by url or id
    Remove { target: String },
}

/// Minutes from user input, with a note when the default had to be used
fn minutes_with_note(input: &str, out: &mut String) -> u64 {
    match parse_minutes(input) {
        Ok(minutes) => minutes,
        Err(e) => {
            let _ = writeln!(out, "{}; using {} minutes", e, DEFAULT_DURATION_MINUTES);
            DEFAULT_DURATION_MINUTES
        }
    }
}

/// Messages raised while loading, e.g. a countdown that finished in the background
pub fn pending_messages(app: &mut AppState) -> String {
    let text = match &app.modal {
        Some(modal) => format!("{} {}\n", modal.title, modal.message),
        None => return String::new(),
    };
    app.close_modal();
    text
}

fn timer_status_line(app: &AppState) -> String {
    format!(
        "⏱ {}  {} ({} min timer)\n",
        app.timer_view.clock(),
        app.timer_status(),
        app.timer.configured_minutes()
    )
}

fn session_status_line(app: &AppState) -> String {
    if app.session.is_active {
        format!(
            "🚫 Focus Mode Active: {} remaining ({} min session)\n",
            app.session_view.short_clock(),
            app.session.duration
        )
    } else {
        format!(
            "Focus Mode Inactive (next session: {} min)\n",
            app.session.duration
        )
    }
}

pub fn run_timer(app: &mut AppState, action: TimerAction) -> Result<String> {
    let mut out = pending_messages(app);

    match action {
        TimerAction::Status => {}
        TimerAction::Start => {
            if app.timer.is_running {
                out.push_str("Timer is already running\n");
            } else if app.timer.baseline_remaining_seconds == 0 {
                out.push_str("Nothing left on the timer, reset it first\n");
            } else {
                app.toggle_timer();
            }
        }
        TimerAction::Pause => {
            if app.timer.is_running {
                app.toggle_timer();
            } else {
                out.push_str("Timer is not running\n");
            }
        }
        TimerAction::Reset => app.reset_timer(),
        TimerAction::Set { minutes } => {
            let minutes = minutes_with_note(&minutes, &mut out);
            app.set_timer_minutes(minutes);
        }
    }

    out.push_str(&timer_status_line(app));
    Ok(out)
}

pub fn run_session(app: &mut AppState, action: SessionAction) -> Result<String> {
    let mut out = pending_messages(app);

    match action {
        SessionAction::Status => {}
        SessionAction::Start { minutes } => {
            if app.session.is_active {
                out.push_str("Focus mode is already active\n");
            } else {
                if let Some(minutes) = minutes {
                    let minutes = minutes_with_note(&minutes, &mut out);
                    app.set_session_minutes(minutes);
                }
                app.start_session();
            }
        }
        SessionAction::Stop => {
            if app.session.is_active {
                app.end_session();
            } else {
                out.push_str("Focus mode is not active\n");
            }
        }
        SessionAction::Default { minutes } => {
            let minutes = minutes_with_note(&minutes, &mut out);
            app.set_default_session_minutes(minutes);
            let _ = writeln!(out, "New sessions last {} minutes", minutes);
        }
    }

    out.push_str(&session_status_line(app));
    Ok(out)
}

pub fn run_sites(app: &mut AppState, action: SitesAction) -> Result<String> {
    let mut out = pending_messages(app);

    match action {
        SitesAction::List => {
            if app.sites.is_empty() {
                out.push_str("No blocked sites\n");
            }
            for site in app.sites.iter() {
                let _ = writeln!(
                    out,
                    "{}  {}  {}  blocked {}×",
                    site.id, site.url, site.name, site.blocked_count
                );
            }
        }
        SitesAction::Add { url, name } => {
            app.add_site(&url, name.as_deref().unwrap_or(""))?;
            if let Some(site) = app.sites.get(app.selected_site) {
                let _ = writeln!(out, "Blocked {}", site.url);
            }
        }
        SitesAction::Remove { target } => {
            let site = app.remove_site(&target)?;
            let _ = writeln!(out, "Unblocked {}", site.url);
        }
    }

    Ok(out)
}

/// The bookmarklet check: would visiting `url` be blocked right now?
pub fn run_check(app: &mut AppState, url: &str) -> Result<String> {
    let mut out = pending_messages(app);

    match app.check_site(url) {
        CheckOutcome::Inactive => out.push_str(
            "Focus mode is not active. Start one with `focus session start` first.\n",
        ),
        CheckOutcome::Blocked(site) => {
            let _ = writeln!(
                out,
                "🚫 {} is blocked during your focus session ({} left).",
                site.name,
                app.session_view.short_clock()
            );
        }
        CheckOutcome::Allowed => {
            out.push_str("✅ This site is not blocked. Keep up the focused work!\n")
        }
    }

    Ok(out)
}
