use crate::app::AppState;
use crate::domain::{FormKind, Page, UiMode, PRESET_MINUTES};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

/// Handle keyboard input events. Returns true when the dashboard should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::Modal => handle_modal_mode(app, key),
        UiMode::EditingTimerMinutes | UiMode::EditingSessionMinutes | UiMode::AddingSite => {
            handle_input_form_mode(app, key)
        }
    }
}

/// Handle keys in normal mode: global keys first, then the current page's
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Switch page
        KeyCode::Tab | KeyCode::BackTab => app.next_page(),

        // Settings
        KeyCode::Char('n') | KeyCode::Char('N') => app.toggle_notifications(),
        KeyCode::Char('b') | KeyCode::Char('B') => app.toggle_sound(),
        KeyCode::Char('w') | KeyCode::Char('W') => app.toggle_window_title(),

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),

        _ => match app.page {
            Page::Timer => handle_timer_page(app, key),
            Page::Blocker => handle_blocker_page(app, key),
        },
    }
    Ok(false)
}

fn handle_timer_page(app: &mut AppState, key: KeyEvent) {
    match key.code {
        // Start / pause
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_timer(),

        KeyCode::Char('r') | KeyCode::Char('R') => app.reset_timer(),

        // Presets
        KeyCode::Char(c @ '1'..='3') => {
            let index = (c as usize) - ('1' as usize);
            app.set_timer_minutes(PRESET_MINUTES[index]);
        }

        // Custom minutes
        KeyCode::Char('c') | KeyCode::Char('C') => app.open_form(FormKind::TimerMinutes),

        _ => {}
    }
}

fn handle_blocker_page(app: &mut AppState, key: KeyEvent) {
    match key.code {
        // Focus session
        KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('S') => app.start_session(),
        KeyCode::Char('e') | KeyCode::Char('E') => app.end_session(),
        KeyCode::Char('m') | KeyCode::Char('M') => app.open_form(FormKind::SessionMinutes),

        // Site list
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_site(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_site(),
        KeyCode::Char('a') | KeyCode::Char('A') => app.open_form(FormKind::AddSite),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => app.remove_selected_site(),
        KeyCode::Char('t') | KeyCode::Char('T') => app.test_block(),

        _ => {}
    }
}

/// Any key closes the modal
fn handle_modal_mode(app: &mut AppState, _key: KeyEvent) -> Result<bool> {
    app.close_modal();
    Ok(false)
}

/// Handle keys in input form mode
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Submit form
        KeyCode::Enter => app.submit_input_form(),

        // Cancel form
        KeyCode::Esc => app.cancel_input_form(),

        // Switch between url and name
        KeyCode::Tab => app.input_form_toggle_field(),

        KeyCode::Backspace => app.input_form_backspace(),

        // Minutes fields only take digits
        KeyCode::Char(c) => {
            let digits_only = app.ui_mode != UiMode::AddingSite;
            if !digits_only || c.is_ascii_digit() {
                app.input_form_add_char(c);
            }
        }

        _ => {}
    }
    Ok(false)
}
