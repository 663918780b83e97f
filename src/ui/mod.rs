pub mod blocker_pane;
pub mod header;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod styles;
pub mod timer_pane;

use crate::app::AppState;
use crate::domain::Page;
use blocker_pane::render_blocker_pane;
use header::render_header;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use modal::render_modal;
use ratatui::Frame;
use timer_pane::render_timer_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_header(f, app, layout.header_area);
    render_keybindings(f, app.page, layout.keybindings_area);

    match app.page {
        Page::Timer => render_timer_pane(f, app, layout.page_area),
        Page::Blocker => render_blocker_pane(f, app, layout.page_area),
    }

    // Input form under the modal so a completion shows on top of it
    if app.input_form.is_some() {
        render_input_form(f, app, size);
    }

    if app.modal.is_some() {
        render_modal(f, app, size);
    }
}
