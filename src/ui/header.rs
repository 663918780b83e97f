use crate::app::AppState;
use crate::domain::{Page, Projection};
use crate::notifications::Permission;
use crate::ui::styles::{
    blocking_style, border_style, enabled_style, hint_style, idle_style, running_style,
    selected_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn on_off(label: &str, on: bool) -> Span<'static> {
    let text = format!("{} {}  ", label, if on { "on" } else { "off" });
    if on {
        Span::styled(text, enabled_style())
    } else {
        Span::styled(text, hint_style())
    }
}

fn timer_summary(timer: &Projection) -> Span<'static> {
    let marker = if timer.running { "▶" } else { "⏸" };
    let text = format!("⏱ {} {}   ", timer.clock(), marker);
    if timer.running {
        Span::styled(text, running_style())
    } else {
        Span::styled(text, idle_style())
    }
}

fn session_summary(session: &Projection) -> Span<'static> {
    if session.running {
        Span::styled(format!("🚫 {}   ", session.short_clock()), blocking_style())
    } else {
        Span::styled("🚫 off   ".to_string(), idle_style())
    }
}

/// Render the header: page tabs, both countdowns and the alert settings
pub fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let mut spans = Vec::new();

    for page in Page::all() {
        let label = format!(" {} ", page.name());
        if *page == app.page {
            spans.push(Span::styled(label, selected_style()));
        } else {
            spans.push(Span::raw(label));
        }
        spans.push(Span::raw(" "));
    }

    spans.push(Span::raw("   "));
    spans.push(timer_summary(&app.timer_view));
    spans.push(session_summary(&app.session_view));
    if app.settings.timer_alerts && app.alerts.permission() == Permission::Denied {
        spans.push(Span::styled("🔔 unavailable  ", hint_style()));
    } else {
        spans.push(on_off("🔔", app.settings.timer_alerts));
    }
    spans.push(on_off("🔊", app.settings.sound));
    spans.push(on_off("🪟", app.settings.window_title));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" FOCUS ", title_style()));

    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
