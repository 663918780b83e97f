use crate::app::AppState;
use crate::domain::BlockedSite;
use crate::ui::layout::create_blocker_layout;
use crate::ui::styles::{
    blocking_style, border_style, count_style, default_style, gauge_style, hint_style,
    idle_style, selected_style, title_style,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph},
    Frame,
};

/// One row of the blocked-site list
fn site_line(site: &BlockedSite, is_selected: bool) -> Line<'static> {
    let mut spans = Vec::new();

    let name_style = if is_selected { selected_style() } else { default_style() };
    spans.push(Span::styled(format!(" {} ", site.name), name_style));

    if site.name != site.url {
        spans.push(Span::styled(format!(" {}", site.url), hint_style()));
    }

    if site.blocked_count > 0 {
        spans.push(Span::styled(
            format!("  blocked {}×", site.blocked_count),
            count_style(),
        ));
    }

    Line::from(spans)
}

fn render_session(f: &mut Frame, app: &AppState, area: Rect) {
    let view = app.session_view;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Focus Mode ", title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status
            Constraint::Length(1), // Remaining
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Gauge
            Constraint::Min(0),    // Hint
        ])
        .split(inner);

    let (status, remaining) = if view.running {
        (
            Span::styled("🚫 Focus Mode Active", blocking_style()),
            Line::from(vec![
                Span::raw("Time remaining: "),
                Span::styled(view.short_clock(), blocking_style()),
                Span::raw(format!("  of {} minutes", app.session.duration)),
            ]),
        )
    } else {
        (
            Span::styled("Focus Mode Inactive", idle_style()),
            Line::from(vec![
                Span::raw("Session length: "),
                Span::styled(format!("{} minutes", app.session.duration), title_style()),
                Span::styled("  [m] change (1-300)", hint_style()),
            ]),
        )
    };

    f.render_widget(Paragraph::new(status), rows[0]);
    f.render_widget(Paragraph::new(remaining), rows[1]);

    if view.running {
        let gauge = Gauge::default()
            .gauge_style(gauge_style())
            .ratio(view.elapsed_fraction())
            .label(format!("{} left", view.short_clock()));
        f.render_widget(gauge, rows[3]);
    }

    let hint = if view.running {
        "Blocking is advisory: check a site with `focus check <url>`. [e] ends the session."
    } else {
        "[s] start a focus session"
    };
    f.render_widget(Paragraph::new(Span::styled(hint, hint_style())), rows[4]);
}

fn render_sites(f: &mut Frame, app: &AppState, area: Rect) {
    let title = format!(" Blocked Sites ({}) ", app.sites.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()));

    if app.sites.is_empty() {
        let empty = Paragraph::new(Span::styled(
            " No blocked sites yet. Press [a] to add one.",
            hint_style(),
        ))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .sites
        .iter()
        .enumerate()
        .map(|(i, site)| ListItem::new(site_line(site, i == app.selected_site)))
        .collect();

    // Keeps the selected row scrolled into view
    let mut state = site_list_state(app.selected_site);
    f.render_stateful_widget(List::new(items).block(block), area, &mut state);
}

fn site_list_state(selected: usize) -> ListState {
    let mut state = ListState::default();
    state.select(Some(selected));
    state
}

/// Render the website blocker page
pub fn render_blocker_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let layout = create_blocker_layout(area);
    render_session(f, app, layout.session_area);
    render_sites(f, app, layout.sites_area);
}
