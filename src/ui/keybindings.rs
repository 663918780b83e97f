use crate::domain::Page;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Hints for the page on screen
fn page_hints(page: Page) -> Vec<&'static str> {
    let mut hints = match page {
        Page::Timer => vec![
            "Space start/pause   ",
            "r reset   ",
            "1/2/3 5·15·25 min   ",
            "c custom   ",
        ],
        Page::Blocker => vec![
            "s start focus   ",
            "e end   ",
            "m length   ",
            "a add site   ",
            "d remove   ",
            "t test block   ",
        ],
    };
    hints.extend([
        "n alerts   ",
        "b sound   ",
        "w title   ",
        "Tab page   ",
        "q quit",
    ]);
    hints
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, page: Page, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    spans.extend(page_hints(page).into_iter().map(Span::raw));

    let paragraph = Paragraph::new(Line::from(spans)).style(hint_style());
    f.render_widget(paragraph, area);
}
