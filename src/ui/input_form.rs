use crate::app::{AppState, InputFormState};
use crate::domain::FormKind;
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Label and editing field for each input of the form
fn field_labels(kind: FormKind) -> &'static [&'static str] {
    match kind {
        FormKind::TimerMinutes => &["Minutes (1-300):"],
        FormKind::SessionMinutes => &["Block websites for (minutes, 1-300):"],
        FormKind::AddSite => &["Website (e.g. youtube.com):", "Name (optional):"],
    }
}

fn field_lines<'a>(form: &'a InputFormState, index: usize, label: &'static str) -> [Line<'a>; 2] {
    let editing = form.editing_field == index;
    let value = if index == 0 { &form.primary } else { &form.secondary };

    let label_line = if editing {
        Line::raw(format!("{} (editing)", label))
    } else {
        Line::raw(label)
    };

    let value_line = Line::from(vec![
        Span::raw("> "),
        Span::styled(value.as_str(), modal_title_style()),
        if editing {
            Span::styled("█", modal_title_style()) // Cursor
        } else {
            Span::raw("")
        },
    ]);

    [label_line, value_line]
}

/// Render the input form for minutes and new sites
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.input_form {
        let modal_area = create_modal_area(area);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let mut lines = vec![Line::raw("")];
        for (index, label) in field_labels(form.kind).iter().copied().enumerate() {
            lines.extend(field_lines(form, index, label));
            lines.push(Line::raw(""));
        }

        // Instructions
        let instructions = if form.kind.field_count() > 1 {
            "Tab to switch fields  ·  Enter to submit  ·  Esc to cancel"
        } else {
            "Enter to set  ·  Esc to cancel  ·  invalid values fall back to 25"
        };
        lines.push(Line::raw(instructions));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(form.kind.title(), modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
