use crate::app::AppState;
use crate::domain::PRESET_MINUTES;
use crate::ui::layout::create_timer_layout;
use crate::ui::styles::{
    border_style, default_style, finished_style, frame_style, gauge_style, idle_style,
    running_style, sand_style, selected_style, title_style,
};
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Rows in each hourglass chamber
const CHAMBER_ROWS: usize = 5;

/// Draw an hourglass with `progress` (fraction remaining) of the sand still on top.
///
/// Sand drains from the neck of the top chamber and piles up from the base of
/// the bottom one; the number of filled rows is conserved between chambers.
/// `falling` draws a grain in the neck.
pub fn hourglass_lines(progress: f64, rows: usize, falling: bool) -> Vec<String> {
    let progress = progress.clamp(0.0, 1.0);
    let filled_top = (progress * rows as f64).round() as usize;
    let filled_bottom = rows - filled_top;
    let cap = format!("╔{}╗", "═".repeat(2 * rows + 1));

    let mut lines = Vec::with_capacity(2 * rows + 2);
    lines.push(cap.clone());

    // Top chamber, wide to narrow
    for i in 0..rows {
        let inner = 2 * (rows - i) - 1;
        let filled = i >= rows - filled_top;
        let fill = if filled { ":" } else { " " };
        lines.push(format!("{}\\{}/", " ".repeat(i + 1), fill.repeat(inner)));
    }

    // Bottom chamber, narrow to wide
    for j in 0..rows {
        let inner = 2 * j + 1;
        let filled = j >= rows - filled_bottom;
        let fill = if filled {
            ":".repeat(inner)
        } else if j == 0 && falling {
            ".".to_string()
        } else {
            " ".repeat(inner)
        };
        lines.push(format!("{}/{}\\", " ".repeat(rows - j), fill));
    }

    lines.push(cap);
    lines
}

/// Render the Pomodoro timer page
pub fn render_timer_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let view = app.timer_view;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Pomodoro Timer ", title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let layout = create_timer_layout(inner);

    // Hourglass
    let hourglass: Vec<Line> = hourglass_lines(view.progress(), CHAMBER_ROWS, view.running)
        .into_iter()
        .map(|row| {
            let style = if row.contains(':') || row.contains('.') {
                sand_style()
            } else {
                frame_style()
            };
            Line::from(Span::styled(row, style))
        })
        .collect();
    f.render_widget(Paragraph::new(hourglass), layout.hourglass_area);

    // Big clock
    let clock_style = if view.running {
        running_style()
    } else {
        default_style().add_modifier(Modifier::BOLD)
    };
    let clock = Paragraph::new(Line::from(Span::styled(view.clock(), clock_style)))
        .alignment(Alignment::Left);
    f.render_widget(clock, layout.clock_area);

    // Elapsed gauge
    let gauge = Gauge::default()
        .gauge_style(gauge_style())
        .ratio(view.elapsed_fraction())
        .label(format!("{:.0}% elapsed", view.elapsed_fraction() * 100.0));
    f.render_widget(gauge, layout.gauge_area);

    // Status
    let status = app.timer_status();
    let status_style = match status {
        "Timer Running" => running_style(),
        "Time's up" => finished_style(),
        _ => idle_style(),
    };
    f.render_widget(
        Paragraph::new(Span::styled(status, status_style)),
        layout.status_area,
    );

    // Presets and custom time
    let configured = app.timer.configured_minutes();
    let mut presets = vec![Span::raw("Presets: ")];
    for (i, minutes) in PRESET_MINUTES.iter().enumerate() {
        let label = format!("[{}] {} min", i + 1, minutes);
        if *minutes == configured {
            presets.push(Span::styled(label, selected_style()));
        } else {
            presets.push(Span::raw(label));
        }
        presets.push(Span::raw("  "));
    }

    let controls = vec![
        Line::from(presets),
        Line::raw(""),
        Line::from(vec![
            Span::raw("Session length: "),
            Span::styled(format!("{} min", configured), title_style()),
            Span::raw("   [c] set custom time (1-300 minutes)"),
        ]),
    ];
    f.render_widget(Paragraph::new(controls), layout.controls_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sand_rows(lines: &[String]) -> (usize, usize) {
        let rows = (lines.len() - 2) / 2;
        let top = lines[1..=rows].iter().filter(|l| l.contains(':')).count();
        let bottom = lines[rows + 1..=2 * rows].iter().filter(|l| l.contains(':')).count();
        (top, bottom)
    }

    #[test]
    fn test_full_hourglass() {
        let lines = hourglass_lines(1.0, 5, false);
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[1], " \\:::::::::/");
        assert_eq!(lines[10], " /         \\");
        assert_eq!(sand_rows(&lines), (5, 0));
    }

    #[test]
    fn test_empty_hourglass() {
        let lines = hourglass_lines(0.0, 5, false);
        assert_eq!(sand_rows(&lines), (0, 5));
        assert_eq!(lines[10], " /:::::::::\\");
    }

    #[test]
    fn test_half_drained_fills_from_the_neck() {
        let lines = hourglass_lines(0.5, 4, true);
        assert_eq!(sand_rows(&lines), (2, 2));
        // Top chamber keeps its sand near the neck
        assert!(!lines[1].contains(':'));
        assert!(lines[4].contains(':'));
        // Grain falling through the neck
        assert_eq!(lines[5], "    /.\\");
    }

    #[test]
    fn test_out_of_range_progress_is_clamped() {
        assert_eq!(hourglass_lines(3.0, 3, false), hourglass_lines(1.0, 3, false));
        assert_eq!(hourglass_lines(-1.0, 3, false), hourglass_lines(0.0, 3, false));
    }

    #[test]
    fn test_rows_fit_under_the_cap() {
        let lines = hourglass_lines(0.3, 5, true);
        assert_eq!(lines[0].chars().count(), 13);
        for line in &lines[1..lines.len() - 1] {
            // Walls sit inside the cap, mirrored around the centre column
            let width = line.chars().count();
            let indent = line.chars().take_while(|c| *c == ' ').count();
            assert_eq!(width + indent, 13);
        }
    }
}
