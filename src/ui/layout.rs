use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub header_area: Rect,
    pub page_area: Rect,
    pub keybindings_area: Rect,
}

/// Create the main layout
/// - Top: header with page tabs and both countdowns (3 rows)
/// - Middle: the current page
/// - Bottom bar: keybindings (1 row)
pub fn create_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Page
            Constraint::Length(1), // Keybindings bar
        ])
        .split(area);

    MainLayout {
        header_area: chunks[0],
        page_area: chunks[1],
        keybindings_area: chunks[2],
    }
}

/// Timer page: hourglass on the left, clock and controls on the right
pub struct TimerLayout {
    pub hourglass_area: Rect,
    pub clock_area: Rect,
    pub gauge_area: Rect,
    pub status_area: Rect,
    pub controls_area: Rect,
}

pub fn create_timer_layout(area: Rect) -> TimerLayout {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(17), // Hourglass
            Constraint::Min(0),     // Clock and controls
        ])
        .split(area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Clock
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Gauge
            Constraint::Length(1), // Status
            Constraint::Length(1), // Spacing
            Constraint::Min(0),    // Presets and custom time
        ])
        .split(columns[1]);

    TimerLayout {
        hourglass_area: columns[0],
        clock_area: rows[1],
        gauge_area: rows[3],
        status_area: rows[4],
        controls_area: rows[6],
    }
}

/// Blocker page: focus session on top, site list below
pub struct BlockerLayout {
    pub session_area: Rect,
    pub sites_area: Rect,
}

pub fn create_blocker_layout(area: Rect) -> BlockerLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Session
            Constraint::Min(0),    // Sites
        ])
        .split(area);

    BlockerLayout {
        session_area: chunks[0],
        sites_area: chunks[1],
    }
}

/// Create centered modal area (for messages and input forms)
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(10),
            Constraint::Percentage(25),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}
