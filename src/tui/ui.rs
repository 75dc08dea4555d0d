// UI rendering logic
//
// Defines the frame layout and delegates each section to its
// component. Called on every frame; ratatui replaces the whole buffer
// each pass, so a render is always a full redraw.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use super::app::App;
use super::components::{errors_panel, gauge_panel, logs_panel, status_bar, title_bar};

/// Main UI render function - called on every frame
pub fn draw(frame: &mut Frame, app: &App, in_flight: bool) {
    let theme = app.theme.theme();

    // Split the terminal into five vertical sections:
    // - Title bar (3 lines fixed)
    // - Gauge (fills remaining space)
    // - Messages (4 lines fixed)
    // - System logs (6 lines fixed)
    // - Status bar (3 lines fixed)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(4),
            Constraint::Length(6),
            Constraint::Length(3),
        ])
        .split(frame.area());

    title_bar::render(frame, chunks[0], app, &theme);
    gauge_panel::render(frame, chunks[1], app, &theme);
    errors_panel::render(frame, chunks[2], app, &theme);
    logs_panel::render(frame, chunks[3], app, &theme);
    status_bar::render(frame, chunks[4], app, &theme, in_flight);
}
