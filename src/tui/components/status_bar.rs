// Status bar component
//
// Bottom line: visible window, refresh interval, uptime, theme, and
// the key hints for navigation.

use chrono::{TimeZone, Utc};
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme::Theme;
use crate::tui::app::App;

/// Render the status bar
pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme, in_flight: bool) {
    let window_end = Utc
        .timestamp_millis_opt(app.window.end_ms)
        .single()
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());

    let busy = if in_flight { " ~" } else { "" };

    let status_text = format!(
        " {} | range {} ending {} | refresh {}s{} | theme {} | [/] range  ,/. window  +/- refresh  r poll  t theme  q quit",
        app.uptime(),
        app.window.range,
        window_end,
        app.refresh.as_secs(),
        busy,
        app.theme.name(),
    );

    let status = Paragraph::new(status_text).style(theme.dim).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border),
    );
    frame.render_widget(status, area);
}
