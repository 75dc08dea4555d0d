// Logs panel - recent system log entries
//
// Renders the tail of the in-memory log buffer, color-coded by level.
// Without this panel, tracing output would tear through the alternate
// screen and garble the gauge.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::logging::LogLevel;
use crate::theme::Theme;
use crate::tui::app::App;

fn level_color(level: LogLevel) -> Color {
    match level {
        LogLevel::Error => Color::Red,
        LogLevel::Warn => Color::Yellow,
        LogLevel::Info => Color::Green,
        LogLevel::Debug => Color::Cyan,
        LogLevel::Trace => Color::DarkGray,
    }
}

/// Render the logs panel
pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let visible = area.height.saturating_sub(2) as usize;
    let entries = app.log_buffer.recent(visible);

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            let line = Line::from(vec![
                Span::styled(
                    entry.timestamp.format("%H:%M:%S ").to_string(),
                    theme.dim,
                ),
                Span::styled(
                    format!("{:5} ", entry.level.as_str()),
                    Style::default().fg(level_color(entry.level)),
                ),
                Span::styled(entry.message.clone(), theme.text),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Logs ")
            .border_style(theme.border),
    );
    frame.render_widget(list, area);
}
