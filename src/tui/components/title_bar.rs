// Title bar component
//
// App name plus the server and expression being polled.

use ratatui::{
    layout::Rect,
    style::Modifier,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme::Theme;
use crate::tui::app::App;

/// Render the title bar at the top of the screen
pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let title_text = if app.widget.expression.is_empty() {
        " gaugemon - no expression configured".to_string()
    } else {
        format!(
            " gaugemon - {} @ {}",
            app.widget.expression, app.server_url
        )
    };

    let title = Paragraph::new(title_text)
        .style(theme.title.add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.title),
        );
    frame.render_widget(title, area);
}
