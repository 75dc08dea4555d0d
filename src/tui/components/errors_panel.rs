// Errors panel - the widget's user-visible message list
//
// Shows the error messages from the most recent poll. The list is
// replaced wholesale on every completed request, so anything shown
// here is current, never stale.

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::theme::Theme;
use crate::tui::app::App;

/// Render the errors panel
pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Messages ")
        .border_style(theme.border);

    if app.error_messages.is_empty() {
        let ok = Paragraph::new("no errors").style(theme.dim).block(block);
        frame.render_widget(ok, area);
        return;
    }

    let items: Vec<ListItem> = app
        .error_messages
        .iter()
        .map(|message| ListItem::new(message.as_str()).style(theme.error))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
