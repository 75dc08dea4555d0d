// TUI application state
//
// One widget instance: the most recently displayed scalar, the error
// message list, the visible time window, and the refresh interval. The
// only long-lived mutable state besides the scheduler's timer handle.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::config::{Config, WidgetSettings};
use crate::events::WidgetEvent;
use crate::graph::duration::{next_longer_range, next_shorter_range};
use crate::graph::window::TimeWindow;
use crate::logging::LogBuffer;
use crate::theme::ThemeKind;

/// Smallest refresh interval the +/- keys can reach.
const MIN_REFRESH: Duration = Duration::from_secs(1);
/// Step for the +/- refresh adjustment keys.
const REFRESH_STEP: Duration = Duration::from_secs(5);

/// Main application state for the TUI
pub struct App {
    /// Server being polled (display only; the poller holds its own copy)
    pub server_url: String,

    /// Widget settings driving the gauge spec
    pub widget: WidgetSettings,

    /// Most recently displayed scalar; None until the first success
    pub gauge_value: Option<f64>,

    /// Current error message list; replaced wholesale on every poll
    pub error_messages: Vec<String>,

    /// When the displayed scalar last changed
    pub last_updated: Option<DateTime<Utc>>,

    /// Visible time window (range + end), driven by navigation keys
    pub window: TimeWindow,

    /// Current refresh interval; the scheduler is reset when it changes
    pub refresh: Duration,

    /// Whether the app should quit
    pub should_quit: bool,

    /// When the app started (for uptime display)
    pub start_time: Instant,

    /// Current color theme
    pub theme: ThemeKind,

    /// Log buffer for the system logs panel
    pub log_buffer: LogBuffer,
}

impl App {
    pub fn new(config: &Config, log_buffer: LogBuffer) -> Self {
        Self {
            server_url: config.server_url.clone(),
            widget: config.widget.clone(),
            gauge_value: None,
            error_messages: Vec::new(),
            last_updated: None,
            window: TimeWindow::ending_now(config.widget.range.clone()),
            refresh: Duration::from_secs(config.widget.refresh),
            should_quit: false,
            start_time: Instant::now(),
            theme: ThemeKind::from_name(&config.theme),
            log_buffer,
        }
    }

    /// Apply one event from the polling layer.
    ///
    /// A Redraw without a payload re-renders existing state, so there
    /// is nothing to update here; a payload replaces the displayed
    /// scalar. Errors replace the whole message list.
    pub fn apply_event(&mut self, event: WidgetEvent) {
        match event {
            WidgetEvent::Redraw(Some(value)) => {
                self.gauge_value = Some(value);
                self.last_updated = Some(Utc::now());
            }
            WidgetEvent::Redraw(None) => {}
            WidgetEvent::Errors(messages) => {
                self.error_messages = messages;
            }
        }
    }

    /// Step the visible range up the ladder.
    pub fn range_longer(&mut self) {
        self.window.range = next_longer_range(&self.window.range);
    }

    /// Step the visible range down the ladder.
    pub fn range_shorter(&mut self) {
        self.window.range = next_shorter_range(&self.window.range);
    }

    /// Move the window end earlier by half its width.
    pub fn window_earlier(&mut self) {
        self.window.step_earlier();
    }

    /// Move the window end later by half its width.
    pub fn window_later(&mut self) {
        self.window.step_later();
    }

    /// Increase the refresh interval. Returns the new value for the
    /// caller to push into the scheduler.
    pub fn refresh_slower(&mut self) -> Duration {
        self.refresh += REFRESH_STEP;
        self.refresh
    }

    /// Decrease the refresh interval, floored at one second.
    pub fn refresh_faster(&mut self) -> Duration {
        self.refresh = self.refresh.saturating_sub(REFRESH_STEP).max(MIN_REFRESH);
        self.refresh
    }

    /// Cycle to the next theme
    pub fn next_theme(&mut self) {
        self.theme = self.theme.next();
    }

    /// Get uptime as a formatted string
    pub fn uptime(&self) -> String {
        let seconds = self.start_time.elapsed().as_secs();
        let hours = seconds / 3600;
        let minutes = (seconds % 3600) / 60;
        let secs = seconds % 60;
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(&Config::default(), LogBuffer::new())
    }

    #[test]
    fn redraw_with_value_updates_displayed_scalar() {
        let mut app = app();
        app.apply_event(WidgetEvent::Redraw(Some(3.5)));
        assert_eq!(app.gauge_value, Some(3.5));
        assert!(app.last_updated.is_some());
    }

    #[test]
    fn redraw_without_payload_keeps_existing_state() {
        let mut app = app();
        app.apply_event(WidgetEvent::Redraw(Some(3.5)));
        app.apply_event(WidgetEvent::Redraw(None));
        assert_eq!(app.gauge_value, Some(3.5));
    }

    #[test]
    fn errors_replace_the_previous_message_set() {
        let mut app = app();
        app.apply_event(WidgetEvent::Errors(vec!["old".into()]));
        app.apply_event(WidgetEvent::Errors(vec!["new".into()]));
        assert_eq!(app.error_messages, vec!["new".to_string()]);
        app.apply_event(WidgetEvent::Errors(Vec::new()));
        assert!(app.error_messages.is_empty());
    }

    #[test]
    fn error_does_not_clear_displayed_scalar() {
        let mut app = app();
        app.apply_event(WidgetEvent::Redraw(Some(1.0)));
        app.apply_event(WidgetEvent::Errors(vec!["boom".into()]));
        assert_eq!(app.gauge_value, Some(1.0));
    }

    #[test]
    fn range_keys_walk_the_ladder() {
        let mut app = app();
        assert_eq!(app.window.range, "1h");
        app.range_longer();
        assert_eq!(app.window.range, "2h");
        app.range_shorter();
        app.range_shorter();
        assert_eq!(app.window.range, "30m");
    }

    #[test]
    fn refresh_adjustment_floors_at_one_second() {
        let mut app = app();
        app.refresh = Duration::from_secs(3);
        assert_eq!(app.refresh_faster(), Duration::from_secs(1));
        assert_eq!(app.refresh_slower(), Duration::from_secs(6));
    }
}
