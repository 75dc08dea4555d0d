// TUI module - Terminal User Interface
//
// Manages the terminal with ratatui: setup and cleanup of the
// alternate screen, the select!-driven event loop over keyboard input
// and widget events, and the navigation key bindings. Teardown cancels
// the refresh scheduler before the terminal is restored, so no timer
// outlives the widget.

pub mod app;
pub mod components;
pub mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::events::WidgetEvent;
use crate::poller::Poller;
use crate::scheduler::RefreshScheduler;

use app::App;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the
/// terminal when done. The scheduler handle is owned here so quitting
/// cancels it before anything else is torn down.
pub async fn run_tui(
    mut app: App,
    mut event_rx: mpsc::Receiver<WidgetEvent>,
    scheduler: RefreshScheduler,
    poller: Arc<Poller>,
) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut app, &mut event_rx, &scheduler, &poller).await;

    // Widget teardown: no orphaned timers. A fetch response resolving
    // after this point hits a closed channel and is dropped.
    scheduler.cancel();

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on three things at once: keyboard input, widget events from
/// the polling task, and a periodic tick that keeps the uptime and log
/// panel fresh.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_rx: &mut mpsc::Receiver<WidgetEvent>,
    scheduler: &RefreshScheduler,
    poller: &Arc<Poller>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|frame| ui::draw(frame, app, poller.request_in_flight()))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event, scheduler, poller);
                    }
                }
            } => {}

            // Periodic tick for redrawing
            _ = tick_interval.tick() => {}

            // Widget events from the polling task
            Some(widget_event) = event_rx.recv() => {
                app.apply_event(widget_event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_key_event(
    app: &mut App,
    key: KeyEvent,
    scheduler: &RefreshScheduler,
    poller: &Arc<Poller>,
) {
    // Some terminals send both press and release events
    if key.kind == KeyEventKind::Release {
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
        }
        // Manual refresh: may race a scheduled tick; last response wins
        KeyCode::Char('r') => {
            tracing::info!("Manual refresh");
            poller.spawn_poll();
        }
        KeyCode::Char(']') => {
            app.range_longer();
            tracing::info!("Range set to {}", app.window.range);
        }
        KeyCode::Char('[') => {
            app.range_shorter();
            tracing::info!("Range set to {}", app.window.range);
        }
        KeyCode::Char(',') => app.window_earlier(),
        KeyCode::Char('.') => app.window_later(),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            let interval = app.refresh_slower();
            scheduler.reset(interval);
            tracing::info!("Refresh interval set to {}s", interval.as_secs());
        }
        KeyCode::Char('-') => {
            let interval = app.refresh_faster();
            scheduler.reset(interval);
            tracing::info!("Refresh interval set to {}s", interval.as_secs());
        }
        KeyCode::Char('t') => app.next_theme(),
        _ => {}
    }
}
