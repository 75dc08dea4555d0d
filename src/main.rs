// gaugemon - scalar gauge widget for a query endpoint
//
// Polls a time-series query endpoint at a configurable interval and
// renders the latest scalar result as a radial gauge in the terminal.
//
// Architecture:
// - Scheduler: self-rescheduling poll timer (start/reset/cancel)
// - Query client (reqwest): fetches and classifies one scalar per tick
// - Event channel: broadcasts redraws and error lists to the display
// - TUI (ratatui): half-donut gauge with threshold coloring
// - Graph utilities: duration algebra and time-window navigation

mod cli;
mod config;
mod demo;
mod events;
mod gauge;
mod graph;
mod logging;
mod poller;
mod query;
mod scheduler;
mod theme;
mod tui;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, oneshot};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, LogRotation, VERSION};
use events::WidgetEvent;
use logging::{LogBuffer, TuiLogLayer};
use poller::Poller;
use query::ScalarQueryClient;
use scheduler::RefreshScheduler;
use tui::app::App;

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config --show, --reset, --edit, --path)
    if cli::handle_cli() {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::from_env();
    let log_buffer = LogBuffer::new();

    // The guard must stay alive so file logs flush on exit
    let _file_guard = init_tracing(&config, &log_buffer);

    tracing::info!("gaugemon v{} starting", VERSION);

    // Channel from the polling task to the display
    let (event_tx, event_rx) = mpsc::channel::<WidgetEvent>(64);

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("Failed to build HTTP client")?;
    let client = ScalarQueryClient::new(http);

    // Demo mode supersedes real polling: the poller gets an empty
    // expression (scheduled ticks become silent no-ops) and a task
    // feeds synthetic scalars through the same channel.
    let mut demo_shutdown = None;
    let poller = if config.demo_mode {
        tracing::info!("Demo mode: synthetic scalars, no polling");
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        demo_shutdown = Some(shutdown_tx);
        tokio::spawn(demo::run_demo(
            event_tx.clone(),
            shutdown_rx,
            config.widget.max,
        ));
        Arc::new(Poller::new(
            client,
            String::new(),
            String::new(),
            event_tx.clone(),
        ))
    } else {
        tracing::info!(
            "Polling {} every {}s",
            config.server_url,
            config.widget.refresh
        );
        Arc::new(Poller::new(
            client,
            config.server_url.clone(),
            config.widget.expression.clone(),
            event_tx.clone(),
        ))
    };

    // Fire the first poll immediately, then repeat. Each tick awaits
    // its fetch, so scheduled polls never overlap each other.
    let tick_poller = Arc::clone(&poller);
    let scheduler = RefreshScheduler::start(
        Duration::from_secs(config.widget.refresh),
        move || {
            let poller = Arc::clone(&tick_poller);
            async move {
                poller.poll().await;
            }
        },
    );

    if config.enable_tui {
        let app = App::new(&config, log_buffer.clone());
        tui::run_tui(app, event_rx, scheduler, poller).await?;
    } else {
        run_headless(event_rx, scheduler).await;
    }

    if let Some(shutdown) = demo_shutdown {
        let _ = shutdown.send(());
    }

    Ok(())
}

/// Initialize tracing with conditional output.
///
/// In TUI mode logs go to the in-memory buffer (anything printed to
/// stdout would garble the alternate screen); in headless mode they go
/// to stdout. File logging is additive and opt-in.
///
/// Precedence: RUST_LOG env var > config file > default "info".
fn init_tracing(
    config: &Config,
    log_buffer: &LogBuffer,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let default_filter = format!("gaugemon={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let (file_layer, guard) = if config.logging.file_enabled {
        match std::fs::create_dir_all(&config.logging.file_dir) {
            Ok(()) => {
                let file_appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Daily => tracing_appender::rolling::daily(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Never => tracing_appender::rolling::never(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                };
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                // JSON format for structured log parsing
                let layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    let tui_layer = config
        .enable_tui
        .then(|| TuiLogLayer::new(log_buffer.clone()));
    let stdout_layer = (!config.enable_tui).then(|| tracing_subscriber::fmt::layer());

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(tui_layer)
        .with(stdout_layer)
        .init();

    guard
}

/// Headless mode: log scalars instead of drawing, until Ctrl-C.
async fn run_headless(mut event_rx: mpsc::Receiver<WidgetEvent>, scheduler: RefreshScheduler) {
    tracing::info!("Headless mode; Ctrl-C to exit");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            Some(event) = event_rx.recv() => {
                if let WidgetEvent::Redraw(Some(value)) = event {
                    tracing::info!("Scalar: {}", value);
                }
            }
        }
    }

    scheduler.cancel();
}
