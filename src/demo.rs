// Demo mode: generate a synthetic scalar instead of polling a server
//
// Feeds a slow sine wave through the same event channel the real
// poller uses, so the gauge sweeps across all three threshold zones.
// Run with: GAUGEMON_DEMO=1 cargo run --release

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::sleep;

use crate::events::WidgetEvent;

/// Interval between demo samples
const SAMPLE_INTERVAL: Duration = Duration::from_millis(500);

/// Synthetic scalar at step `i`: a sine sweep over [0, max] that
/// occasionally overshoots so the saturation clamp is visible too.
fn demo_value(step: u64, max: f64) -> f64 {
    let phase = step as f64 / 40.0 * std::f64::consts::TAU;
    let base = (phase.sin() * 0.5 + 0.5) * max;
    // Brief overshoot once per cycle
    if step % 40 == 10 {
        max * 1.15
    } else {
        base
    }
}

/// Emit demo values until shutdown is signalled or the TUI goes away.
pub async fn run_demo(
    tx: mpsc::Sender<WidgetEvent>,
    mut shutdown_rx: oneshot::Receiver<()>,
    max: f64,
) {
    // Initial delay to let the TUI render once
    sleep(Duration::from_millis(300)).await;

    let mut step = 0u64;
    loop {
        if shutdown_rx.try_recv().is_ok() {
            return;
        }

        let value = demo_value(step, max);
        if tx.send(WidgetEvent::Errors(Vec::new())).await.is_err() {
            return;
        }
        if tx.send(WidgetEvent::Redraw(Some(value))).await.is_err() {
            return;
        }

        step += 1;
        sleep(SAMPLE_INTERVAL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_values_cover_all_zones() {
        let max = 100.0;
        let mut saw_low = false;
        let mut saw_mid = false;
        let mut saw_high = false;
        for step in 0..40 {
            let v = demo_value(step, max);
            if v < 40.0 {
                saw_low = true;
            } else if v < 75.0 {
                saw_mid = true;
            } else {
                saw_high = true;
            }
        }
        assert!(saw_low && saw_mid && saw_high);
    }

    #[test]
    fn demo_overshoots_once_per_cycle() {
        assert!(demo_value(10, 100.0) > 100.0);
        assert!(demo_value(50, 100.0) > 100.0);
    }
}
