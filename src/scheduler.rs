// Refresh scheduler - the widget's poll timer
//
// A self-rescheduling timer loop: fire the tick once immediately, then
// sleep-tick-rearm forever. The wait starts after the previous tick
// completes, so a slow fetch stretches the cycle instead of overlapping
// the next one. Implemented as a spawned task driven by a control
// channel rather than nested callbacks, which keeps reset and cancel
// explicit and testable.
//
// Lifecycle: Idle -> Scheduled -> Firing -> Scheduled -> ... with
// Cancelled as the terminal state. cancel() must be called when the
// owning widget is torn down; dropping the handle aborts the task as a
// backstop.

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Fallback used when a reset asks for a zero interval.
const MIN_INTERVAL: Duration = Duration::from_secs(1);

enum Command {
    Reset(Duration),
    Cancel,
}

/// Handle to a running refresh loop.
pub struct RefreshScheduler {
    control: mpsc::UnboundedSender<Command>,
    task: JoinHandle<()>,
}

fn normalize(interval: Duration) -> Duration {
    if interval.is_zero() {
        MIN_INTERVAL
    } else {
        interval
    }
}

impl RefreshScheduler {
    /// Start the loop: fire `tick` once now, then repeat every
    /// `interval` measured from each tick's completion.
    pub fn start<F, Fut>(interval: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let (control, mut commands) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            let mut interval = normalize(interval);

            tick().await;

            loop {
                tokio::select! {
                    () = tokio::time::sleep(interval) => {
                        tick().await;
                    }
                    command = commands.recv() => match command {
                        Some(Command::Reset(new_interval)) => {
                            // Dropping out of the select cancels the
                            // pending sleep; the next iteration rearms
                            // with the new interval. No immediate tick.
                            interval = normalize(new_interval);
                        }
                        Some(Command::Cancel) | None => return,
                    }
                }
            }
        });

        Self { control, task }
    }

    /// Cancel the pending wait and rearm with a new interval. Does not
    /// fire the tick.
    pub fn reset(&self, interval: Duration) {
        let _ = self.control.send(Command::Reset(interval));
    }

    /// Stop the loop permanently. Any pending wait is invalidated and
    /// never fires.
    pub fn cancel(&self) {
        let _ = self.control.send(Command::Cancel);
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        // A widget that forgot to cancel must not leak a live timer.
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_scheduler(interval: Duration) -> (RefreshScheduler, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let fired = Arc::clone(&count);
        let scheduler = RefreshScheduler::start(interval, move || {
            let fired = Arc::clone(&fired);
            async move {
                fired.fetch_add(1, Ordering::SeqCst);
            }
        });
        (scheduler, count)
    }

    /// Let the spawned scheduler task run up to the next await point.
    async fn settle() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn fires_immediately_on_start() {
        let (scheduler, count) = counting_scheduler(Duration::from_secs(5));
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        scheduler.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn spaces_ticks_by_interval() {
        let (scheduler, count) = counting_scheduler(Duration::from_secs(5));
        settle().await;

        tokio::time::advance(Duration::from_secs(5)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 2);

        // Just short of the next deadline: no fire yet
        tokio::time::advance(Duration::from_secs(4)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 2);

        tokio::time::advance(Duration::from_secs(1)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 3);

        scheduler.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn reset_rearms_without_firing() {
        let (scheduler, count) = counting_scheduler(Duration::from_secs(5));
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        scheduler.reset(Duration::from_secs(2));
        settle().await;
        // Reset itself does not fire the tick
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // The old 5s deadline is gone; the new 2s one fires
        tokio::time::advance(Duration::from_secs(2)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 2);

        scheduler.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_reset_falls_back_to_one_second() {
        let (scheduler, count) = counting_scheduler(Duration::from_secs(5));
        settle().await;

        scheduler.reset(Duration::ZERO);
        settle().await;
        tokio::time::advance(Duration::from_secs(1)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 2);

        scheduler.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_all_further_fires() {
        let (scheduler, count) = counting_scheduler(Duration::from_secs(5));
        settle().await;

        scheduler.reset(Duration::from_secs(2));
        scheduler.cancel();
        settle().await;

        tokio::time::advance(Duration::from_secs(60)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_tick_delays_the_next_wait() {
        let count = Arc::new(AtomicUsize::new(0));
        let fired = Arc::clone(&count);
        // Each tick takes 3s; with a 5s interval the cycle is 8s
        let scheduler = RefreshScheduler::start(Duration::from_secs(5), move || {
            let fired = Arc::clone(&fired);
            async move {
                tokio::time::sleep(Duration::from_secs(3)).await;
                fired.fetch_add(1, Ordering::SeqCst);
            }
        });
        settle().await;

        tokio::time::advance(Duration::from_secs(3)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // 5s wait, then the second tick's own 3s sleep. Advancing in two
        // steps lets the tick's sleep register at the wait's deadline
        // instead of an overshot clock.
        tokio::time::advance(Duration::from_secs(5)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        tokio::time::advance(Duration::from_secs(2)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        tokio::time::advance(Duration::from_secs(1)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 2);

        scheduler.cancel();
    }
}
