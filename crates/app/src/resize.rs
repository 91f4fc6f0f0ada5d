//! Debounced window-resize handling.
//!
//! Resize events arrive in bursts. Only the trailing edge matters: every
//! event pushes the deadline back to `now + wait`, and the redraw runs once
//! the window has been quiet for `wait`.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};

use mxgrid_domain::grid::Viewport;

/// Quiet period before a redraw.
pub const DEFAULT_RESIZE_DEBOUNCE: Duration = Duration::from_millis(200);

/// Trailing-edge debouncer keeping the most recent value.
#[derive(Debug)]
pub struct Debouncer<T> {
    wait: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    #[must_use]
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    /// Record an event, replacing any pending one and rescheduling the
    /// deadline to `now + wait`.
    pub fn trigger(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.wait, value));
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    /// Take the pending value when its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending.take() {
            Some((deadline, value)) if deadline <= now => Some(value),
            pending => {
                self.pending = pending;
                None
            }
        }
    }

    /// Take the pending value regardless of its deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }
}

/// Drive `redraw` from a stream of window sizes until the stream closes.
///
/// A redraw still pending when the stream closes runs immediately. Returns
/// the number of redraws performed.
pub async fn run_resize_loop<F>(
    mut events: mpsc::Receiver<Viewport>,
    wait: Duration,
    mut redraw: F,
) -> usize
where
    F: FnMut(Viewport) + Send,
{
    let mut debouncer = Debouncer::new(wait);
    let mut fired = 0;

    loop {
        let deadline = debouncer.deadline();
        tokio::select! {
            event = events.recv() => {
                let Some(window) = event else {
                    if let Some(window) = debouncer.flush() {
                        tracing::debug!(?window, "resize stream closed, flushing pending redraw");
                        redraw(window);
                        fired += 1;
                    }
                    break;
                };
                debouncer.trigger(window, Instant::now());
            }
            () = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                if let Some(window) = debouncer.poll(Instant::now()) {
                    tracing::debug!(?window, "window quiet, redrawing");
                    redraw(window);
                    fired += 1;
                }
            }
        }
    }

    fired
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn should_hold_value_until_deadline() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DEFAULT_RESIZE_DEBOUNCE);

        debouncer.trigger(1, start);

        assert_eq!(debouncer.poll(start + Duration::from_millis(199)), None);
        assert_eq!(debouncer.poll(start + Duration::from_millis(200)), Some(1));
        assert_eq!(debouncer.deadline(), None);
    }

    #[test]
    fn should_reschedule_and_keep_latest_when_triggered_again() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));

        debouncer.trigger("first", start);
        debouncer.trigger("second", start + Duration::from_millis(80));

        assert_eq!(
            debouncer.deadline(),
            Some(start + Duration::from_millis(180))
        );
        assert_eq!(debouncer.poll(start + Duration::from_millis(120)), None);
        assert_eq!(debouncer.flush(), Some("second"));
        assert_eq!(debouncer.flush(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn should_fire_once_after_quiet_period_when_events_burst() {
        let (tx, rx) = mpsc::channel(16);
        let fires = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&fires);
        let start = Instant::now();
        let handle = tokio::spawn(run_resize_loop(rx, DEFAULT_RESIZE_DEBOUNCE, move |window| {
            sink.lock().unwrap().push((Instant::now(), window));
        }));

        for width in 0..5 {
            tx.send(Viewport::new(1000 + width, 800)).await.unwrap();
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
        drop(tx);

        assert_eq!(handle.await.unwrap(), 1);
        let fires = fires.lock().unwrap();
        assert_eq!(fires.len(), 1);
        // last event at 200ms, quiet window of 200ms
        assert_eq!(fires[0].0 - start, Duration::from_millis(400));
        assert_eq!(fires[0].1, Viewport::new(1004, 800));
    }

    #[tokio::test(start_paused = true)]
    async fn should_fire_per_burst_when_bursts_are_separated() {
        let (tx, rx) = mpsc::channel(16);
        let count = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&count);
        let handle = tokio::spawn(run_resize_loop(rx, DEFAULT_RESIZE_DEBOUNCE, move |_| {
            *sink.lock().unwrap() += 1;
        }));

        tx.send(Viewport::new(800, 600)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(300)).await;
        tx.send(Viewport::new(900, 600)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(300)).await;
        drop(tx);

        assert_eq!(handle.await.unwrap(), 2);
        assert_eq!(*count.lock().unwrap(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn should_flush_pending_redraw_when_stream_closes() {
        let (tx, rx) = mpsc::channel(16);
        let fires = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&fires);
        let start = Instant::now();

        tx.send(Viewport::new(640, 480)).await.unwrap();
        drop(tx);
        let fired = run_resize_loop(rx, DEFAULT_RESIZE_DEBOUNCE, move |window| {
            sink.lock().unwrap().push((Instant::now(), window));
        })
        .await;

        assert_eq!(fired, 1);
        let fires = fires.lock().unwrap();
        assert_eq!(fires[0].1, Viewport::new(640, 480));
        assert!(fires[0].0 - start < DEFAULT_RESIZE_DEBOUNCE);
    }

    #[tokio::test]
    async fn should_not_fire_when_no_event_arrived() {
        let (tx, rx) = mpsc::channel::<Viewport>(1);
        drop(tx);

        let fired = run_resize_loop(rx, DEFAULT_RESIZE_DEBOUNCE, |_| {}).await;

        assert_eq!(fired, 0);
    }
}
