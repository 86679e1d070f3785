use std::time::Duration;

use tokio::sync::mpsc;

/// Trailing-edge debounce over a channel of raw events.
///
/// Every event restarts the quiet period; only the last event of a burst is
/// yielded, once `quiet` has passed without another one.
pub struct Debouncer<T> {
    rx: mpsc::UnboundedReceiver<T>,
    quiet: Duration,
}

impl<T> Debouncer<T> {
    pub fn new(rx: mpsc::UnboundedReceiver<T>, quiet: Duration) -> Self {
        Self { rx, quiet }
    }

    /// Wait for the next settled burst.
    ///
    /// Returns `None` once the source closes. A burst still pending when the
    /// source closes is dropped.
    pub async fn next(&mut self) -> Option<T> {
        let mut pending = self.rx.recv().await?;
        if self.quiet.is_zero() {
            return Some(pending);
        }

        loop {
            tokio::select! {
                next = self.rx.recv() => match next {
                    Some(event) => pending = event,
                    None => return None,
                },
                _ = tokio::time::sleep(self.quiet) => return Some(pending),
            }
        }
    }
}
