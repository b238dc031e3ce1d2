//! Repeating, cancellable timer
//!
//! A `Ticker` runs a callback on a dedicated thread every `interval` until it
//! is cancelled or dropped. Cancelling joins the thread, so once `cancel`
//! returns the callback will not run again.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub(crate) struct Ticker {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Start calling `tick` every `interval`; the first call happens after one interval
    pub(crate) fn spawn(
        name: &str,
        interval: Duration,
        mut tick: impl FnMut() + Send + 'static,
    ) -> Self {
        let (stop, stopped) = mpsc::channel::<()>();
        let spawned = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                loop {
                    match stopped.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => tick(),
                        // Explicit stop or sender dropped
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            });

        let handle = match spawned {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::warn!(error = %e, ticker = name, "Could not start ticker thread");
                None
            }
        };

        Self {
            stop: Some(stop),
            handle,
        }
    }

    /// Whether the timer thread is running
    pub(crate) fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Stop the timer and wait for an in-flight tick to finish
    pub(crate) fn cancel(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            // A tick that cancels its own ticker must not join itself
            if handle.thread().id() != thread::current().id() && handle.join().is_err() {
                tracing::warn!("Ticker thread panicked");
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_ticks_until_cancelled() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let ticker = Ticker::spawn("test-ticker", Duration::from_millis(5), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(ticker.is_active());

        thread::sleep(Duration::from_millis(60));
        ticker.cancel();

        let after_cancel = count.load(Ordering::SeqCst);
        assert!(after_cancel >= 1);

        thread::sleep(Duration::from_millis(30));
        assert_eq!(count.load(Ordering::SeqCst), after_cancel);
    }

    #[test]
    fn test_drop_stops_ticking() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let ticker = Ticker::spawn("test-ticker", Duration::from_millis(5), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        drop(ticker);

        let after_drop = count.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(count.load(Ordering::SeqCst), after_drop);
    }
}
