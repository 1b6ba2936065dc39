use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Coalesces bursts of values: a value is emitted only after `delay` has
/// passed without a newer one.
///
/// Every `push` cancels the pending timer and starts a new one. Dropping the
/// debouncer cancels the pending timer without emitting. Must be used from
/// within a tokio runtime.
pub struct Debouncer<T> {
    delay: Duration,
    output: mpsc::UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (output, rx) = mpsc::unbounded_channel();
        (
            Self {
                delay,
                output,
                pending: None,
            },
            rx,
        )
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn push(&mut self, value: T) {
        self.cancel();
        let delay = self.delay;
        let output = self.output.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = output.send(value);
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
