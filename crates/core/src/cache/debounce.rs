//! Trailing-edge debouncing for user-driven refetches.
//!
//! Rapid selection changes should collapse into one backend call after a
//! quiet period. Each call within the window resets the timer and replaces
//! the pending arguments; there is no leading-edge invocation and no
//! max-wait ceiling.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

/// A trailing-edge debouncer around a callback.
///
/// `call` schedules the callback to run `wait` after the most recent call,
/// with the most recent arguments. A pending invocation that has not fired
/// is dropped when superseded or when the debouncer is dropped.
///
/// Must be used from within a tokio runtime.
pub struct Debouncer<T: Send + 'static> {
    wait: Duration,
    callback: Arc<dyn Fn(T) + Send + Sync>,
    pending: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Wrap `callback` so it fires `wait` after the last call.
    pub fn new(wait: Duration, callback: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self { wait, callback: Arc::new(callback), pending: Arc::new(Mutex::new(None)) }
    }

    /// Schedule an invocation, cancelling any still-pending one.
    pub fn call(&self, value: T) {
        let mut pending = self.pending.lock().expect("debounce state poisoned");
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        let wait = self.wait;
        let callback = self.callback.clone();
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            callback(value);
        }));
    }

    /// Cancel any pending invocation without firing it.
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().expect("debounce state poisoned");
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }
}

impl<T: Send + 'static> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}
