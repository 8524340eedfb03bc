use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::trace;

/// Delay used by [`Debouncer::new`].
pub const DEFAULT_DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

/// Trailing-edge debouncer for an action taking one argument.
///
/// Every [`call`](Debouncer::call) supersedes the previous one; the action only
/// runs once the delay elapses with no newer call, and receives the argument of
/// the winning call. Scheduling happens on a Tokio task, so a `Debouncer` must
/// be created and called from within a Tokio runtime.
///
/// Dropping the debouncer cancels any pending invocation.
pub struct Debouncer<A = ()> {
    delay: Duration,
    action: Arc<dyn Fn(A) + Send + Sync>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<A: Send + 'static> Debouncer<A> {
    /// Creates a debouncer with the [default delay](DEFAULT_DEBOUNCE_DELAY).
    pub fn new(action: impl Fn(A) + Send + Sync + 'static) -> Self {
        Self::with_delay(DEFAULT_DEBOUNCE_DELAY, action)
    }

    pub fn with_delay(delay: Duration, action: impl Fn(A) + Send + Sync + 'static) -> Self {
        Self { delay, action: Arc::new(action), pending: Mutex::new(None) }
    }

    /// Cancels any pending invocation and schedules `action(argument)` after
    /// the debounce delay.
    pub fn call(&self, argument: A) {
        let delay = self.delay;
        let action = self.action.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action(argument);
        });

        if let Some(superseded) = self.pending.lock().unwrap().replace(handle) {
            superseded.abort();
        }
        trace!(?delay, "debounced call scheduled");
    }

    /// Cancels any pending invocation and runs the action immediately on the
    /// calling thread.
    pub fn fire(&self, argument: A) {
        self.cancel();
        (self.action)(argument);
    }

    /// Cancels the pending invocation, if any.
    pub fn cancel(&self) {
        if let Some(pending) = self.pending.lock().unwrap().take() {
            pending.abort();
        }
    }
}

impl<A> Drop for Debouncer<A> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.lock().unwrap().take() {
            pending.abort();
        }
    }
}
