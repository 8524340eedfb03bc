use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::trace;

/// Intervals below this are clamped up.
const MIN_INTERVAL: Duration = Duration::from_micros(100);

/// A one-shot or repeating timer driving a callback from a Tokio task.
///
/// The first fire happens after one full interval. A non-repeating timer stops
/// itself after firing; a repeating timer fires every interval until
/// [`stop`](Timer::stop) or drop. Stopping and restarting begins a fresh
/// interval. Must be started from within a Tokio runtime.
pub struct Timer {
    interval: Duration,
    repeats: bool,
    action: Arc<dyn Fn() + Send + Sync>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Timer {
    pub fn new(interval: Duration, repeats: bool, action: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
            repeats,
            action: Arc::new(action),
            task: Mutex::new(None),
        }
    }

    /// Starts the timer. Does nothing if it is already running.
    pub fn start(&self) {
        let mut task = self.task.lock().unwrap();
        if task.as_ref().is_some_and(|t| !t.is_finished()) {
            return;
        }

        let interval = self.interval;
        let repeats = self.repeats;
        let action = self.action.clone();
        *task = Some(tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                action();
                if !repeats {
                    break;
                }
            }
        }));
        trace!(?interval, repeats, "timer started");
    }

    /// Stops the timer without firing.
    pub fn stop(&self) {
        if let Some(task) = self.task.lock().unwrap().take() {
            task.abort();
            trace!("timer stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.lock().unwrap().as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if let Some(task) = self.task.lock().unwrap().take() {
            task.abort();
        }
    }
}
