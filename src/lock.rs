use std::sync::{Condvar, Mutex};
use std::thread::{self, ThreadId};

/// Lightweight, non-reentrant mutual exclusion for short critical sections.
///
/// The lock is unfair: an unlocking thread may immediately reacquire before any
/// woken waiter gets a chance to run, so starvation of a waiter is possible
/// under heavy contention. No FIFO ordering is promised, only eventual
/// acquisition.
///
/// The lock must be released by the thread that acquired it. Releasing from a
/// different thread, or releasing while unlocked, is a programming error and
/// panics rather than corrupting the lock state. A thread that already holds
/// the lock and calls [`lock`](UnfairLock::lock) again deadlocks.
pub struct UnfairLock {
    state: Mutex<Option<ThreadId>>,
    unlocked: Condvar,
}

impl UnfairLock {
    pub fn new() -> Self { Self { state: Mutex::new(None), unlocked: Condvar::new() } }

    /// Blocks the calling thread until the lock is acquired.
    pub fn lock(&self) {
        let mut owner = self.state.lock().unwrap();
        while owner.is_some() {
            owner = self.unlocked.wait(owner).unwrap();
        }
        *owner = Some(thread::current().id());
    }

    /// Releases the lock.
    ///
    /// Panics if the lock is not held, or is held by another thread.
    pub fn unlock(&self) {
        let mut owner = self.state.lock().unwrap();
        match *owner {
            Some(holder) if holder == thread::current().id() => *owner = None,
            // Let go of the inner guard before panicking so the misuse panic
            // does not poison the state mutex and mask the contract message on
            // later use.
            Some(_) => {
                drop(owner);
                panic!("UnfairLock unlocked from a thread that does not hold it");
            }
            None => {
                drop(owner);
                panic!("UnfairLock unlocked while not locked");
            }
        }
        drop(owner);
        self.unlocked.notify_one();
    }

    /// Attempts to acquire the lock without blocking; returns whether it was
    /// acquired.
    ///
    /// Do not retry this in a loop on failure - that amounts to an inefficient
    /// [`lock`](UnfairLock::lock) that hides the waiter from the scheduler.
    /// Either commit to `lock()` or proceed without the lock.
    pub fn try_lock(&self) -> bool {
        let mut owner = self.state.lock().unwrap();
        if owner.is_some() {
            return false;
        }
        *owner = Some(thread::current().id());
        true
    }

    /// Runs `f` with the lock held, releasing it on every exit path including
    /// an unwind out of `f`.
    pub fn with_lock<R>(&self, f: impl FnOnce() -> R) -> R {
        self.lock();
        let _release = Release(self);
        f()
    }
}

impl Default for UnfairLock {
    fn default() -> Self { Self::new() }
}

struct Release<'a>(&'a UnfairLock);

impl Drop for Release<'_> {
    fn drop(&mut self) { self.0.unlock(); }
}
