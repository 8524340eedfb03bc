use std::cell::UnsafeCell;
use std::sync::{Arc, Weak};

use tracing::trace;

use crate::lock::UnfairLock;

mod cursor;
pub use cursor::Cursor;

/// A single pool entry: a non-owning handle to one listener.
struct Slot<T: ?Sized> {
    handle: Weak<T>,
}

impl<T: ?Sized> Slot<T> {
    fn new(listener: &Arc<T>) -> Self { Self { handle: Arc::downgrade(listener) } }

    /// Whether the listener behind this slot is still alive.
    fn is_alive(&self) -> bool { self.handle.strong_count() > 0 }

    /// Upgrades the handle to a live listener, or `None` if it is gone.
    fn listener(&self) -> Option<Arc<T>> { self.handle.upgrade() }
}

/// An ordered, thread-safe pool of weakly-held listeners.
///
/// Listeners are owned elsewhere as `Arc<T>`; the pool stores weak handles only
/// and never extends a listener's lifetime. Dropping the last `Arc` outside the
/// pool is enough to unregister - the dead handle lingers until a [`Cursor`]
/// passes its position and prunes it, or until an explicit [`remove`].
///
/// Every operation, including each individual cursor step, runs inside one
/// critical section of the pool's [`UnfairLock`]. Individual operations are
/// atomic with respect to each other, but a whole traversal is not: the lock is
/// dropped between cursor steps (see [`Cursor`]).
///
/// The lock is non-reentrant. Calling back into the same pool from inside a
/// listener invoked synchronously while stepping a cursor deadlocks; collect
/// the cursor into a `Vec` first if listeners need to mutate the pool.
///
/// [`remove`]: ListenerPool::remove
pub struct ListenerPool<T: ?Sized> {
    lock: UnfairLock,
    slots: UnsafeCell<Vec<Slot<T>>>,
}

// Safety: `slots` is only read or written while `lock` is held, and the weak
// handles themselves are Send + Sync whenever T is.
unsafe impl<T: ?Sized + Send + Sync> Send for ListenerPool<T> {}
unsafe impl<T: ?Sized + Send + Sync> Sync for ListenerPool<T> {}

impl<T: ?Sized> ListenerPool<T> {
    pub fn new() -> Self { Self { lock: UnfairLock::new(), slots: UnsafeCell::new(Vec::new()) } }

    /// Appends a weak handle to `listener` at the tail of the pool.
    ///
    /// O(1); no liveness check is made at append time, and appending the same
    /// listener twice stores two slots.
    pub fn append(&self, listener: &Arc<T>) {
        self.lock.with_lock(|| {
            let slots = unsafe { &mut *self.slots.get() };
            slots.push(Slot::new(listener));
            trace!(len = slots.len(), "listener appended");
        })
    }

    /// Removes the first slot that currently resolves to `listener`.
    ///
    /// Removing a listener that is not in the pool is a no-op, as is removing
    /// the same listener a second time. Listeners are compared by identity
    /// (`Arc::ptr_eq`), never by value.
    pub fn remove(&self, listener: &Arc<T>) {
        self.lock.with_lock(|| {
            let slots = unsafe { &mut *self.slots.get() };
            let found = slots
                .iter()
                .position(|slot| slot.listener().is_some_and(|held| Arc::ptr_eq(&held, listener)));
            if let Some(index) = found {
                slots.remove(index);
                trace!(index, len = slots.len(), "listener removed");
            }
        })
    }

    /// Number of slots at this instant, dead ones included.
    ///
    /// Dead slots are only discovered during traversal, so this can overcount
    /// live listeners until a cursor has walked past them.
    pub fn len(&self) -> usize { self.lock.with_lock(|| unsafe { &*self.slots.get() }.len()) }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Begins a newest-to-oldest traversal of the pool.
    ///
    /// The cursor captures the current tail position under the lock; see
    /// [`Cursor`] for stepping, pruning, and concurrency behavior.
    pub fn cursor(&self) -> Cursor<'_, T> {
        let index = self.lock.with_lock(|| unsafe { &*self.slots.get() }.len() as isize - 1);
        Cursor { index, pool: self }
    }
}

impl<T: ?Sized> Default for ListenerPool<T> {
    fn default() -> Self { Self::new() }
}

impl<T: ?Sized> std::fmt::Debug for ListenerPool<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (len, live) = self.lock.with_lock(|| {
            let slots = unsafe { &*self.slots.get() };
            (slots.len(), slots.iter().filter(|slot| slot.is_alive()).count())
        });
        f.debug_struct("ListenerPool").field("len", &len).field("live", &live).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_and_remove_adjust_len() {
        let pool: ListenerPool<String> = ListenerPool::new();
        assert_eq!(pool.len(), 0);
        assert!(pool.is_empty());

        let a = Arc::new("a".to_string());
        let b = Arc::new("b".to_string());
        pool.append(&a);
        assert_eq!(pool.len(), 1);
        pool.append(&b);
        assert_eq!(pool.len(), 2);

        pool.remove(&a);
        assert_eq!(pool.len(), 1);
        pool.remove(&b);
        assert_eq!(pool.len(), 0);
    }

    #[test]
    fn remove_is_idempotent() {
        let pool: ListenerPool<String> = ListenerPool::new();
        let a = Arc::new("a".to_string());
        pool.append(&a);

        pool.remove(&a);
        pool.remove(&a);
        assert_eq!(pool.len(), 0);
    }

    #[test]
    fn removing_an_absent_listener_is_a_noop() {
        let pool: ListenerPool<String> = ListenerPool::new();
        let a = Arc::new("a".to_string());
        let stranger = Arc::new("a".to_string());
        pool.append(&a);

        // Identity comparison: an equal value is not the same listener.
        pool.remove(&stranger);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn yields_newest_first() {
        let pool: ListenerPool<u32> = ListenerPool::new();
        let listeners: Vec<_> = (1..=4).map(Arc::new).collect();
        for listener in &listeners {
            pool.append(listener);
        }

        let seen: Vec<u32> = pool.cursor().map(|l| *l).collect();
        assert_eq!(seen, [4, 3, 2, 1]);
    }

    #[test]
    fn dead_slot_stays_until_traversal() {
        let pool: ListenerPool<String> = ListenerPool::new();
        pool.append(&Arc::new("ephemeral".to_string()));

        // The Arc above is already gone, but nothing has walked the pool yet.
        assert_eq!(pool.len(), 1);

        assert_eq!(pool.cursor().count(), 0);
        assert_eq!(pool.len(), 0);
    }

    #[test]
    fn traversal_skips_and_prunes_dead_listeners() {
        let pool: ListenerPool<String> = ListenerPool::new();
        let a = Arc::new("a".to_string());
        let b = Arc::new("b".to_string());
        let c = Arc::new("c".to_string());
        pool.append(&a);
        pool.append(&b);
        pool.append(&c);
        assert_eq!(pool.len(), 3);

        drop(b);

        let seen: Vec<String> = pool.cursor().map(|l| l.to_string()).collect();
        assert_eq!(seen, ["c", "a"]);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn abandoned_cursor_leaves_pool_valid() {
        let pool: ListenerPool<u32> = ListenerPool::new();
        let kept = Arc::new(1);
        pool.append(&Arc::new(0));
        pool.append(&kept);

        let mut cursor = pool.cursor();
        assert_eq!(cursor.next().as_deref(), Some(&1));
        drop(cursor);

        // The dead slot below the cursor was never reached, so it is still counted.
        assert_eq!(pool.len(), 2);
        let seen: Vec<u32> = pool.cursor().map(|l| *l).collect();
        assert_eq!(seen, [1]);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn debug_reports_live_and_total() {
        let pool: ListenerPool<u32> = ListenerPool::new();
        let kept = Arc::new(1);
        pool.append(&kept);
        pool.append(&Arc::new(2));

        assert_eq!(format!("{pool:?}"), "ListenerPool { len: 2, live: 1 }");
    }
}
