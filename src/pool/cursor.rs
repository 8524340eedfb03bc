use std::sync::Arc;

use tracing::trace;

use super::ListenerPool;

/// A lazily pruning traversal over a [`ListenerPool`].
///
/// Live listeners are yielded newest-to-oldest: absent concurrent mutation, the
/// most recently appended live listener comes first and the earliest-appended
/// one last. Any slot found dead while stepping is removed from the pool for
/// good, whether or not the caller drains the cursor.
///
/// Each [`next`](Iterator::next) call is one independent critical section - the
/// pool lock is taken per step, not across the whole traversal, so appends and
/// removals on other threads interleave freely between steps. Removing a dead
/// slot only shifts positions the cursor has already passed, which leaves the
/// yielded sequence intact. A concurrent [`remove`](ListenerPool::remove)
/// below the cursor's position, however, shifts unvisited slots by one and can
/// make the traversal skip one live listener or revisit a position. That is the
/// accepted cost of per-step locking; callers needing an isolated view should
/// collect the cursor into a `Vec` before mutating.
///
/// Abandoning a cursor mid-traversal is always safe: it holds no resource, and
/// pruning already performed stays in effect.
pub struct Cursor<'a, T: ?Sized> {
    pub(super) index: isize,
    pub(super) pool: &'a ListenerPool<T>,
}

impl<T: ?Sized> Iterator for Cursor<'_, T> {
    type Item = Arc<T>;

    fn next(&mut self) -> Option<Arc<T>> {
        self.pool.lock.with_lock(|| {
            let slots = unsafe { &mut *self.pool.slots.get() };

            // Concurrent removals may have shrunk the pool past our position;
            // clamp back to the current tail instead of indexing out of bounds.
            if self.index >= slots.len() as isize {
                self.index = slots.len() as isize - 1;
            }

            while self.index >= 0 {
                let index = self.index as usize;
                match slots[index].listener() {
                    Some(listener) => {
                        self.index -= 1;
                        return Some(listener);
                    }
                    None => {
                        // Only slots above `index` shift down, and those were
                        // already visited.
                        slots.remove(index);
                        self.index -= 1;
                        trace!(index, len = slots.len(), "dead listener pruned");
                    }
                }
            }
            None
        })
    }
}

impl<'a, T: ?Sized> IntoIterator for &'a ListenerPool<T> {
    type Item = Arc<T>;
    type IntoIter = Cursor<'a, T>;

    /// `for`-loop sugar over [`ListenerPool::cursor`].
    fn into_iter(self) -> Cursor<'a, T> { self.cursor() }
}
