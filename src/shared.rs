use std::sync::{Arc, Mutex, Weak};

/// Shares a single instance for as long as anyone holds it.
///
/// [`get`](WeakShared::get) hands out the existing instance while at least one
/// strong reference is alive; once the last holder drops it, the next `get`
/// builds a fresh one with the factory. The wrapper itself keeps only a weak
/// handle and never extends the instance's lifetime.
pub struct WeakShared<T> {
    factory: Box<dyn Fn() -> Arc<T> + Send + Sync>,
    handle: Mutex<Weak<T>>,
}

impl<T> WeakShared<T> {
    pub fn new(factory: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self { factory: Box::new(move || Arc::new(factory())), handle: Mutex::new(Weak::new()) }
    }

    /// Returns the shared instance, creating one if none is currently held.
    pub fn get(&self) -> Arc<T> {
        let mut handle = self.handle.lock().unwrap();
        if let Some(instance) = handle.upgrade() {
            return instance;
        }
        let instance = (self.factory)();
        *handle = Arc::downgrade(&instance);
        instance
    }
}
