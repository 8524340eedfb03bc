/*!
Small sharp tools for event-driven services.

The centerpiece is [`ListenerPool`]: an ordered pool of weakly-held listeners
that any thread may register with, and whose iteration lazily forgets listeners
that have already been dropped. Around it sit a handful of leaf utilities:
trailing-edge debouncing, a task-backed timer, async retries, hex and base64
codecs, byte-order integer construction, and a delimiter-splitting reader.

# Listener pool

```rust
use std::sync::Arc;
use kitbag::ListenerPool;

let pool: ListenerPool<String> = ListenerPool::new();

let first = Arc::new("first".to_string());
let second = Arc::new("second".to_string());
pool.append(&first);
pool.append(&second);

// Newest listener first. A listener whose last Arc was dropped is skipped
// and silently removed from the pool.
let names: Vec<_> = pool.cursor().map(|l| l.to_string()).collect();
assert_eq!(names, ["second", "first"]);

// `for`-loop sugar over the same cursor:
for listener in &pool {
    println!("notifying {listener}");
}
```

The pool never owns its listeners. Registration stores a weak handle; whoever
holds the `Arc` controls the listener's lifetime, and dropping it is enough to
unregister (eventually - dead handles are pruned the next time a cursor passes
over them, or by an explicit [`ListenerPool::remove`]).
*/

mod debounce;
mod endian;
pub mod hex;
mod linewise;
mod lock;
mod pool;
mod retry;
mod shared;
mod strings;
mod timer;

pub use debounce::{Debouncer, DEFAULT_DEBOUNCE_DELAY};
pub use endian::{Endianness, FromBytes};
pub use linewise::LinewiseReader;
pub use lock::UnfairLock;
pub use pool::{Cursor, ListenerPool};
pub use retry::{retry, retrying, DEFAULT_RETRIES};
pub use shared::WeakShared;
pub use strings::StrExt;
pub use timer::Timer;
