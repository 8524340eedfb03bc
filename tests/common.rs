use std::sync::Once;

static TRACING: Once = Once::new();

/// Installs a TRACE-level subscriber writing through the test harness, so
/// `--nocapture` shows the crate's trace events. Safe to call from every test.
#[allow(unused)]
pub fn init_tracing() {
    TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .init();
    });
}
