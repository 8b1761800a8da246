use std::sync::Once;

use tracing_subscriber::EnvFilter;

static START: Once = Once::new();

/// Initialize tracing for test output. Idempotent.
pub fn init() {
    START.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
