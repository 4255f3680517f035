//! Test subscriber shared by unit and integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Quiet unless asked: store retries and rejected requests log at `warn`,
/// which is what most failing tests need to see.
const DEFAULT_FILTER: &str = "warn";

/// Install the test subscriber once per process.
///
/// `TEST_LOG` takes precedence over `RUST_LOG`. `TEST_LOG_FORMAT=json`
/// switches to the production line format for checking structured fields.
pub fn init() {
    INSTALLED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let json = std::env::var("TEST_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

        let builder = fmt().with_env_filter(filter).with_test_writer();
        // Another harness may already own the global subscriber.
        let _ = if json {
            builder.json().try_init()
        } else {
            builder.without_time().try_init()
        };
    });
}
