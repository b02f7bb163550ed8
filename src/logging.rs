//! Tracing subscriber setup for the command line tools.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Send log events to stderr, keeping stdout free for the report itself.
///
/// The `RUST_LOG` environment variable takes precedence over `default_level` (e.g. "info" or
/// "finance_tracker=debug").
pub fn setup_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    // Ignore the error from a subscriber that was already installed, e.g. by a test harness.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_log)
        .try_init();
}
