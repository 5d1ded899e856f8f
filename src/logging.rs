//! Diagnostic tracing
//!
//! Resolver and sweep decisions are emitted as `tracing` events. The
//! binary installs a compact stderr subscriber filtered by `RUST_LOG`
//! (default `warn`), e.g. `RUST_LOG=claude_workspace=debug`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}
