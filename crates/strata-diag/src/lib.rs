//! Diagnostics for the Strata voxel core: a swappable report sink, a
//! bounded-wait helper, and structured logging setup via the `tracing`
//! ecosystem.

mod reporter;
mod timeout;

pub use reporter::{CapturingReporter, Reporter, TracingReporter, reporter, set_reporter};
pub use timeout::{TimeoutError, with_timeout};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber for the Strata core.
///
/// Sets up console output with module targets, severity levels, and an
/// uptime timer. The filter defaults to `info` and respects `RUST_LOG`.
/// Call once at process startup; a second call will fail to install and
/// is ignored.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_env_filter());

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init();
}

/// Create an `EnvFilter` with the default filter string (`info` for all
/// targets). Useful for tests and for consistent default behavior.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new("info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_enables_info() {
        let filter = default_env_filter();
        let filter_str = format!("{}", filter);
        assert!(filter_str.contains("info"));
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging();
        init_logging();
    }
}
