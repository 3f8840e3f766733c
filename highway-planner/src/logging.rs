//! Tracing subscriber setup.
//!
//! Logs go to stderr: stdout carries the command protocol's responses.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt};

/// Build the filter from `RUST_LOG`, falling back to `default_level`.
fn env_filter(default_level: LevelFilter) -> EnvFilter {
    let rust_log =
        std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| default_level.to_string());
    EnvFilter::try_new(rust_log).unwrap_or_else(|err| {
        eprintln!(
            "invalid {}, falling back to level '{}' - {}",
            EnvFilter::DEFAULT_ENV,
            default_level,
            err,
        );
        EnvFilter::new(default_level.to_string())
    })
}

/// Install the global subscriber.
///
/// Fails if a global subscriber is already set; the existing one stays.
pub fn init_logger() -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(env_filter(LevelFilter::INFO))
        .try_init()
}

/// Install a subscriber for the current test only.
///
/// Output is captured by the test harness. The subscriber is removed when
/// the returned guard is dropped.
pub fn init_test_logger() -> tracing::subscriber::DefaultGuard {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .with(env_filter(LevelFilter::DEBUG))
        .set_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_global_logger_is_reported() {
        // Whichever call comes first installs it
        let _ = init_logger();
        assert!(init_logger().is_err());
    }
}
