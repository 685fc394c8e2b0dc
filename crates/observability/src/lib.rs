//! `bayline-observability` — shared tracing/logging setup.
//!
//! Services emit structured events through `tracing`; this crate owns the
//! subscriber so every binary (and test) configures logging the same way.

use tracing_subscriber::EnvFilter;

/// Default level when `RUST_LOG` is not set.
const DEFAULT_DIRECTIVE: &str = "info";

/// Install the process-wide subscriber: JSON lines, level filtering via
/// `RUST_LOG`, timestamps, no target noise.
///
/// Idempotent. Later calls (e.g. from parallel tests) are no-ops.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init();
        init();
        tracing::info!("still alive after double init");
    }
}
