//! Per-request performance logging.
//!
//! Each service method reports its elapsed time; anything slower than the
//! threshold is flagged so slow handlers show up in the logs before users
//! complain about them.

use std::time::Instant;

use tracing::{debug, warn};

/// Handlers slower than this are logged at `warn`.
const LONG_RUNNING_MILLIS: u128 = 500;

/// Guard that logs the elapsed time of one named operation on drop.
pub struct Timed {
    operation: &'static str,
    started: Instant,
}

impl Timed {
    pub fn start(operation: &'static str) -> Self {
        Self {
            operation,
            started: Instant::now(),
        }
    }
}

impl Drop for Timed {
    fn drop(&mut self) {
        let elapsed = self.started.elapsed();
        if elapsed.as_millis() > LONG_RUNNING_MILLIS {
            warn!(
                operation = self.operation,
                elapsed_ms = elapsed.as_millis() as u64,
                "long-running request"
            );
        } else {
            debug!(
                operation = self.operation,
                elapsed_ms = elapsed.as_millis() as u64,
                "request completed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_guard_drops_cleanly() {
        let guard = Timed::start("noop");
        drop(guard);
    }
}
