//! Activity logging
//!
//! Thin helpers over `tracing` so every load reports the same fields. The
//! crate never installs a subscriber; applications choose where events go.

use std::time::Duration;

pub(crate) fn log_start(event: &str, method: &str, url: &str) {
    tracing::debug!(event, method, url, "started");
}

pub(crate) fn log_info(event: &str, url: &str, elapsed: Duration) {
    tracing::debug!(
        event,
        url,
        elapsed_ms = elapsed.as_millis() as u64,
        "succeeded in {}ms",
        elapsed.as_millis()
    );
}

pub(crate) fn log_error(event: &str, url: &str, elapsed: Duration, error: &str) {
    tracing::warn!(
        event,
        url,
        elapsed_ms = elapsed.as_millis() as u64,
        error,
        "failed in {}ms",
        elapsed.as_millis()
    );
}
