//! `opsdesk-observability` — process-wide tracing/logging setup.
//!
//! The authorization core itself only emits `tracing` events (login/logout,
//! discarded persisted state, persistence warnings); hosts embedding it call
//! [`init`] once to get structured output.

use tracing_subscriber::EnvFilter;

/// Initialize tracing/logging for the process.
///
/// JSON logs with timestamps, filtered via `RUST_LOG` (default `info`).
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    init_with_default_filter("info");
}

/// Like [`init`], with an explicit fallback filter for when `RUST_LOG` is
/// unset (e.g. `"info,opsdesk_session=debug"`).
pub fn init_with_default_filter(default: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default.to_string()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
