#![forbid(unsafe_code)]

//! Structured logging.
//!
//! The crate emits `tracing` events and never installs a subscriber itself:
//!
//! | Level   | Events                                                   |
//! |---------|----------------------------------------------------------|
//! | `warn`  | clamped surface constraints                              |
//! | `debug` | drag begin/end/cancel, full turns, page changes, no-ops  |
//! | `trace` | per-frame edge positions and settle progress             |
//!
//! Hosts without their own subscriber can enable the `tracing-json` feature
//! and call [`init_json_logging`] for newline-delimited JSON on stderr.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "pagecurl_core=info";

/// Install a global JSON subscriber filtered by `RUST_LOG`
/// (default [`DEFAULT_FILTER`]).
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
}
