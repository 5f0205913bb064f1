//! Observability subsystem
//!
//! Structured JSON logs through `tracing`:
//! - one log line = one event, on stderr
//! - every line carries a typed `event` field
//! - `RUST_LOG` overrides the configured level
//!
//! # Usage
//!
//! ```ignore
//! use dynaform::observability::{self, Event};
//!
//! observability::init("info");
//! tracing::info!(event = %Event::Serving, addr = %addr, "listening");
//! ```

mod events;

pub use events::Event;

use tracing_subscriber::EnvFilter;

/// Builds the filter: `RUST_LOG` when set and valid, `level` otherwise.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global JSON subscriber, writing to stderr.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(level: &str) {
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter(level))
        .with_current_span(false)
        .with_writer(std::io::stderr)
        .try_init();
}
