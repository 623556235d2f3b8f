//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Honour `RUST_LOG` over the configured directives
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Human-readable fmt layer on stdout
//! - Safe to call more than once (later calls are ignored)

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber with `default_directives` as fallback filter.
pub fn init(default_directives: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
