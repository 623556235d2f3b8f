//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Validation pipeline, middleware, server produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (evaluation counters and latency histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Every rejection is logged with the stage that produced it
//! - Metric updates are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
