//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Build pipeline → Bind listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain in-flight requests → Exit
//!
//! Signals (signals.rs):
//!     SIGINT (Ctrl+C) or an explicit trigger → graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: an invalid config is fatal at startup
//! - One handle can stop several servers; tests stop theirs without signals

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
