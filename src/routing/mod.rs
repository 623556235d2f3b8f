//! Endpoint resolution subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path + query)
//!     → router.rs (strip query, base path, standards prefix, trailing slash)
//!     → matcher.rs (segment-wise template comparison)
//!     → Return: RouteMatch (endpoint + path params) or None
//!
//! Table Compilation (at startup):
//!     EndpointDescriptor[] (config, or catalog.rs defaults)
//!     → Validate (no shadowed templates)
//!     → Freeze as immutable EndpointResolver
//! ```
//!
//! # Design Decisions
//! - Tables loaded at startup, immutable at runtime
//! - No regex in hot path
//! - Deterministic: same input always matches same endpoint
//! - First match wins (table order)

pub mod catalog;
pub mod matcher;
pub mod router;

pub use matcher::{PathParam, PathTemplate};
pub use router::{EndpointResolver, RouteMatch};
