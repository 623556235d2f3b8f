//! Axum middleware.

pub mod compliance;

pub use compliance::{compliance_middleware, MatchedEndpoint};
