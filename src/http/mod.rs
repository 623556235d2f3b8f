//! HTTP surface subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, trace and timeout layers)
//!     → middleware/compliance.rs (buffer body, build RequestView)
//!     → request.rs (method, path, headers, body, granted scopes)
//!     → [validation pipeline]
//!     → response.rs (Rejection → { "errors": [...] }) or the handler
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use middleware::{compliance_middleware, MatchedEndpoint};
pub use request::{GrantedScopes, RequestView};
pub use response::Rejection;
pub use server::{AppState, HttpServer};
