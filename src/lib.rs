//! CDR compliance validation library.
//!
//! Validates incoming Consumer Data Right requests (endpoint, version
//! headers, interaction id, scopes, resource ownership) before they reach
//! the data holder's handlers, and provides pagination helpers for the
//! responses.

pub mod config;
pub mod errors;
pub mod http;
pub mod identity;
pub mod lifecycle;
pub mod observability;
pub mod pagination;
pub mod routing;
pub mod validation;

pub use config::schema::ValidatorConfig;
pub use errors::{build_error, ErrorKind, ErrorList};
pub use http::{compliance_middleware, HttpServer, Rejection, RequestView};
pub use identity::{CallerIdentity, CallerLookup, InMemoryCallerStore};
pub use lifecycle::Shutdown;
pub use pagination::{build_links, paginate, Page, PageRequest};
pub use routing::EndpointResolver;
pub use validation::{Evaluation, Pipeline, Verdict};
