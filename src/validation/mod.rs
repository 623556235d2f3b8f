//! Request validation subsystem.
//!
//! # Data Flow
//! ```text
//! RequestView
//!     → pipeline.rs (resolve endpoint once)
//!     → headers.rs (x-v / x-min-v via version.rs, x-fapi-interaction-id via interaction.rs)
//!     → [await CallerLookup]
//!     → scope.rs (required scope vs granted scopes)
//!     → resource.rs (POST body shape, identifier ownership)
//!     → endpoint.rs (not a CDR endpoint / not implemented)
//!     → Verdict::Continue or the first Verdict::Reject
//! ```
//!
//! # Design Decisions
//! - Stages are pure apart from response header writes
//! - The first rejecting stage ends the request; later stages never run
//! - No stage suspends; only the caller lookup is awaited

pub mod endpoint;
pub mod headers;
pub mod interaction;
pub mod pipeline;
pub mod resource;
pub mod scope;
pub mod version;

use axum::http::HeaderMap;

use crate::http::request::RequestView;
use crate::http::response::Rejection;
use crate::identity::CallerIdentity;
use crate::routing::RouteMatch;

pub use pipeline::{Evaluation, Pipeline};

/// Result of one stage.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Continue,
    Reject(Rejection),
}

impl Verdict {
    pub fn is_continue(&self) -> bool {
        matches!(self, Verdict::Continue)
    }
}

impl From<Result<(), Rejection>> for Verdict {
    fn from(result: Result<(), Rejection>) -> Self {
        match result {
            Ok(()) => Verdict::Continue,
            Err(rejection) => Verdict::Reject(rejection),
        }
    }
}

/// Per-request state shared by the stages.
#[derive(Debug)]
pub struct StageContext<'a> {
    /// Endpoint the request resolved to, if any.
    pub route: Option<RouteMatch<'a>>,
    /// Caller record, available to stages after the lookup.
    pub caller: Option<CallerIdentity>,
    /// Headers to set on the response, whatever the outcome.
    pub response_headers: HeaderMap,
}

impl<'a> StageContext<'a> {
    pub fn new(route: Option<RouteMatch<'a>>) -> Self {
        Self {
            route,
            caller: None,
            response_headers: HeaderMap::new(),
        }
    }

    pub fn with_caller(mut self, caller: CallerIdentity) -> Self {
        self.caller = Some(caller);
        self
    }
}

/// A validation step in front of the handler.
pub trait Stage: Send + Sync {
    /// Label used in logs and metrics.
    fn name(&self) -> &'static str;

    fn evaluate(&self, request: &RequestView, ctx: &mut StageContext<'_>) -> Verdict;
}
