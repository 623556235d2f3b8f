//! Endpoint existence guard.
//!
//! With `specified_endpoints_only` in force, a request that resolved to no
//! configured endpoint is answered with 404. The standard catalog tells the
//! two cases apart: a path the standard does not define at all, and one it
//! defines that this holder has not implemented.

use std::sync::Arc;

use axum::http::StatusCode;

use crate::errors::ErrorKind;
use crate::http::request::RequestView;
use crate::http::response::Rejection;
use crate::routing::{EndpointResolver, RouteMatch};
use crate::validation::{Stage, StageContext, Verdict};

pub const NOT_A_CDR_ENDPOINT: &str = "This endpoint is not a CDR endpoint";
pub const NOT_IMPLEMENTED: &str = "This endpoint has not been implemented";

pub struct EndpointGuard {
    strict: bool,
    standard: Arc<EndpointResolver>,
}

impl EndpointGuard {
    pub fn new(strict: bool, standard: Arc<EndpointResolver>) -> Self {
        Self { strict, standard }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn check(&self, request: &RequestView, route: Option<&RouteMatch<'_>>) -> Verdict {
        if route.is_some() || !self.strict {
            return Verdict::Continue;
        }

        let method = request.method().as_str();
        let path = request.path_and_query();
        let rejection = match self.standard.resolve(method, path) {
            Some(_) => {
                tracing::info!(method, path, "Endpoint not implemented");
                Rejection::single(
                    StatusCode::NOT_FOUND,
                    ErrorKind::ResourceNotImplemented,
                    NOT_IMPLEMENTED,
                )
            }
            None => {
                tracing::info!(method, path, "Not a CDR endpoint");
                Rejection::single(StatusCode::NOT_FOUND, ErrorKind::ResourceNotFound, NOT_A_CDR_ENDPOINT)
            }
        };
        Verdict::Reject(rejection)
    }
}

impl Stage for EndpointGuard {
    fn name(&self) -> &'static str {
        "endpoint"
    }

    fn evaluate(&self, request: &RequestView, ctx: &mut StageContext<'_>) -> Verdict {
        self.check(request, ctx.route.as_ref())
    }
}
