//! Scope authorization.
//!
//! # Responsibilities
//! - Determine the scope the endpoint requires
//! - Answer 401 when no access token is presented
//! - Answer 403 when the required scope is not granted
//!
//! # Design Decisions
//! - The required scope comes from the resolved endpoint, falling back to
//!   the standard catalog for unresolved requests
//! - Scopes attached by the token component take precedence over the
//!   caller record's scopes

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;

use crate::errors::ErrorKind;
use crate::http::request::RequestView;
use crate::http::response::Rejection;
use crate::routing::{catalog, EndpointResolver};
use crate::validation::{Stage, StageContext, Verdict};

pub struct ScopeStage {
    standard: Arc<EndpointResolver>,
}

impl ScopeStage {
    pub fn new(standard: Arc<EndpointResolver>) -> Self {
        Self { standard }
    }

    fn required_scope<'a>(&'a self, request: &RequestView, ctx: &'a StageContext<'_>) -> Option<&'a str> {
        match &ctx.route {
            Some(route) => route.endpoint.required_scope.as_deref(),
            None => catalog::required_scope_for(
                &self.standard,
                request.method().as_str(),
                request.path_and_query(),
            ),
        }
    }
}

fn forbidden(detail: &str) -> Verdict {
    Verdict::Reject(Rejection::single(StatusCode::FORBIDDEN, ErrorKind::ConsentInvalid, detail))
}

impl Stage for ScopeStage {
    fn name(&self) -> &'static str {
        "scope"
    }

    fn evaluate(&self, request: &RequestView, ctx: &mut StageContext<'_>) -> Verdict {
        let Some(required) = self.required_scope(request, ctx) else {
            return Verdict::Continue;
        };

        if !request.has_header(AUTHORIZATION.as_str()) {
            tracing::info!(required, "No access token presented");
            return Verdict::Reject(Rejection::unauthorized());
        }

        let granted = request
            .granted_scopes()
            .map(|g| g.0.as_slice())
            .or_else(|| ctx.caller.as_ref().map(|c| c.scopes.as_slice()));

        match granted {
            Some(scopes) if scopes.iter().any(|s| s == required) => Verdict::Continue,
            Some(_) => {
                tracing::info!(required, "Required scope not granted");
                forbidden("Invalid scope")
            }
            None => {
                tracing::info!(required, "No scopes available for caller");
                forbidden("No scopes found")
            }
        }
    }
}
