//! Protocol header stage.
//!
//! Runs version negotiation and interaction id propagation together so that
//! every malformed header of a request is reported in one 400 response.
//! Requests that resolved to no endpoint carry no version range and pass
//! through untouched.

use axum::http::StatusCode;

use crate::errors::ErrorList;
use crate::http::request::RequestView;
use crate::http::response::Rejection;
use crate::validation::{interaction, version, Stage, StageContext, Verdict};

pub struct ProtocolHeaderStage;

impl Stage for ProtocolHeaderStage {
    fn name(&self) -> &'static str {
        "headers"
    }

    fn evaluate(&self, request: &RequestView, ctx: &mut StageContext<'_>) -> Verdict {
        let Some(endpoint) = ctx.route.as_ref().map(|route| route.endpoint) else {
            return Verdict::Continue;
        };

        let mut errors = ErrorList::default();
        let requested = version::read_version_headers(request, &mut errors);
        version::set_version_header(endpoint, &mut ctx.response_headers);
        interaction::propagate_interaction_id(request, &mut ctx.response_headers, &mut errors);

        if !errors.is_empty() {
            tracing::info!(errors = errors.len(), path = %endpoint.path, "Malformed protocol headers");
            return Verdict::Reject(Rejection::new(StatusCode::BAD_REQUEST, errors));
        }

        match requested {
            Some(requested) => version::check_supported(requested, endpoint).into(),
            None => Verdict::Continue,
        }
    }
}
