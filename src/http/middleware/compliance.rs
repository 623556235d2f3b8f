//! Compliance middleware.
//! Runs the validation pipeline in front of the wrapped handlers.

use axum::{
    body::Body,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::schema::EndpointDescriptor;
use crate::errors::ErrorKind;
use crate::http::request::RequestView;
use crate::http::response::Rejection;
use crate::http::server::AppState;
use crate::validation::Verdict;

/// Endpoint a passing request resolved to, attached for the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedEndpoint(pub EndpointDescriptor);

pub async fn compliance_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    // 1. Buffer the body so stages can read it and the handler still gets it
    let (parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, state.max_body_size).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, limit = state.max_body_size, "Request body rejected");
            return Rejection::single(StatusCode::BAD_REQUEST, ErrorKind::InvalidField, "body")
                .into_response();
        }
    };

    // 2. Evaluate
    let view = RequestView::from_parts(&parts, &bytes);
    let evaluation = state.pipeline.evaluate(&view).await;

    // 3. Forward or reject, keeping the protocol headers either way
    let mut response = match evaluation.verdict {
        Verdict::Continue => {
            let mut request = Request::from_parts(parts, Body::from(bytes));
            if let Some(endpoint) = evaluation.endpoint {
                request.extensions_mut().insert(MatchedEndpoint(endpoint));
            }
            next.run(request).await
        }
        Verdict::Reject(rejection) => rejection.into_response(),
    };
    response.headers_mut().extend(evaluation.response_headers);
    response
}
