//! Rejection responses.
//!
//! # Responsibilities
//! - Carry the status and error list of a failed validation stage
//! - Render `{ "errors": [...] }` bodies (or no body for 401)
//! - Log rejections for operator visibility
//!
//! # Design Decisions
//! - Status and body are decided by the stage, never rewritten here
//! - Response headers written before the rejection are merged by the middleware

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::errors::{ErrorKind, ErrorList};

/// A request that must not reach the handler.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("request rejected with status {status}")]
pub struct Rejection {
    pub status: StatusCode,
    /// `None` renders an empty body.
    pub errors: Option<ErrorList>,
}

impl Rejection {
    pub fn new(status: StatusCode, errors: ErrorList) -> Self {
        Self {
            status,
            errors: Some(errors),
        }
    }

    /// One-entry rejection.
    pub fn single(status: StatusCode, kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self::new(status, ErrorList::single(kind, detail))
    }

    /// Missing access token: 401 with no body.
    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            errors: None,
        }
    }

    /// Codes carried by this rejection, in order.
    pub fn codes(&self) -> Vec<&str> {
        self.errors.as_ref().map(ErrorList::codes).unwrap_or_default()
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        match self.errors {
            Some(errors) => (self.status, Json(errors)).into_response(),
            None => self.status.into_response(),
        }
    }
}
