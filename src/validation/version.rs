//! API version negotiation.
//!
//! # Responsibilities
//! - Read `x-v` (required) and `x-min-v` (optional) request headers
//! - Report missing or malformed version headers
//! - Check the requested range against the endpoint's supported range
//! - Advertise the endpoint's maximum version in the `x-v` response header
//!
//! # Design Decisions
//! - Versions are positive integers without leading zeros
//! - `x-min-v` defaults to `x-v` and is clamped down to it
//! - Format errors (400) are reported before range errors (406)

use axum::http::{HeaderMap, HeaderValue, StatusCode};

use crate::config::schema::EndpointDescriptor;
use crate::errors::{ErrorKind, ErrorList};
use crate::http::request::RequestView;
use crate::http::response::Rejection;

pub const X_V: &str = "x-v";
pub const X_MIN_V: &str = "x-min-v";

/// The version range a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestedVersion {
    pub version: u32,
    pub min_version: u32,
}

/// Parse a version header value: one or more digits, no leading zero.
///
/// Well-formed values too large for `u32` saturate, so they fail the range
/// check rather than the format check.
pub fn parse_version(value: &str) -> Option<u32> {
    let mut chars = value.chars();
    match chars.next() {
        Some('1'..='9') if chars.all(|c| c.is_ascii_digit()) => Some(value.parse().unwrap_or(u32::MAX)),
        _ => None,
    }
}

fn read_header(
    request: &RequestView,
    name: &'static str,
    errors: &mut ErrorList,
) -> Option<Option<u32>> {
    if !request.has_header(name) {
        return None;
    }
    let parsed = request.header(name).and_then(parse_version);
    if parsed.is_none() {
        errors.push(ErrorKind::InvalidVersion, name);
    }
    Some(parsed)
}

/// Read the version headers, appending any format errors to `errors`.
///
/// Returns the requested range only if both headers are well formed.
pub fn read_version_headers(
    request: &RequestView,
    errors: &mut ErrorList,
) -> Option<RequestedVersion> {
    let version = match read_header(request, X_V, errors) {
        Some(parsed) => parsed,
        None => {
            errors.push(ErrorKind::MissingRequiredHeader, X_V);
            None
        }
    };

    let min_version = match read_header(request, X_MIN_V, errors) {
        Some(parsed) => parsed,
        None => version,
    };

    let (version, min_version) = (version?, min_version?);
    Some(RequestedVersion {
        version,
        // A minimum above the requested version is ignored.
        min_version: min_version.min(version),
    })
}

/// Reject a range that does not overlap the endpoint's supported versions.
pub fn check_supported(
    requested: RequestedVersion,
    endpoint: &EndpointDescriptor,
) -> Result<(), Rejection> {
    let (min, max) = (endpoint.min_supported_version, endpoint.max_supported_version);
    if requested.version < min || requested.min_version > max {
        tracing::info!(
            requested = requested.version,
            min_requested = requested.min_version,
            min_supported = min,
            max_supported = max,
            path = %endpoint.path,
            "Unsupported version requested"
        );
        return Err(Rejection::single(
            StatusCode::NOT_ACCEPTABLE,
            ErrorKind::UnsupportedVersion,
            format!("minimum version: {min}, maximum version: {max}"),
        ));
    }
    Ok(())
}

/// Advertise the endpoint's highest supported version.
pub fn set_version_header(endpoint: &EndpointDescriptor, headers: &mut HeaderMap) {
    headers.insert(X_V, HeaderValue::from(endpoint.max_supported_version));
}
