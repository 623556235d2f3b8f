//! `x-fapi-interaction-id` propagation.
//!
//! A valid id supplied by the client is echoed back. A missing id is
//! replaced by a freshly generated one. A malformed id is reported and not
//! echoed.

use axum::http::{HeaderMap, HeaderValue};
use uuid::{Uuid, Version};

use crate::errors::{ErrorKind, ErrorList};
use crate::http::request::RequestView;

pub const X_FAPI_INTERACTION_ID: &str = "x-fapi-interaction-id";

/// Hyphenated, 36-character, version 4 UUID.
pub fn is_valid_interaction_id(value: &str) -> bool {
    value.len() == 36
        && Uuid::try_parse(value).is_ok_and(|id| id.get_version() == Some(Version::Random))
}

/// Set the response interaction id, appending an error if the request's is malformed.
pub fn propagate_interaction_id(
    request: &RequestView,
    response_headers: &mut HeaderMap,
    errors: &mut ErrorList,
) {
    if !request.has_header(X_FAPI_INTERACTION_ID) {
        let generated = Uuid::new_v4().hyphenated().to_string();
        tracing::debug!(interaction_id = %generated, "Generated interaction id");
        if let Ok(value) = HeaderValue::from_str(&generated) {
            response_headers.insert(X_FAPI_INTERACTION_ID, value);
        }
        return;
    }

    match request.headers().get(X_FAPI_INTERACTION_ID) {
        Some(value) if value.to_str().is_ok_and(is_valid_interaction_id) => {
            response_headers.insert(X_FAPI_INTERACTION_ID, value.clone());
        }
        _ => {
            tracing::info!("Malformed x-fapi-interaction-id");
            errors.push(ErrorKind::InvalidHeader, X_FAPI_INTERACTION_ID);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Method, Uri};

    const VALID: &str = "7b4bd06a-2a8b-4b15-9b42-2c7c0c0f3a4e";

    fn propagate(id: Option<&str>) -> (HeaderMap, ErrorList) {
        let view = RequestView::new(Method::GET, Uri::from_static("/cds-au/v1/energy/plans"));
        let view = match id {
            Some(id) => view.with_header(X_FAPI_INTERACTION_ID, id),
            None => view,
        };
        let mut headers = HeaderMap::new();
        let mut errors = ErrorList::default();
        propagate_interaction_id(&view, &mut headers, &mut errors);
        (headers, errors)
    }

    #[test]
    fn test_valid_id_echoed() {
        let (headers, errors) = propagate(Some(VALID));
        assert!(errors.is_empty());
        assert_eq!(headers.get(X_FAPI_INTERACTION_ID).unwrap(), VALID);
    }

    #[test]
    fn test_missing_id_generated() {
        let (headers, errors) = propagate(None);
        assert!(errors.is_empty());
        let generated = headers.get(X_FAPI_INTERACTION_ID).unwrap().to_str().unwrap();
        assert!(is_valid_interaction_id(generated));
    }

    #[test]
    fn test_invalid_id_rejected_and_not_echoed() {
        let (headers, errors) = propagate(Some("not-a-uuid"));
        assert!(headers.get(X_FAPI_INTERACTION_ID).is_none());
        assert_eq!(errors.codes(), vec![ErrorKind::InvalidHeader.code()]);
        assert_eq!(errors.errors[0].detail, X_FAPI_INTERACTION_ID);
    }

    #[test]
    fn test_id_format() {
        assert!(is_valid_interaction_id(VALID));
        assert!(is_valid_interaction_id(&VALID.to_uppercase()));
        // Simple form and version 1 ids are refused.
        assert!(!is_valid_interaction_id("7b4bd06a2a8b4b159b422c7c0c0f3a4e"));
        assert!(!is_valid_interaction_id("7b4bd06a-2a8b-1b15-9b42-2c7c0c0f3a4e"));
        assert!(!is_valid_interaction_id(""));
    }
}
