//! Request view handed to validation stages.
//!
//! # Responsibilities
//! - Capture method, path + query, headers and parsed JSON body
//! - Carry scopes attached by the upstream token component
//! - Offer the header lookups the stages need
//!
//! # Design Decisions
//! - Read-only once built; stages never mutate the request
//! - Body parsed once; an empty or non-JSON body is treated as absent

use axum::http::header::{HeaderName, HeaderValue, AUTHORIZATION, HOST};
use axum::http::request::Parts;
use axum::http::{HeaderMap, Method, Uri};
use serde_json::Value;

/// Scopes extracted from the access token by an upstream component and
/// attached to the request as an extension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrantedScopes(pub Vec<String>);

impl GrantedScopes {
    pub fn contains(&self, scope: &str) -> bool {
        self.0.iter().any(|s| s == scope)
    }
}

/// What the validation stages see of a request.
#[derive(Debug, Clone)]
pub struct RequestView {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Option<Value>,
    granted_scopes: Option<GrantedScopes>,
}

impl RequestView {
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            headers: HeaderMap::new(),
            body: None,
            granted_scopes: None,
        }
    }

    /// Build from request parts and the buffered body.
    pub fn from_parts(parts: &Parts, body: &[u8]) -> Self {
        let body = if body.is_empty() {
            None
        } else {
            serde_json::from_slice(body).ok()
        };
        Self {
            method: parts.method.clone(),
            uri: parts.uri.clone(),
            headers: parts.headers.clone(),
            body,
            granted_scopes: parts.extensions.get::<GrantedScopes>().cloned(),
        }
    }

    /// Add a header. `name` must be lowercase; invalid values are ignored.
    pub fn with_header(mut self, name: &'static str, value: &str) -> Self {
        if let Ok(value) = HeaderValue::from_str(value) {
            self.headers.insert(HeaderName::from_static(name), value);
        }
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.granted_scopes = Some(GrantedScopes(scopes.into_iter().map(Into::into).collect()));
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Path including the query string, as received.
    pub fn path_and_query(&self) -> &str {
        self.uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| self.uri.path())
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Header value as text. Non-UTF-8 values read as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn granted_scopes(&self) -> Option<&GrantedScopes> {
        self.granted_scopes.as_ref()
    }

    /// Token of a `Bearer` authorization header.
    pub fn bearer_token(&self) -> Option<&str> {
        let value = self.header(AUTHORIZATION.as_str())?;
        let (scheme, token) = value.split_once(' ')?;
        scheme
            .eq_ignore_ascii_case("bearer")
            .then(|| token.trim())
            .filter(|t| !t.is_empty())
    }

    /// Host the request was addressed to.
    pub fn host(&self) -> Option<&str> {
        self.header(HOST.as_str())
            .or_else(|| self.uri.authority().map(|a| a.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::json;

    #[test]
    fn test_from_parts() {
        let mut request = Request::builder()
            .method(Method::POST)
            .uri("/cds-au/v1/banking/payments/scheduled?page=2")
            .header("x-v", "1")
            .header("host", "holder.example")
            .body(Body::empty())
            .unwrap();
        request
            .extensions_mut()
            .insert(GrantedScopes(vec!["bank:regular_payments:read".into()]));
        let (parts, _) = request.into_parts();

        let view = RequestView::from_parts(&parts, br#"{"data":{"accountIds":["1"]}}"#);

        assert_eq!(view.method(), Method::POST);
        assert_eq!(view.path_and_query(), "/cds-au/v1/banking/payments/scheduled?page=2");
        assert_eq!(view.header("x-v"), Some("1"));
        assert_eq!(view.host(), Some("holder.example"));
        assert_eq!(view.body(), Some(&json!({ "data": { "accountIds": ["1"] } })));
        assert!(view.granted_scopes().unwrap().contains("bank:regular_payments:read"));
    }

    #[test]
    fn test_unparseable_body_is_absent() {
        let (parts, _) = Request::builder()
            .uri("/x")
            .body(Body::empty())
            .unwrap()
            .into_parts();
        assert!(RequestView::from_parts(&parts, b"not json").body().is_none());
        assert!(RequestView::from_parts(&parts, b"").body().is_none());
    }

    #[test]
    fn test_bearer_token() {
        let view = RequestView::new(Method::GET, Uri::from_static("/"));
        assert_eq!(view.clone().with_header("authorization", "Bearer abc").bearer_token(), Some("abc"));
        assert_eq!(view.clone().with_header("authorization", "bearer  abc ").bearer_token(), Some("abc"));
        assert_eq!(view.clone().with_header("authorization", "Basic abc").bearer_token(), None);
        assert_eq!(view.with_header("authorization", "Bearer ").bearer_token(), None);
    }
}
