//! Caller lookup capability and the in-memory store.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::config::schema::CallerConfig;
use crate::http::request::RequestView;
use crate::identity::CallerIdentity;

/// Resolves the caller behind a request.
///
/// Implementations may be backed by anything (memory, a remote service, a
/// database). The pipeline awaits the result once per request.
#[async_trait]
pub trait CallerLookup: Send + Sync {
    async fn lookup(&self, request: &RequestView) -> Option<CallerIdentity>;
}

/// Callers keyed by bearer token.
#[derive(Debug, Default)]
pub struct InMemoryCallerStore {
    callers: DashMap<String, CallerIdentity>,
}

impl InMemoryCallerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(callers: &[CallerConfig]) -> Self {
        let store = Self::new();
        for caller in callers {
            store.insert(caller.token.clone(), caller.identity.clone());
        }
        tracing::info!(callers = store.len(), "Caller store loaded");
        store
    }

    pub fn insert(&self, token: impl Into<String>, identity: CallerIdentity) {
        self.callers.insert(token.into(), identity);
    }

    pub fn len(&self) -> usize {
        self.callers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callers.is_empty()
    }
}

#[async_trait]
impl CallerLookup for InMemoryCallerStore {
    async fn lookup(&self, request: &RequestView) -> Option<CallerIdentity> {
        let token = request.bearer_token()?;
        let caller = self.callers.get(token).map(|r| r.value().clone());
        if caller.is_none() {
            tracing::debug!("No caller registered for bearer token");
        }
        caller
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::ResourceDomain;
    use axum::http::{Method, Uri};

    fn request(auth: Option<&str>) -> RequestView {
        let view = RequestView::new(Method::GET, Uri::from_static("/cds-au/v1/banking/accounts"));
        match auth {
            Some(value) => view.with_header("authorization", value),
            None => view,
        }
    }

    #[tokio::test]
    async fn test_lookup_by_bearer_token() {
        let store = InMemoryCallerStore::new();
        store.insert(
            "tok-1",
            CallerIdentity::default().with_owned(ResourceDomain::BankingAccount, ["1"]),
        );

        let found = store.lookup(&request(Some("Bearer tok-1"))).await.unwrap();
        assert!(found.owns(ResourceDomain::BankingAccount, "1"));

        assert!(store.lookup(&request(Some("Bearer other"))).await.is_none());
        assert!(store.lookup(&request(Some("Basic tok-1"))).await.is_none());
        assert!(store.lookup(&request(None)).await.is_none());
    }

    #[test]
    fn test_from_config() {
        let store = InMemoryCallerStore::from_config(&[CallerConfig {
            token: "t".into(),
            identity: CallerIdentity::default(),
        }]);
        assert_eq!(store.len(), 1);
    }
}
