//! Endpoint lookup.
//!
//! # Responsibilities
//! - Store the endpoint table
//! - Normalise the request path (query, base path, standards prefix, trailing slash)
//! - Return the matched endpoint or an explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan over endpoints of the same method
//! - First match wins; config validation rejects shadowed templates

use crate::config::schema::EndpointDescriptor;
use crate::routing::matcher::{split_segments, PathParam};

/// Version prefix defined by the standard, stripped when present.
pub const STANDARDS_PREFIX: &str = "cds-au/v1";

/// A resolved endpoint together with the placeholder values of the request.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch<'a> {
    pub endpoint: &'a EndpointDescriptor,
    pub params: Vec<PathParam>,
}

impl RouteMatch<'_> {
    /// Value captured for placeholder `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }
}

/// Resolves method + path against an ordered endpoint table.
#[derive(Debug, Clone)]
pub struct EndpointResolver {
    endpoints: Vec<EndpointDescriptor>,
    base_path: Option<String>,
}

impl EndpointResolver {
    pub fn new(endpoints: Vec<EndpointDescriptor>, base_path: Option<String>) -> Self {
        let base_path = base_path
            .map(|p| p.trim_end_matches('/').to_string())
            .filter(|p| !p.is_empty());
        Self { endpoints, base_path }
    }

    pub fn endpoints(&self) -> &[EndpointDescriptor] {
        &self.endpoints
    }

    pub fn base_path(&self) -> Option<&str> {
        self.base_path.as_deref()
    }

    /// Find the endpoint for `method` and `raw_path` (which may carry a query string).
    pub fn resolve(&self, method: &str, raw_path: &str) -> Option<RouteMatch<'_>> {
        let segments = self.standard_segments(raw_path)?;

        self.endpoints
            .iter()
            .filter(|ep| ep.method.eq_ignore_ascii_case(method))
            .find_map(|ep| {
                ep.path.captures(&segments).map(|params| RouteMatch {
                    endpoint: ep,
                    params,
                })
            })
    }

    /// Segments of the path below the base path and standards prefix.
    fn standard_segments<'p>(&self, raw_path: &'p str) -> Option<Vec<&'p str>> {
        let path = raw_path.split_once('?').map_or(raw_path, |(p, _)| p);

        let path = match &self.base_path {
            Some(base) => {
                let rest = path.strip_prefix(base.as_str())?;
                if !rest.is_empty() && !rest.starts_with('/') {
                    return None;
                }
                rest
            }
            None => path,
        };

        let path = path.trim_start_matches('/');
        let path = match path.strip_prefix(STANDARDS_PREFIX) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
            _ => path,
        };

        Some(split_segments(path))
    }
}
