//! Endpoint tables published by the standard.
//!
//! The tables ship as JSON under `data/` and are parsed once on first use.
//! They serve as the default endpoint table and as the reference for telling
//! "not a CDR endpoint" apart from "not implemented".

use std::sync::OnceLock;

use crate::config::schema::{EndpointDescriptor, ValidatorConfig};
use crate::routing::router::{EndpointResolver, RouteMatch};

const BANKING_ENDPOINTS: &str = include_str!("../../data/cdr-banking-endpoints.json");
const ENERGY_ENDPOINTS: &str = include_str!("../../data/cdr-energy-endpoints.json");
const COMMON_ENDPOINTS: &str = include_str!("../../data/cdr-common-endpoints.json");

fn parse(table: &'static str, name: &str) -> Vec<EndpointDescriptor> {
    serde_json::from_str(table)
        .unwrap_or_else(|e| panic!("embedded {name} endpoint table is malformed: {e}"))
}

fn tables() -> &'static [Vec<EndpointDescriptor>; 3] {
    static TABLES: OnceLock<[Vec<EndpointDescriptor>; 3]> = OnceLock::new();
    TABLES.get_or_init(|| {
        [
            parse(ENERGY_ENDPOINTS, "energy"),
            parse(BANKING_ENDPOINTS, "banking"),
            parse(COMMON_ENDPOINTS, "common"),
        ]
    })
}

pub fn energy_endpoints() -> Vec<EndpointDescriptor> {
    tables()[0].clone()
}

pub fn banking_endpoints() -> Vec<EndpointDescriptor> {
    tables()[1].clone()
}

pub fn common_endpoints() -> Vec<EndpointDescriptor> {
    tables()[2].clone()
}

/// Energy, banking and common endpoints in that order.
pub fn standard_endpoints() -> Vec<EndpointDescriptor> {
    tables().iter().flatten().cloned().collect()
}

/// Endpoints served under `config`: the configured table, or the whole catalog when none is given.
pub fn effective_endpoints(config: &ValidatorConfig) -> Vec<EndpointDescriptor> {
    if config.endpoints.is_empty() {
        standard_endpoints()
    } else {
        config.endpoints.clone()
    }
}

/// A resolver over the full standard catalog under `base_path`.
pub fn standard_resolver(base_path: Option<String>) -> EndpointResolver {
    EndpointResolver::new(standard_endpoints(), base_path)
}

/// Scope the standard requires for a request path, independent of what is implemented.
pub fn required_scope_for<'a>(
    standard: &'a EndpointResolver,
    method: &str,
    raw_path: &str,
) -> Option<&'a str> {
    standard
        .resolve(method, raw_path)
        .and_then(|RouteMatch { endpoint, .. }| endpoint.required_scope.as_deref())
}
