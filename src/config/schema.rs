//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the validator.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::identity::CallerIdentity;
use crate::routing::matcher::PathTemplate;

/// Root configuration for the validator.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Base path and strict-endpoint settings.
    pub compliance: ComplianceConfig,

    /// Implemented endpoints. Empty means the full standard catalog.
    pub endpoints: Vec<EndpointDescriptor>,

    /// Callers served by the in-memory identity store.
    pub callers: Vec<CallerConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Request body limits.
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// How requests are matched against the endpoint table.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ComplianceConfig {
    /// Prefix every request must carry before the standard path (e.g. "/dh").
    pub base_path: Option<String>,

    /// Reject requests that do not resolve to an implemented endpoint.
    /// Unset behaves as `true`.
    pub specified_endpoints_only: Option<bool>,
}

impl ComplianceConfig {
    /// Whether unresolved requests are answered with 404.
    pub fn is_strict(&self) -> bool {
        self.specified_endpoints_only.unwrap_or(true)
    }
}

/// An endpoint defined by the standard and the versions this holder serves.
///
/// Field aliases accept the camelCase layout of the published endpoint tables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EndpointDescriptor {
    /// HTTP method (e.g. "GET").
    #[serde(alias = "requestType")]
    pub method: String,

    /// Path template relative to the standards prefix, e.g. `/banking/accounts/{accountId}`.
    #[serde(alias = "requestPath")]
    pub path: PathTemplate,

    #[serde(alias = "minSupportedVersion")]
    pub min_supported_version: u32,

    #[serde(alias = "maxSupportedVersion")]
    pub max_supported_version: u32,

    /// Scope a caller must hold, if any.
    #[serde(default, alias = "authScopesRequired", skip_serializing_if = "Option::is_none")]
    pub required_scope: Option<String>,
}

impl EndpointDescriptor {
    pub fn new(method: &str, path: &str, min: u32, max: u32) -> Self {
        Self {
            method: method.to_string(),
            path: PathTemplate::parse(path),
            min_supported_version: min,
            max_supported_version: max,
            required_scope: None,
        }
    }

    pub fn with_scope(mut self, scope: &str) -> Self {
        self.required_scope = Some(scope.to_string());
        self
    }
}

/// A caller known to the in-memory identity store.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CallerConfig {
    /// Bearer token presented in the `Authorization` header.
    pub token: String,

    #[serde(flatten)]
    pub identity: CallerIdentity,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default filter directives when `RUST_LOG` is unset.
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "cdr_validator=debug,tower_http=info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Request hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes buffered for body validation.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}
