//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (versions > 0, min <= max, timeouts > 0)
//! - Detect duplicate and shadowed endpoint templates
//! - Check caller tokens are usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ValidatorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::{EndpointDescriptor, ValidatorConfig};
use crate::routing::matcher::Segment;

const METHODS: [&str; 5] = ["GET", "POST", "PUT", "PATCH", "DELETE"];

/// A semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("endpoint {method} {path}: unsupported method")]
    Method { method: String, path: String },

    #[error("endpoint {method} {path}: template must start with '/' and have no empty segments or placeholders")]
    Template { method: String, path: String },

    #[error("endpoint {method} {path}: supported versions must be positive and min <= max (got {min}..{max})")]
    VersionRange {
        method: String,
        path: String,
        min: u32,
        max: u32,
    },

    #[error("endpoint {method} {path} is unreachable behind {shadowed_by}")]
    Shadowed {
        method: String,
        path: String,
        shadowed_by: String,
    },

    #[error("base_path must start with '/': {0}")]
    BasePath(String),

    #[error("caller #{0} has an empty token")]
    EmptyCallerToken(usize),

    #[error("caller token configured more than once (caller #{0})")]
    DuplicateCallerToken(usize),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,
}

/// Validate a whole configuration.
pub fn validate_config(config: &ValidatorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = validate_endpoints(&config.endpoints);

    if let Some(base) = &config.compliance.base_path {
        if !base.starts_with('/') {
            errors.push(ValidationError::BasePath(base.clone()));
        }
    }

    let mut tokens = HashSet::new();
    for (i, caller) in config.callers.iter().enumerate() {
        if caller.token.trim().is_empty() {
            errors.push(ValidationError::EmptyCallerToken(i));
        } else if !tokens.insert(caller.token.as_str()) {
            errors.push(ValidationError::DuplicateCallerToken(i));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate an endpoint table in resolution order.
pub fn validate_endpoints(endpoints: &[EndpointDescriptor]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (i, ep) in endpoints.iter().enumerate() {
        let method = ep.method.clone();
        let path = ep.path.as_str().to_string();

        if !METHODS.contains(&ep.method.to_ascii_uppercase().as_str()) {
            errors.push(ValidationError::Method {
                method: method.clone(),
                path: path.clone(),
            });
        }

        let malformed = !path.starts_with('/')
            || ep.path.segments().iter().any(|s| match s {
                Segment::Literal(l) => l.is_empty() || l.contains(['{', '}']),
                Segment::Param(p) => p.is_empty(),
            });
        if malformed {
            errors.push(ValidationError::Template {
                method: method.clone(),
                path: path.clone(),
            });
        }

        if ep.min_supported_version == 0 || ep.min_supported_version > ep.max_supported_version {
            errors.push(ValidationError::VersionRange {
                method: method.clone(),
                path: path.clone(),
                min: ep.min_supported_version,
                max: ep.max_supported_version,
            });
        }

        let shadowed_by = endpoints[..i].iter().find(|earlier| {
            earlier.method.eq_ignore_ascii_case(&ep.method) && earlier.path.shadows(&ep.path)
        });
        if let Some(earlier) = shadowed_by {
            errors.push(ValidationError::Shadowed {
                method,
                path,
                shadowed_by: earlier.path.as_str().to_string(),
            });
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::CallerConfig;
    use crate::identity::CallerIdentity;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ValidatorConfig::default()).is_ok());
    }

    #[test]
    fn test_duplicate_and_shadowed_templates() {
        let endpoints = vec![
            EndpointDescriptor::new("GET", "/banking/accounts/{accountId}", 1, 2),
            EndpointDescriptor::new("GET", "/banking/accounts/balances", 1, 1),
            EndpointDescriptor::new("POST", "/banking/accounts/balances", 1, 1),
            EndpointDescriptor::new("GET", "/banking/accounts/{id}", 1, 1),
        ];
        let errors = validate_endpoints(&endpoints);

        assert_eq!(errors.len(), 2);
        assert!(matches!(
            &errors[0],
            ValidationError::Shadowed { path, .. } if path == "/banking/accounts/balances"
        ));
        assert!(matches!(
            &errors[1],
            ValidationError::Shadowed { path, .. } if path == "/banking/accounts/{id}"
        ));
    }

    #[test]
    fn test_version_and_template_errors() {
        let endpoints = vec![
            EndpointDescriptor::new("GET", "/energy/plans", 3, 2),
            EndpointDescriptor::new("GET", "energy/accounts", 1, 1),
            EndpointDescriptor::new("FETCH", "/energy/accounts/{}", 0, 1),
        ];
        let errors = validate_endpoints(&endpoints);

        assert!(errors.contains(&ValidationError::VersionRange {
            method: "GET".into(),
            path: "/energy/plans".into(),
            min: 3,
            max: 2,
        }));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::Template { path, .. } if path == "energy/accounts")));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::Method { .. })));
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ValidatorConfig::default();
        config.compliance.base_path = Some("dh".into());
        config.timeouts.request_secs = 0;
        for token in ["a", "a", " "] {
            config.callers.push(CallerConfig {
                token: token.into(),
                identity: CallerIdentity::default(),
            });
        }

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::BasePath("dh".into()),
                ValidationError::DuplicateCallerToken(1),
                ValidationError::EmptyCallerToken(2),
                ValidationError::ZeroTimeout,
            ]
        );
    }
}
