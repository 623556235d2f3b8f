//! Validation pipeline.
//!
//! # Responsibilities
//! - Resolve the endpoint once per request
//! - Run the stages in order, stopping at the first rejection
//! - Await the caller lookup once, between header and authorization stages
//! - Hand back the response headers collected along the way
//!
//! # Design Decisions
//! - Stage order is fixed: headers, scope, resource, endpoint existence
//! - Response headers survive a rejection
//! - Every evaluation is logged and counted

use std::sync::Arc;
use std::time::Instant;

use axum::http::HeaderMap;

use crate::config::schema::{EndpointDescriptor, ValidatorConfig};
use crate::http::request::RequestView;
use crate::http::response::Rejection;
use crate::identity::CallerLookup;
use crate::observability::metrics;
use crate::routing::{catalog, EndpointResolver};
use crate::validation::endpoint::EndpointGuard;
use crate::validation::headers::ProtocolHeaderStage;
use crate::validation::resource::ResourceStage;
use crate::validation::scope::ScopeStage;
use crate::validation::{Stage, StageContext, Verdict};

/// Outcome of running the pipeline on one request.
#[derive(Debug)]
pub struct Evaluation {
    pub verdict: Verdict,
    /// Endpoint the request resolved to, if any.
    pub endpoint: Option<EndpointDescriptor>,
    /// Headers to set on the response, pass or fail.
    pub response_headers: HeaderMap,
    /// Stage that rejected the request, if any.
    pub rejected_by: Option<&'static str>,
}

impl Evaluation {
    pub fn is_pass(&self) -> bool {
        self.verdict.is_continue()
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match &self.verdict {
            Verdict::Reject(rejection) => Some(rejection),
            Verdict::Continue => None,
        }
    }
}

type Stages = Vec<Arc<dyn Stage>>;

pub struct Pipeline {
    resolver: EndpointResolver,
    lookup: Arc<dyn CallerLookup>,
    header_stages: Stages,
    authorization_stages: Stages,
}

impl Pipeline {
    /// Build the pipeline for `config`.
    pub fn new(config: &ValidatorConfig, lookup: Arc<dyn CallerLookup>) -> Self {
        let base_path = config.compliance.base_path.clone();
        let endpoints = catalog::effective_endpoints(config);

        let standard = Arc::new(catalog::standard_resolver(base_path.clone()));
        let guard = Arc::new(EndpointGuard::new(config.compliance.is_strict(), standard.clone()));

        tracing::info!(
            endpoints = endpoints.len(),
            base_path = ?base_path,
            strict = guard.is_strict(),
            "Validation pipeline built"
        );

        Self {
            resolver: EndpointResolver::new(endpoints, base_path),
            lookup,
            header_stages: vec![Arc::new(ProtocolHeaderStage) as Arc<dyn Stage>],
            authorization_stages: vec![
                Arc::new(ScopeStage::new(standard)) as Arc<dyn Stage>,
                Arc::new(ResourceStage),
                guard,
            ],
        }
    }

    pub fn resolver(&self) -> &EndpointResolver {
        &self.resolver
    }

    /// Run every stage against `request`.
    pub async fn evaluate(&self, request: &RequestView) -> Evaluation {
        let start = Instant::now();
        let method = request.method().as_str();
        let path = request.path_and_query();

        let route = self.resolver.resolve(method, path);
        let endpoint = route.as_ref().map(|r| r.endpoint.clone());
        tracing::debug!(
            method,
            path,
            endpoint = ?endpoint.as_ref().map(|e| e.path.as_str()),
            "Evaluating request"
        );

        let mut ctx = StageContext::new(route);

        let mut rejected = run_stages(&self.header_stages, request, &mut ctx);
        if rejected.is_none() {
            ctx.caller = self.lookup.lookup(request).await;
            rejected = run_stages(&self.authorization_stages, request, &mut ctx);
        }

        let (verdict, rejected_by) = match rejected {
            Some((stage, rejection)) => {
                tracing::info!(
                    stage,
                    status = %rejection.status,
                    codes = ?rejection.codes(),
                    method,
                    path,
                    "Request rejected"
                );
                metrics::record_evaluation(stage, rejection.status.as_u16().to_string(), start);
                (Verdict::Reject(rejection), Some(stage))
            }
            None => {
                tracing::debug!(method, path, "Request passed validation");
                metrics::record_evaluation("pipeline", metrics::PASS.to_string(), start);
                (Verdict::Continue, None)
            }
        };

        Evaluation {
            verdict,
            endpoint,
            response_headers: ctx.response_headers,
            rejected_by,
        }
    }
}

fn run_stages(
    stages: &[Arc<dyn Stage>],
    request: &RequestView,
    ctx: &mut StageContext<'_>,
) -> Option<(&'static str, Rejection)> {
    stages.iter().find_map(|stage| match stage.evaluate(request, ctx) {
        Verdict::Continue => None,
        Verdict::Reject(rejection) => Some((stage.name(), rejection)),
    })
}
