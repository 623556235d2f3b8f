//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router for the sandbox echo handler
//! - Wire up middleware (tracing, timeout, compliance)
//! - Bind server to listener and shut down gracefully

use axum::{
    extract::Request,
    middleware,
    response::Json,
    routing::any,
    Extension, Router,
};
use serde_json::{json, Value};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ValidatorConfig;
use crate::http::middleware::{compliance_middleware, MatchedEndpoint};
use crate::identity::CallerLookup;
use crate::validation::Pipeline;

/// State shared by the compliance middleware.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub max_body_size: usize,
}

impl AppState {
    pub fn new(config: &ValidatorConfig, lookup: Arc<dyn CallerLookup>) -> Self {
        Self {
            pipeline: Arc::new(Pipeline::new(config, lookup)),
            max_body_size: config.security.max_body_size,
        }
    }
}

/// Sandbox server: every route is protected by the compliance middleware.
pub struct HttpServer {
    router: Router,
    config: ValidatorConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ValidatorConfig, lookup: Arc<dyn CallerLookup>) -> Self {
        let state = AppState::new(&config, lookup);
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Put the compliance middleware in front of every route of `router`.
    pub fn protect(router: Router, state: AppState) -> Router {
        router.layer(middleware::from_fn_with_state(state, compliance_middleware))
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ValidatorConfig, state: AppState) -> Router {
        let routes = Router::new()
            .route("/{*path}", any(echo_handler))
            .route("/", any(echo_handler));

        Self::protect(routes, state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` completes, usually
    /// [`Shutdown::wait`](crate::lifecycle::Shutdown::wait).
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            base_path = ?self.config.compliance.base_path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }
}

/// Echo the endpoint a validated request resolved to.
async fn echo_handler(
    matched: Option<Extension<MatchedEndpoint>>,
    request: Request,
) -> Json<Value> {
    let endpoint = matched.map(|Extension(MatchedEndpoint(endpoint))| endpoint);
    tracing::debug!(path = %request.uri().path(), matched = endpoint.is_some(), "Echo request");
    Json(json!({
        "method": request.method().as_str(),
        "path": request.uri().path(),
        "endpoint": endpoint,
    }))
}
