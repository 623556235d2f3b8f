//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tokio::net::TcpListener;

use cdr_validator::config::ValidatorConfig;
use cdr_validator::config::loader::parse_config;
use cdr_validator::identity::InMemoryCallerStore;
use cdr_validator::lifecycle::Shutdown;
use cdr_validator::HttpServer;

pub const TOKEN: &str = "token-abc";
pub const INTERACTION_ID: &str = "0f8a0ad1-3c4e-4e1f-8d4b-5b2f3f0e6a21";

/// Config with a handful of implemented endpoints and one caller.
pub const SAMPLE_CONFIG: &str = r#"
[compliance]
specified_endpoints_only = true

[[endpoints]]
requestType = "GET"
requestPath = "/banking/accounts"
minSupportedVersion = 1
maxSupportedVersion = 2
authScopesRequired = "bank:accounts.basic:read"

[[endpoints]]
requestType = "POST"
requestPath = "/banking/accounts/balances"
minSupportedVersion = 1
maxSupportedVersion = 1
authScopesRequired = "bank:accounts.basic:read"

[[endpoints]]
requestType = "GET"
requestPath = "/banking/accounts/{accountId}"
minSupportedVersion = 1
maxSupportedVersion = 3
authScopesRequired = "bank:accounts.detail:read"

[[endpoints]]
requestType = "GET"
requestPath = "/energy/accounts/{accountId}/balance"
minSupportedVersion = 1
maxSupportedVersion = 4
authScopesRequired = "energy:billing:read"

[[endpoints]]
requestType = "GET"
requestPath = "/energy/plans"
minSupportedVersion = 1
maxSupportedVersion = 1

[[callers]]
token = "token-abc"
accountsBanking = ["1234567", "786545"]
accountsEnergy = ["e-100"]
scopes = ["bank:accounts.basic:read", "bank:accounts.detail:read", "bank:payees:read", "energy:billing:read"]
"#;

pub fn sample_config() -> ValidatorConfig {
    parse_config(SAMPLE_CONFIG).expect("sample config is valid")
}

pub fn server(config: ValidatorConfig) -> HttpServer {
    let lookup = Arc::new(InMemoryCallerStore::from_config(&config.callers));
    HttpServer::new(config, lookup)
}

/// The sandbox router over `config`, for in-process requests.
pub fn app(config: ValidatorConfig) -> Router {
    server(config).router()
}

/// Request carrying the sample caller's bearer token.
pub fn authorized(method: Method, uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {TOKEN}"))
}

/// Authorized GET with `x-v: 1`.
pub fn get(uri: &str) -> Request<Body> {
    authorized(Method::GET, uri)
        .header("x-v", "1")
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

/// First error code of an error response body.
pub fn first_code(body: &Value) -> &str {
    body["errors"][0]["code"].as_str().unwrap()
}

/// Start the sandbox on an ephemeral port.
pub async fn start_server(config: ValidatorConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let stop = shutdown.wait();
    let server = server(config);

    tokio::spawn(async move {
        server.run(listener, stop).await.unwrap();
    });

    (addr, shutdown)
}
