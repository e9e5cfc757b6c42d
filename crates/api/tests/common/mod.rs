use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use fundline_api::config::ServerConfig;
use fundline_api::engine::task_generator::TaskGenerator;
use fundline_api::router::build_app_router;
use fundline_api::state::AppState;
use fundline_core::checklist::ChecklistTable;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Uses the same [`build_app_router`] as `main.rs` so integration tests
/// exercise the production middleware stack. No assistant is configured,
/// so persona scoring always takes the rule-based path.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::new(fundline_events::EventBus::default()),
        task_generator: Arc::new(TaskGenerator::new(Arc::new(ChecklistTable::standard()))),
        assistant: None,
    };

    build_app_router(state, &config)
}

/// Send a GET request to the app.
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Send a DELETE request to the app.
pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

/// Send a PUT request with a JSON body.
pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
