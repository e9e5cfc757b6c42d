mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use sqlx::PgPool;
use tower::ServiceExt;

use common::{body_json, build_test_app, get};

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_endpoint(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db_healthy"], true);
    assert!(body["version"].as_str().is_some_and(|v| !v.is_empty()));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_route_returns_404(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(&app, "/definitely-not-a-route").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_request_id_header_is_set(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(&app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id header missing")
        .to_str()
        .unwrap();
    // UUIDs are 36 characters in canonical form.
    assert_eq!(request_id.len(), 36);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cors_preflight(pool: PgPool) {
    let app = build_test_app(pool);

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/v1/funds")
                .header("Origin", "http://localhost:5173")
                .header("Access-Control-Request-Method", "GET")
                .header("Access-Control-Request-Headers", "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let allow_origin = response
        .headers()
        .get("access-control-allow-origin")
        .expect("allow-origin header missing")
        .to_str()
        .unwrap();
    assert_eq!(allow_origin, "http://localhost:5173");

    let allow_methods = response
        .headers()
        .get("access-control-allow-methods")
        .expect("allow-methods header missing")
        .to_str()
        .unwrap();
    assert!(allow_methods.contains("GET"));
}
