mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{body_json, build_test_app, delete, get, post_json, put_json};

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_not_found_envelope(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(&app, "/api/v1/funds/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Fund with id 999999 not found");
    assert_eq!(body["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_fund_name_conflicts(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(&app, "/api/v1/funds", json!({ "name": "Growth Fund II" })).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(&app, "/api/v1/funds", json!({ "name": "Growth Fund II" })).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(response).await;
    assert_eq!(body["code"], "CONFLICT");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("unique constraint"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_validation_failure_is_400(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(&app, "/api/v1/funds", json!({ "name": "" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_email_rejected(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        &app,
        "/api/v1/investors",
        json!({ "name": "Al Noor Capital", "contact_email": "not-an-email" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_missing_resources_404(pool: PgPool) {
    let app = build_test_app(pool);

    for uri in [
        "/api/v1/funds/999999",
        "/api/v1/investors/999999",
        "/api/v1/tasks/999999",
        "/api/v1/pipeline/999999",
    ] {
        let response = delete(&app, uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body_json(response).await["code"], "NOT_FOUND", "{uri}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_task_404(pool: PgPool) {
    let app = build_test_app(pool);

    let response = put_json(
        &app,
        "/api/v1/tasks/999999",
        json!({ "title": "Follow up" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Task with id 999999 not found");
}
