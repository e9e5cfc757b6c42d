mod common;

use axum::http::StatusCode;
use axum::Router;
use serde_json::{json, Value};
use sqlx::PgPool;

use common::{body_json, build_test_app, delete, get, post_json, put_json};

async fn create_fund(app: &Router, name: &str) -> i64 {
    let response = post_json(app, "/api/v1/funds", json!({ "name": name })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

async fn create_investor(app: &Router, body: Value) -> i64 {
    let response = post_json(app, "/api/v1/investors", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

async fn create_persona(app: &Router, fund_id: i64, body: Value) -> i64 {
    let response = post_json(app, &format!("/api/v1/funds/{fund_id}/personas"), body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Put an investor into the fund's pipeline at the first default stage.
async fn add_to_pipeline(app: &Router, fund_id: i64, investor_id: i64) {
    let stages = body_json(get(app, &format!("/api/v1/funds/{fund_id}/stages")).await).await;
    let first_stage = stages[0]["id"].as_i64().unwrap();
    let response = put_json(
        app,
        "/api/v1/pipeline/move",
        json!({
            "fund_id": fund_id,
            "investor_id": investor_id,
            "stage_id": first_stage,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_persona_crud(pool: PgPool) {
    let app = build_test_app(pool);
    let fund_id = create_fund(&app, "Growth Fund II").await;

    let persona_id = create_persona(
        &app,
        fund_id,
        json!({
            "name": "Gulf Family Office",
            "target_investor_type": "Family Office",
            "target_nationalities": ["GCC"],
            "target_sectors": ["Technology"],
        }),
    )
    .await;

    let personas = body_json(get(&app, &format!("/api/v1/funds/{fund_id}/personas")).await).await;
    assert_eq!(personas.as_array().unwrap().len(), 1);
    assert_eq!(personas[0]["name"], "Gulf Family Office");

    let response = put_json(
        &app,
        &format!("/api/v1/funds/{fund_id}/personas/{persona_id}"),
        json!({ "target_age_min": 40 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["target_age_min"], 40);
    // Untouched fields survive a partial update.
    assert_eq!(updated["target_investor_type"], "Family Office");

    let response = delete(
        &app,
        &format!("/api/v1/funds/{fund_id}/personas/{persona_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let personas = body_json(get(&app, &format!("/api/v1/funds/{fund_id}/personas")).await).await;
    assert!(personas.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_persona_is_fund_scoped(pool: PgPool) {
    let app = build_test_app(pool);
    let fund_a = create_fund(&app, "Fund A").await;
    let fund_b = create_fund(&app, "Fund B").await;
    let persona_id = create_persona(&app, fund_a, json!({ "name": "Archetype" })).await;

    // Deleting through the wrong fund is a 404, not a cross-fund delete.
    let response = delete(&app, &format!("/api/v1/funds/{fund_b}/personas/{persona_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let personas = body_json(get(&app, &format!("/api/v1/funds/{fund_a}/personas")).await).await;
    assert_eq!(personas.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_match_scores_rule_based(pool: PgPool) {
    let app = build_test_app(pool);
    let fund_id = create_fund(&app, "Growth Fund II").await;

    // Type matches (35), nationality does not (25): round(35/60) = 58.
    create_persona(
        &app,
        fund_id,
        json!({
            "name": "Saudi Family Office",
            "target_investor_type": "Family Office",
            "target_nationalities": ["Saudi Arabia"],
        }),
    )
    .await;
    let investor_id = create_investor(
        &app,
        json!({
            "name": "Al Noor Capital",
            "investor_type": "Family Office",
            "nationality": "UAE",
        }),
    )
    .await;

    let response = post_json(
        &app,
        &format!("/api/v1/funds/{fund_id}/personas/match"),
        json!({ "investor_id": investor_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["method"], "rule_based");

    let matches = data["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["persona_name"], "Saudi Family Office");
    assert_eq!(matches[0]["score"], 58);
    assert_eq!(matches[0]["matched_attributes"], json!(["Investor type"]));
    assert_eq!(matches[0]["gap_attributes"], json!(["Nationality"]));
    assert!(matches[0]["reasoning"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_match_sorts_descending(pool: PgPool) {
    let app = build_test_app(pool);
    let fund_id = create_fund(&app, "Growth Fund II").await;

    create_persona(
        &app,
        fund_id,
        json!({ "name": "Mismatch", "target_investor_type": "Institutional" }),
    )
    .await;
    create_persona(
        &app,
        fund_id,
        json!({ "name": "Exact", "target_investor_type": "Family Office" }),
    )
    .await;
    let investor_id = create_investor(
        &app,
        json!({ "name": "Al Noor Capital", "investor_type": "Family Office" }),
    )
    .await;

    let response = post_json(
        &app,
        &format!("/api/v1/funds/{fund_id}/personas/match"),
        json!({ "investor_id": investor_id }),
    )
    .await;
    let data = &body_json(response).await["data"];
    let matches = data["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0]["persona_name"], "Exact");
    assert_eq!(matches[0]["score"], 100);
    assert_eq!(matches[1]["persona_name"], "Mismatch");
    assert_eq!(matches[1]["score"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_match_with_no_personas(pool: PgPool) {
    let app = build_test_app(pool);
    let fund_id = create_fund(&app, "Growth Fund II").await;
    let investor_id = create_investor(&app, json!({ "name": "Al Noor Capital" })).await;

    let response = post_json(
        &app,
        &format!("/api/v1/funds/{fund_id}/personas/match"),
        json!({ "investor_id": investor_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["method"], "rule_based");
    assert!(data["matches"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_suggest_clusters_poorly_matched_investors(pool: PgPool) {
    let app = build_test_app(pool);
    let fund_id = create_fund(&app, "Growth Fund II").await;

    // The existing persona covers none of the pipeline investors.
    create_persona(
        &app,
        fund_id,
        json!({
            "name": "European Institutional",
            "target_investor_type": "Institutional",
            "target_nationalities": ["Germany"],
        }),
    )
    .await;

    for name in ["Alia Ventures", "Basim Holdings", "Chloe Capital"] {
        let investor_id = create_investor(
            &app,
            json!({
                "name": name,
                "investor_type": "HNWI",
                "nationality": "Qatar",
                "sector": "Real Estate",
            }),
        )
        .await;
        add_to_pipeline(&app, fund_id, investor_id).await;
    }

    let response = post_json(
        &app,
        &format!("/api/v1/funds/{fund_id}/personas/suggest"),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["method"], "rule_based");

    let suggestions = data["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0]["suggested_name"], "HNWI / Qatar / Real Estate");
    assert_eq!(suggestions[0]["count"], 3);
    assert_eq!(suggestions[0]["target_investor_type"], "HNWI");
    assert_eq!(suggestions[0]["target_nationalities"], json!(["Qatar"]));
    assert_eq!(suggestions[0]["example_investors"].as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_suggest_with_everyone_matched(pool: PgPool) {
    let app = build_test_app(pool);
    let fund_id = create_fund(&app, "Growth Fund II").await;

    create_persona(
        &app,
        fund_id,
        json!({
            "name": "Gulf HNWI",
            "target_investor_type": "HNWI",
            "target_nationalities": ["GCC"],
        }),
    )
    .await;
    let investor_id = create_investor(
        &app,
        json!({ "name": "Alia Ventures", "investor_type": "HNWI", "nationality": "Qatar" }),
    )
    .await;
    add_to_pipeline(&app, fund_id, investor_id).await;

    let response = post_json(
        &app,
        &format!("/api/v1/funds/{fund_id}/personas/suggest"),
        json!({}),
    )
    .await;
    let data = &body_json(response).await["data"];
    assert_eq!(data["method"], "rule_based");
    assert!(data["suggestions"].as_array().unwrap().is_empty());
}
