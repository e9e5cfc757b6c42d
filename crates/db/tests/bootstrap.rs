use assert_matches::assert_matches;
use sqlx::PgPool;

use fundline_db::models::fund::CreateFund;
use fundline_db::repositories::{FundRepo, StageRepo};

fn new_fund(name: &str) -> CreateFund {
    CreateFund {
        name: name.to_string(),
        currency: None,
        target_raise: None,
        target_date: None,
        status: None,
    }
}

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    // Health check
    fundline_db::health_check(&pool).await.unwrap();

    // Verify all core tables exist and are queryable
    let tables = [
        "funds",
        "investors",
        "pipeline_stages",
        "pipeline_entries",
        "tasks",
        "personas",
        "events",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// A fresh fund gets the canonical thirteen stages on first read, and a
/// second read returns the same rows instead of seeding again.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_stage_seed_is_once_only(pool: PgPool) {
    let fund = FundRepo::create(&pool, &new_fund("Seed Fund")).await.unwrap();

    let first = StageRepo::list_or_seed(&pool, fund.id).await.unwrap();
    assert_eq!(first.len(), 13);
    assert_eq!(first[0].name, "Prospects");
    assert_eq!(first[0].position, 0);
    assert!(first[0].is_default, "Prospects should be the default stage");
    assert_eq!(first[12].name, "Transfer Date");
    assert_eq!(first[12].position, 12);

    let second = StageRepo::list_or_seed(&pool, fund.id).await.unwrap();
    assert_eq!(second.len(), 13, "second read must not seed again");
    let first_ids: Vec<_> = first.iter().map(|s| s.id).collect();
    let second_ids: Vec<_> = second.iter().map(|s| s.id).collect();
    assert_eq!(first_ids, second_ids, "seeded rows should be stable");
}

/// Seeding is per fund: two funds get independent stage rows.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_stage_seed_is_per_fund(pool: PgPool) {
    let a = FundRepo::create(&pool, &new_fund("Fund A")).await.unwrap();
    let b = FundRepo::create(&pool, &new_fund("Fund B")).await.unwrap();

    let stages_a = StageRepo::list_or_seed(&pool, a.id).await.unwrap();
    let stages_b = StageRepo::list_or_seed(&pool, b.id).await.unwrap();

    assert_eq!(stages_a.len(), 13);
    assert_eq!(stages_b.len(), 13);
    assert!(
        stages_a.iter().all(|s| stages_b.iter().all(|t| t.id != s.id)),
        "funds must not share stage rows"
    );
}

/// User-defined stages append after the seeded set.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_custom_stage_appends_at_end(pool: PgPool) {
    let fund = FundRepo::create(&pool, &new_fund("Custom Stage Fund"))
        .await
        .unwrap();
    StageRepo::list_or_seed(&pool, fund.id).await.unwrap();

    let custom = StageRepo::create(&pool, fund.id, "Second Close").await.unwrap();
    assert_eq!(custom.position, 13);
    assert!(!custom.is_default);

    // Duplicate names are allowed within a fund.
    let dup = StageRepo::create(&pool, fund.id, "Second Close").await.unwrap();
    assert_eq!(dup.position, 14);
}

/// Duplicate fund names violate uq_funds_name.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_fund_name_is_unique(pool: PgPool) {
    FundRepo::create(&pool, &new_fund("Twin")).await.unwrap();
    let err = FundRepo::create(&pool, &new_fund("Twin")).await.unwrap_err();
    assert_matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505")
    );
}
