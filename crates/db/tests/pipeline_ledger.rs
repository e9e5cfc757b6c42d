//! Integration tests for the pipeline ledger.
//!
//! Exercises the repository layer against a real database to verify that:
//! - An investor holds at most one entry per fund
//! - Stage changes refresh `stage_entered_at`, position edits do not
//! - Stage deletion is blocked while entries reference the stage
//! - Field edits never touch the stage clock

use assert_matches::assert_matches;
use sqlx::PgPool;

use fundline_db::models::fund::CreateFund;
use fundline_db::models::investor::CreateInvestor;
use fundline_db::models::pipeline_entry::UpdatePipelineEntry;
use fundline_db::repositories::{FundRepo, InvestorRepo, PipelineRepo, StageRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_fund(name: &str) -> CreateFund {
    CreateFund {
        name: name.to_string(),
        currency: None,
        target_raise: None,
        target_date: None,
        status: None,
    }
}

fn new_investor(name: &str) -> CreateInvestor {
    CreateInvestor {
        name: name.to_string(),
        investor_type: Some("Family Office".to_string()),
        nationality: Some("Saudi Arabia".to_string()),
        sector: Some("Technology".to_string()),
        gender: Some("male".to_string()),
        age: Some(45),
        investment_size: None,
        investment_size_currency: None,
        expected_ticket_amount: Some(1_000_000.0),
        expected_ticket_currency: None,
        contact_email: None,
        contact_phone: None,
    }
}

// ---------------------------------------------------------------------------
// Test: one entry per (fund, investor)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_one_entry_per_fund_and_investor(pool: PgPool) {
    let fund = FundRepo::create(&pool, &new_fund("Ledger Fund")).await.unwrap();
    let investor = InvestorRepo::create(&pool, &new_investor("Alia")).await.unwrap();
    let stages = StageRepo::list_or_seed(&pool, fund.id).await.unwrap();

    PipelineRepo::create(&pool, fund.id, investor.id, stages[0].id, 0)
        .await
        .unwrap();

    let err = PipelineRepo::create(&pool, fund.id, investor.id, stages[1].id, 0)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505")
            && db.constraint() == Some("uq_pipeline_entries_fund_investor")
    );
}

// ---------------------------------------------------------------------------
// Test: change_stage refreshes the stage clock
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_change_stage_refreshes_stage_entered_at(pool: PgPool) {
    let fund = FundRepo::create(&pool, &new_fund("Clock Fund")).await.unwrap();
    let investor = InvestorRepo::create(&pool, &new_investor("Badr")).await.unwrap();
    let stages = StageRepo::list_or_seed(&pool, fund.id).await.unwrap();

    let entry = PipelineRepo::create(&pool, fund.id, investor.id, stages[0].id, 0)
        .await
        .unwrap();

    // Backdate the clock so a refresh is observable.
    sqlx::query("UPDATE pipeline_entries SET stage_entered_at = NOW() - INTERVAL '10 days' WHERE id = $1")
        .bind(entry.id)
        .execute(&pool)
        .await
        .unwrap();
    let backdated = PipelineRepo::find_by_id(&pool, entry.id).await.unwrap().unwrap();

    let moved = PipelineRepo::change_stage(&pool, entry.id, stages[3].id, 0)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(moved.stage_id, stages[3].id);
    assert!(
        moved.stage_entered_at > backdated.stage_entered_at,
        "stage change must refresh stage_entered_at"
    );
}

// ---------------------------------------------------------------------------
// Test: position edits keep the stage clock
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_position_update_keeps_stage_entered_at(pool: PgPool) {
    let fund = FundRepo::create(&pool, &new_fund("Position Fund")).await.unwrap();
    let investor = InvestorRepo::create(&pool, &new_investor("Carla")).await.unwrap();
    let stages = StageRepo::list_or_seed(&pool, fund.id).await.unwrap();

    let entry = PipelineRepo::create(&pool, fund.id, investor.id, stages[2].id, 0)
        .await
        .unwrap();

    let reordered = PipelineRepo::update_position(&pool, entry.id, 5)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reordered.position, 5);
    assert_eq!(reordered.stage_id, stages[2].id);
    assert_eq!(
        reordered.stage_entered_at, entry.stage_entered_at,
        "position-only moves must not touch stage_entered_at"
    );
}

// ---------------------------------------------------------------------------
// Test: field edits keep the stage clock
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_field_update_keeps_stage_entered_at(pool: PgPool) {
    let fund = FundRepo::create(&pool, &new_fund("Fields Fund")).await.unwrap();
    let investor = InvestorRepo::create(&pool, &new_investor("Dana")).await.unwrap();
    let stages = StageRepo::list_or_seed(&pool, fund.id).await.unwrap();

    let entry = PipelineRepo::create(&pool, fund.id, investor.id, stages[1].id, 0)
        .await
        .unwrap();

    let input = UpdatePipelineEntry {
        position: None,
        last_interaction_at: None,
        next_step: Some("Send the teaser deck".to_string()),
    };
    let updated = PipelineRepo::update_fields(&pool, entry.id, &input)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.next_step.as_deref(), Some("Send the teaser deck"));
    assert_eq!(updated.stage_entered_at, entry.stage_entered_at);
}

// ---------------------------------------------------------------------------
// Test: count_by_stage gates stage deletion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_count_by_stage_reflects_occupancy(pool: PgPool) {
    let fund = FundRepo::create(&pool, &new_fund("Occupied Fund")).await.unwrap();
    let a = InvestorRepo::create(&pool, &new_investor("Ehab")).await.unwrap();
    let b = InvestorRepo::create(&pool, &new_investor("Farah")).await.unwrap();
    let stages = StageRepo::list_or_seed(&pool, fund.id).await.unwrap();

    PipelineRepo::create(&pool, fund.id, a.id, stages[4].id, 0).await.unwrap();
    PipelineRepo::create(&pool, fund.id, b.id, stages[4].id, 1).await.unwrap();

    let occupied = PipelineRepo::count_by_stage(&pool, stages[4].id).await.unwrap();
    assert_eq!(occupied, 2);

    let empty = PipelineRepo::count_by_stage(&pool, stages[5].id).await.unwrap();
    assert_eq!(empty, 0);

    // An unreferenced stage deletes cleanly.
    let deleted = StageRepo::delete(&pool, stages[5].id).await.unwrap();
    assert!(deleted);
}

// ---------------------------------------------------------------------------
// Test: deleting an investor cascades its entry
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_investor_delete_cascades_entry(pool: PgPool) {
    let fund = FundRepo::create(&pool, &new_fund("Cascade Fund")).await.unwrap();
    let investor = InvestorRepo::create(&pool, &new_investor("Ghada")).await.unwrap();
    let stages = StageRepo::list_or_seed(&pool, fund.id).await.unwrap();

    let entry = PipelineRepo::create(&pool, fund.id, investor.id, stages[0].id, 0)
        .await
        .unwrap();

    InvestorRepo::delete(&pool, investor.id).await.unwrap();

    let found = PipelineRepo::find_by_id(&pool, entry.id).await.unwrap();
    assert!(found.is_none(), "entry should cascade with the investor");
}
