//! Repository for the `pipeline_entries` table.
//!
//! Move semantics (create vs. stage change vs. position-only) are decided
//! by `fundline_core::pipeline::decide_move`; this repository only offers
//! the primitive writes each outcome needs. `stage_entered_at` is
//! refreshed exclusively by [`PipelineRepo::change_stage`].

use sqlx::PgPool;

use fundline_core::types::DbId;

use crate::models::pipeline_entry::{PipelineEntry, UpdatePipelineEntry};

const COLUMNS: &str = "id, fund_id, investor_id, stage_id, position, stage_entered_at, \
     last_interaction_at, next_step, created_at, updated_at";

/// Provides ledger operations for pipeline entries.
pub struct PipelineRepo;

impl PipelineRepo {
    /// Find the entry for one (fund, investor) pair. At most one exists.
    pub async fn find_by_fund_and_investor(
        pool: &PgPool,
        fund_id: DbId,
        investor_id: DbId,
    ) -> Result<Option<PipelineEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pipeline_entries WHERE fund_id = $1 AND investor_id = $2"
        );
        sqlx::query_as::<_, PipelineEntry>(&query)
            .bind(fund_id)
            .bind(investor_id)
            .fetch_optional(pool)
            .await
    }

    /// Find an entry by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PipelineEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pipeline_entries WHERE id = $1");
        sqlx::query_as::<_, PipelineEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an investor's entry across all funds (an investor sits in at
    /// most a handful of pipelines; the first match by recency is the
    /// status read used by profile views).
    pub async fn find_latest_by_investor(
        pool: &PgPool,
        investor_id: DbId,
    ) -> Result<Option<PipelineEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pipeline_entries WHERE investor_id = $1
             ORDER BY updated_at DESC LIMIT 1"
        );
        sqlx::query_as::<_, PipelineEntry>(&query)
            .bind(investor_id)
            .fetch_optional(pool)
            .await
    }

    /// List a fund's entries ordered by stage then intra-stage position.
    pub async fn list_by_fund(
        pool: &PgPool,
        fund_id: DbId,
    ) -> Result<Vec<PipelineEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pipeline_entries WHERE fund_id = $1
             ORDER BY stage_id, position"
        );
        sqlx::query_as::<_, PipelineEntry>(&query)
            .bind(fund_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a fresh entry with `stage_entered_at = NOW()`.
    pub async fn create(
        pool: &PgPool,
        fund_id: DbId,
        investor_id: DbId,
        stage_id: DbId,
        position: i32,
    ) -> Result<PipelineEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO pipeline_entries (fund_id, investor_id, stage_id, position)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PipelineEntry>(&query)
            .bind(fund_id)
            .bind(investor_id)
            .bind(stage_id)
            .bind(position)
            .fetch_one(pool)
            .await
    }

    /// Move an entry to a different stage, refreshing `stage_entered_at`.
    pub async fn change_stage(
        pool: &PgPool,
        id: DbId,
        stage_id: DbId,
        position: i32,
    ) -> Result<Option<PipelineEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE pipeline_entries SET
                stage_id = $2,
                position = $3,
                stage_entered_at = NOW(),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PipelineEntry>(&query)
            .bind(id)
            .bind(stage_id)
            .bind(position)
            .fetch_optional(pool)
            .await
    }

    /// Reorder an entry within its current stage. `stage_entered_at` is
    /// deliberately untouched.
    pub async fn update_position(
        pool: &PgPool,
        id: DbId,
        position: i32,
    ) -> Result<Option<PipelineEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE pipeline_entries SET position = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PipelineEntry>(&query)
            .bind(id)
            .bind(position)
            .fetch_optional(pool)
            .await
    }

    /// Edit non-stage fields. Never refreshes `stage_entered_at`.
    pub async fn update_fields(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePipelineEntry,
    ) -> Result<Option<PipelineEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE pipeline_entries SET
                position = COALESCE($2, position),
                last_interaction_at = COALESCE($3, last_interaction_at),
                next_step = COALESCE($4, next_step),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PipelineEntry>(&query)
            .bind(id)
            .bind(input.position)
            .bind(input.last_interaction_at)
            .bind(&input.next_step)
            .fetch_optional(pool)
            .await
    }

    /// Remove an entry outright. Tasks are not cascaded.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pipeline_entries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of entries currently referencing a stage. Non-zero blocks
    /// stage deletion.
    pub async fn count_by_stage(pool: &PgPool, stage_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM pipeline_entries WHERE stage_id = $1")
            .bind(stage_id)
            .fetch_one(pool)
            .await
    }
}
