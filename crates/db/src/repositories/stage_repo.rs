//! Repository for the `pipeline_stages` table.

use sqlx::PgPool;

use fundline_core::stages::DEFAULT_STAGES;
use fundline_core::types::DbId;

use crate::models::stage::{PipelineStage, UpdateStage};

const COLUMNS: &str = "id, fund_id, name, position, is_default, created_at, updated_at";

/// Provides stage registry operations.
pub struct StageRepo;

impl StageRepo {
    /// Return the fund's stages ordered by position, seeding the canonical
    /// default set in one transaction when the fund has none yet.
    pub async fn list_or_seed(
        pool: &PgPool,
        fund_id: DbId,
    ) -> Result<Vec<PipelineStage>, sqlx::Error> {
        let existing = Self::list_by_fund(pool, fund_id).await?;
        if !existing.is_empty() {
            return Ok(existing);
        }

        let mut tx = pool.begin().await?;
        let insert = format!(
            "INSERT INTO pipeline_stages (fund_id, name, position, is_default)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let mut seeded = Vec::with_capacity(DEFAULT_STAGES.len());
        for stage in DEFAULT_STAGES {
            let row = sqlx::query_as::<_, PipelineStage>(&insert)
                .bind(fund_id)
                .bind(stage.name)
                .bind(stage.position)
                .bind(stage.is_default)
                .fetch_one(&mut *tx)
                .await?;
            seeded.push(row);
        }
        tx.commit().await?;

        tracing::info!(fund_id, count = seeded.len(), "Seeded default pipeline stages");
        Ok(seeded)
    }

    /// List a fund's stages ordered by position.
    pub async fn list_by_fund(
        pool: &PgPool,
        fund_id: DbId,
    ) -> Result<Vec<PipelineStage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pipeline_stages WHERE fund_id = $1 ORDER BY position"
        );
        sqlx::query_as::<_, PipelineStage>(&query)
            .bind(fund_id)
            .fetch_all(pool)
            .await
    }

    /// Find a stage by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PipelineStage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pipeline_stages WHERE id = $1");
        sqlx::query_as::<_, PipelineStage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Append a user-defined stage at max(position) + 1 (0 when the fund
    /// has no stages). Duplicate names within a fund are accepted.
    pub async fn create(
        pool: &PgPool,
        fund_id: DbId,
        name: &str,
    ) -> Result<PipelineStage, sqlx::Error> {
        let query = format!(
            "INSERT INTO pipeline_stages (fund_id, name, position, is_default)
             SELECT $1, $2, COALESCE(MAX(position) + 1, 0), FALSE
             FROM pipeline_stages WHERE fund_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PipelineStage>(&query)
            .bind(fund_id)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Update a stage. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStage,
    ) -> Result<Option<PipelineStage>, sqlx::Error> {
        let query = format!(
            "UPDATE pipeline_stages SET
                name = COALESCE($2, name),
                position = COALESCE($3, position),
                is_default = COALESCE($4, is_default),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PipelineStage>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.position)
            .bind(input.is_default)
            .fetch_optional(pool)
            .await
    }

    /// Delete a stage by ID. Remaining stages keep their positions.
    ///
    /// Callers must first check the stage has no pipeline entries
    /// (`PipelineRepo::count_by_stage`) and raise `StageInUse` otherwise.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pipeline_stages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
