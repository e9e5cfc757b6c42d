//! Repository for the `funds` table.

use sqlx::PgPool;

use fundline_core::types::DbId;

use crate::models::fund::{CreateFund, Fund, UpdateFund};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, currency, target_raise, target_date, status, created_at, updated_at";

/// Provides CRUD operations for funds.
pub struct FundRepo;

impl FundRepo {
    /// Insert a new fund, returning the created row.
    ///
    /// Currency defaults to USD and status to Active when omitted.
    pub async fn create(pool: &PgPool, input: &CreateFund) -> Result<Fund, sqlx::Error> {
        let query = format!(
            "INSERT INTO funds (name, currency, target_raise, target_date, status)
             VALUES ($1, COALESCE($2, 'USD'), $3, $4, COALESCE($5, 'Active'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Fund>(&query)
            .bind(&input.name)
            .bind(&input.currency)
            .bind(input.target_raise)
            .bind(input.target_date)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a fund by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Fund>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM funds WHERE id = $1");
        sqlx::query_as::<_, Fund>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all funds ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Fund>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM funds ORDER BY created_at DESC");
        sqlx::query_as::<_, Fund>(&query).fetch_all(pool).await
    }

    /// Update a fund. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFund,
    ) -> Result<Option<Fund>, sqlx::Error> {
        let query = format!(
            "UPDATE funds SET
                name = COALESCE($2, name),
                currency = COALESCE($3, currency),
                target_raise = COALESCE($4, target_raise),
                target_date = COALESCE($5, target_date),
                status = COALESCE($6, status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Fund>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.currency)
            .bind(input.target_raise)
            .bind(input.target_date)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a fund by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM funds WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of funds.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM funds")
            .fetch_one(pool)
            .await
    }

    /// Number of funds with Active status.
    pub async fn count_active(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM funds WHERE status = 'Active'")
            .fetch_one(pool)
            .await
    }
}
