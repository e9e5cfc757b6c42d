//! Repository for the `investors` table.

use sqlx::PgPool;

use fundline_core::types::DbId;

use crate::models::investor::{CreateInvestor, Investor, UpdateInvestor};

const COLUMNS: &str = "id, name, investor_type, nationality, sector, gender, age, \
     investment_size, investment_size_currency, expected_ticket_amount, \
     expected_ticket_currency, contact_email, contact_phone, created_at, updated_at";

/// Provides CRUD operations for investors.
pub struct InvestorRepo;

impl InvestorRepo {
    /// Insert a new investor, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateInvestor) -> Result<Investor, sqlx::Error> {
        let query = format!(
            "INSERT INTO investors
                (name, investor_type, nationality, sector, gender, age,
                 investment_size, investment_size_currency,
                 expected_ticket_amount, expected_ticket_currency,
                 contact_email, contact_phone)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Investor>(&query)
            .bind(&input.name)
            .bind(&input.investor_type)
            .bind(&input.nationality)
            .bind(&input.sector)
            .bind(&input.gender)
            .bind(input.age)
            .bind(input.investment_size)
            .bind(&input.investment_size_currency)
            .bind(input.expected_ticket_amount)
            .bind(&input.expected_ticket_currency)
            .bind(&input.contact_email)
            .bind(&input.contact_phone)
            .fetch_one(pool)
            .await
    }

    /// Find an investor by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Investor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM investors WHERE id = $1");
        sqlx::query_as::<_, Investor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all investors ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Investor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM investors ORDER BY name");
        sqlx::query_as::<_, Investor>(&query).fetch_all(pool).await
    }

    /// List the investors that have a pipeline entry in the given fund.
    pub async fn list_in_fund_pipeline(
        pool: &PgPool,
        fund_id: DbId,
    ) -> Result<Vec<Investor>, sqlx::Error> {
        let query = "SELECT i.id, i.name, i.investor_type, i.nationality, i.sector, i.gender,
                    i.age, i.investment_size, i.investment_size_currency,
                    i.expected_ticket_amount, i.expected_ticket_currency,
                    i.contact_email, i.contact_phone, i.created_at, i.updated_at
             FROM investors i
             JOIN pipeline_entries pe ON pe.investor_id = i.id
             WHERE pe.fund_id = $1
             ORDER BY i.name";
        sqlx::query_as::<_, Investor>(query)
            .bind(fund_id)
            .fetch_all(pool)
            .await
    }

    /// Update an investor. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateInvestor,
    ) -> Result<Option<Investor>, sqlx::Error> {
        let query = format!(
            "UPDATE investors SET
                name = COALESCE($2, name),
                investor_type = COALESCE($3, investor_type),
                nationality = COALESCE($4, nationality),
                sector = COALESCE($5, sector),
                gender = COALESCE($6, gender),
                age = COALESCE($7, age),
                investment_size = COALESCE($8, investment_size),
                investment_size_currency = COALESCE($9, investment_size_currency),
                expected_ticket_amount = COALESCE($10, expected_ticket_amount),
                expected_ticket_currency = COALESCE($11, expected_ticket_currency),
                contact_email = COALESCE($12, contact_email),
                contact_phone = COALESCE($13, contact_phone),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Investor>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.investor_type)
            .bind(&input.nationality)
            .bind(&input.sector)
            .bind(&input.gender)
            .bind(input.age)
            .bind(input.investment_size)
            .bind(&input.investment_size_currency)
            .bind(input.expected_ticket_amount)
            .bind(&input.expected_ticket_currency)
            .bind(&input.contact_email)
            .bind(&input.contact_phone)
            .fetch_optional(pool)
            .await
    }

    /// Delete an investor by ID. The pipeline entry cascades with it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM investors WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of investors.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM investors")
            .fetch_one(pool)
            .await
    }
}
