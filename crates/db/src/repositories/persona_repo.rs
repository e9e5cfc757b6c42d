//! Repository for the `personas` table.

use sqlx::PgPool;

use fundline_core::types::DbId;

use crate::models::persona::{CreatePersona, Persona, UpdatePersona};

const COLUMNS: &str = "id, fund_id, name, description, target_investor_type, target_gender, \
     target_age_min, target_nationalities, target_sectors, professional_goals, \
     professional_frustrations, why_invest, decision_making_process, min_ticket_size, \
     max_ticket_size, created_by, created_at, updated_at";

/// Provides CRUD operations for personas.
pub struct PersonaRepo;

impl PersonaRepo {
    /// List a fund's personas, newest first.
    pub async fn list_by_fund(pool: &PgPool, fund_id: DbId) -> Result<Vec<Persona>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM personas WHERE fund_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Persona>(&query)
            .bind(fund_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a new persona for a fund.
    pub async fn create(
        pool: &PgPool,
        fund_id: DbId,
        input: &CreatePersona,
    ) -> Result<Persona, sqlx::Error> {
        let query = format!(
            "INSERT INTO personas
                (fund_id, name, description, target_investor_type, target_gender,
                 target_age_min, target_nationalities, target_sectors,
                 professional_goals, professional_frustrations, why_invest,
                 decision_making_process, min_ticket_size, max_ticket_size, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Persona>(&query)
            .bind(fund_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.target_investor_type)
            .bind(&input.target_gender)
            .bind(input.target_age_min)
            .bind(&input.target_nationalities)
            .bind(&input.target_sectors)
            .bind(&input.professional_goals)
            .bind(&input.professional_frustrations)
            .bind(&input.why_invest)
            .bind(&input.decision_making_process)
            .bind(input.min_ticket_size)
            .bind(input.max_ticket_size)
            .bind(input.actor_id)
            .fetch_one(pool)
            .await
    }

    /// Update a persona scoped to its fund. Only non-`None` fields apply.
    pub async fn update(
        pool: &PgPool,
        fund_id: DbId,
        id: DbId,
        input: &UpdatePersona,
    ) -> Result<Option<Persona>, sqlx::Error> {
        let query = format!(
            "UPDATE personas SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                target_investor_type = COALESCE($5, target_investor_type),
                target_gender = COALESCE($6, target_gender),
                target_age_min = COALESCE($7, target_age_min),
                target_nationalities = COALESCE($8, target_nationalities),
                target_sectors = COALESCE($9, target_sectors),
                professional_goals = COALESCE($10, professional_goals),
                professional_frustrations = COALESCE($11, professional_frustrations),
                why_invest = COALESCE($12, why_invest),
                decision_making_process = COALESCE($13, decision_making_process),
                min_ticket_size = COALESCE($14, min_ticket_size),
                max_ticket_size = COALESCE($15, max_ticket_size),
                updated_at = NOW()
             WHERE id = $2 AND fund_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Persona>(&query)
            .bind(fund_id)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.target_investor_type)
            .bind(&input.target_gender)
            .bind(input.target_age_min)
            .bind(&input.target_nationalities)
            .bind(&input.target_sectors)
            .bind(&input.professional_goals)
            .bind(&input.professional_frustrations)
            .bind(&input.why_invest)
            .bind(&input.decision_making_process)
            .bind(input.min_ticket_size)
            .bind(input.max_ticket_size)
            .fetch_optional(pool)
            .await
    }

    /// Delete a persona scoped to its fund. Returns `true` if removed.
    pub async fn delete(pool: &PgPool, fund_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM personas WHERE id = $2 AND fund_id = $1")
            .bind(fund_id)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
