//! PostgreSQL persistence layer for Fundline.
//!
//! `models/` holds `FromRow` entity structs plus create/update DTOs;
//! `repositories/` holds unit structs with static async methods over a
//! [`PgPool`]. Repositories speak `sqlx::Error` only — domain errors
//! (`NotFound`, `StageInUse`) are raised by callers.

pub mod models;
pub mod repositories;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Shared alias so downstream crates don't name sqlx types directly.
pub type DbPool = PgPool;

/// Create a connection pool against `database_url`.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Cheap liveness probe used by the `/health` endpoint and startup.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
