//! Repository for the `events` table (append-only audit feed).

use sqlx::PgPool;

use fundline_core::types::DbId;

use crate::models::event::Event;

const COLUMNS: &str =
    "id, event_type, source_entity_type, source_entity_id, actor_user_id, payload, created_at";

/// Persists and queries domain events.
pub struct EventRepo;

impl EventRepo {
    /// Append an event, returning its ID.
    pub async fn insert(
        pool: &PgPool,
        event_type: &str,
        source_entity_type: Option<&str>,
        source_entity_id: Option<DbId>,
        actor_user_id: Option<DbId>,
        payload: &serde_json::Value,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO events
                (event_type, source_entity_type, source_entity_id, actor_user_id, payload)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(event_type)
        .bind(source_entity_type)
        .bind(source_entity_id)
        .bind(actor_user_id)
        .bind(payload)
        .fetch_one(pool)
        .await
    }

    /// Most recent events, newest first.
    pub async fn list_recent(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Events that touched one entity, newest first.
    pub async fn list_for_entity(
        pool: &PgPool,
        source_entity_type: &str,
        source_entity_id: DbId,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE source_entity_type = $1 AND source_entity_id = $2
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(source_entity_type)
            .bind(source_entity_id)
            .fetch_all(pool)
            .await
    }
}
