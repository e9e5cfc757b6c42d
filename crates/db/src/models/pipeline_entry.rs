//! Pipeline entry entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fundline_core::types::{DbId, Timestamp};

/// A row from the `pipeline_entries` table: the current placement of one
/// investor in one fund's pipeline. Unique per (fund, investor).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PipelineEntry {
    pub id: DbId,
    pub fund_id: DbId,
    pub investor_id: DbId,
    pub stage_id: DbId,
    /// Intra-stage kanban ordering, not pipeline order.
    pub position: i32,
    pub stage_entered_at: Timestamp,
    pub last_interaction_at: Option<Timestamp>,
    pub next_step: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for the move endpoint — the only path that can trigger
/// checklist generation.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveInvestor {
    pub fund_id: DbId,
    pub investor_id: DbId,
    pub stage_id: DbId,
    #[serde(default)]
    pub position: i32,
    pub actor_id: Option<DbId>,
}

/// DTO for editing entry fields. Never refreshes `stage_entered_at` and
/// never triggers generation.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePipelineEntry {
    pub position: Option<i32>,
    pub last_interaction_at: Option<Timestamp>,
    pub next_step: Option<String>,
}

/// Read model for "what stage is this investor in", with dwell time.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineStatus {
    pub investor_id: DbId,
    pub fund_id: Option<DbId>,
    pub stage_id: Option<DbId>,
    pub stage_name: Option<String>,
    pub position: i32,
    pub stage_entered_at: Option<Timestamp>,
    pub days_in_stage: Option<i64>,
}
