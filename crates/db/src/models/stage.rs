//! Pipeline stage entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use fundline_core::types::{DbId, Timestamp};

/// A stage row from the `pipeline_stages` table.
///
/// `position` defines the left-to-right pipeline order within a fund.
/// Positions are dense but not required to be contiguous (deletions do
/// not renumber survivors).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PipelineStage {
    pub id: DbId,
    pub fund_id: DbId,
    pub name: String,
    pub position: i32,
    pub is_default: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new stage. Appended at max(position) + 1.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStage {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// DTO for updating an existing stage. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateStage {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub position: Option<i32>,
    pub is_default: Option<bool>,
}
