//! Task entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use fundline_core::types::{DbId, Timestamp};

/// A task row from the `tasks` table.
///
/// `stage_name` and `investor_name` are denormalized display copies taken
/// at creation time; renaming the source later does not update them.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub fund_id: DbId,
    pub title: String,
    pub stage_id: Option<DbId>,
    pub stage_name: String,
    pub investor_id: Option<DbId>,
    pub investor_name: Option<String>,
    pub priority: String,
    pub due_date: Option<NaiveDate>,
    pub status: String,
    pub is_auto_generated: bool,
    pub created_by: Option<DbId>,
    pub created_by_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Task {
    /// An open task whose due date has passed.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == "open" && self.due_date.is_some_and(|due| today > due)
    }
}

/// DTO for creating a user-authored task.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTask {
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    pub stage_id: Option<DbId>,
    pub stage_name: String,
    pub investor_id: Option<DbId>,
    pub investor_name: Option<String>,
    /// high / medium / low, defaults to medium.
    pub priority: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub actor_id: Option<DbId>,
    pub actor_name: Option<String>,
}

/// DTO for updating an existing task. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTask {
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,
    pub stage_id: Option<DbId>,
    pub stage_name: Option<String>,
    pub investor_id: Option<DbId>,
    pub investor_name: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<String>,
}

/// One checklist row the generator inserts on stage entry.
#[derive(Debug, Clone)]
pub struct NewAutoTask {
    pub fund_id: DbId,
    pub title: String,
    pub stage_id: DbId,
    pub stage_name: String,
    pub investor_id: DbId,
    pub investor_name: String,
    pub priority: String,
    pub due_date: NaiveDate,
    pub created_by: Option<DbId>,
}
