//! Automatic checklist generation on stage entry.
//!
//! Each default stage carries a checklist template; when an investor
//! enters a stage (create or stage change, never a position reshuffle)
//! the generator materializes the template as task rows. Generation is
//! idempotent per (investor, stage): a count fast path skips the work,
//! and the partial unique index on auto tasks closes the race window
//! between concurrent moves.

use std::sync::Arc;

use chrono::{Duration, Utc};
use sqlx::PgPool;

use fundline_core::checklist::ChecklistTable;
use fundline_core::types::DbId;
use fundline_db::models::task::NewAutoTask;
use fundline_db::repositories::TaskRepo;

/// Everything the generator needs to know about one stage entry.
#[derive(Debug, Clone)]
pub struct StageEntry {
    pub fund_id: DbId,
    pub stage_id: DbId,
    pub stage_name: String,
    pub investor_id: DbId,
    pub investor_name: String,
    pub actor_id: Option<DbId>,
}

/// Stage-entry checklist generator. Holds the immutable checklist table,
/// built once at startup and shared via `Arc`.
pub struct TaskGenerator {
    table: Arc<ChecklistTable>,
}

impl TaskGenerator {
    pub fn new(table: Arc<ChecklistTable>) -> Self {
        Self { table }
    }

    /// Generate the checklist for a stage entry, returning the number of
    /// tasks actually inserted.
    ///
    /// Stages without a template and repeat entries both no-op with 0.
    /// Database errors propagate.
    pub async fn on_stage_entry(
        &self,
        pool: &PgPool,
        entry: &StageEntry,
    ) -> Result<u64, sqlx::Error> {
        let templates = self.table.tasks_for(&entry.stage_name);
        if templates.is_empty() {
            return Ok(0);
        }

        let existing = TaskRepo::count_auto_for(pool, entry.investor_id, entry.stage_id).await?;
        if existing > 0 {
            return Ok(0);
        }

        // One due date for the whole batch.
        let due_date =
            Utc::now().date_naive() + Duration::days(self.table.due_days_for(&entry.stage_name));

        let batch: Vec<NewAutoTask> = templates
            .iter()
            .map(|template| NewAutoTask {
                fund_id: entry.fund_id,
                title: template.title.clone(),
                stage_id: entry.stage_id,
                stage_name: entry.stage_name.clone(),
                investor_id: entry.investor_id,
                investor_name: entry.investor_name.clone(),
                priority: template.priority.as_str().to_string(),
                due_date,
                created_by: entry.actor_id,
            })
            .collect();

        let inserted = TaskRepo::insert_auto_batch(pool, &batch).await?;
        if inserted > 0 {
            tracing::info!(
                investor_id = entry.investor_id,
                stage = %entry.stage_name,
                count = inserted,
                "Generated stage checklist"
            );
        }
        Ok(inserted)
    }
}
