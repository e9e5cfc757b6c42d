//! Repository for the `tasks` table.

use sqlx::PgPool;

use fundline_core::types::DbId;

use crate::models::task::{CreateTask, NewAutoTask, Task, UpdateTask};

const COLUMNS: &str = "id, fund_id, title, stage_id, stage_name, investor_id, investor_name, \
     priority, due_date, status, is_auto_generated, created_by, created_by_name, \
     created_at, updated_at";

/// Provides CRUD and checklist-generation operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// List a fund's tasks, open-only unless `include_completed`.
    /// Ordered open-first, then by due date (overdue bubbles up), then
    /// priority.
    pub async fn list_by_fund(
        pool: &PgPool,
        fund_id: DbId,
        include_completed: bool,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE fund_id = $1 AND ($2 OR status = 'open')
             ORDER BY status = 'open' DESC,
                      due_date ASC NULLS LAST,
                      CASE priority WHEN 'high' THEN 0 WHEN 'medium' THEN 1 ELSE 2 END"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(fund_id)
            .bind(include_completed)
            .fetch_all(pool)
            .await
    }

    /// Find a task by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a user-authored task.
    pub async fn create(
        pool: &PgPool,
        fund_id: DbId,
        input: &CreateTask,
        investor_name: Option<&str>,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks
                (fund_id, title, stage_id, stage_name, investor_id, investor_name,
                 priority, due_date, is_auto_generated, created_by, created_by_name)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'medium'), $8, FALSE, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(fund_id)
            .bind(&input.title)
            .bind(input.stage_id)
            .bind(&input.stage_name)
            .bind(input.investor_id)
            .bind(investor_name.or(input.investor_name.as_deref()))
            .bind(&input.priority)
            .bind(input.due_date)
            .bind(input.actor_id)
            .bind(&input.actor_name)
            .fetch_one(pool)
            .await
    }

    /// Count auto-generated tasks for one (investor, stage) pair — the
    /// generator's idempotency fast path.
    pub async fn count_auto_for(
        pool: &PgPool,
        investor_id: DbId,
        stage_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM tasks
             WHERE investor_id = $1 AND stage_id = $2 AND is_auto_generated",
        )
        .bind(investor_id)
        .bind(stage_id)
        .fetch_one(pool)
        .await
    }

    /// Bulk-insert a stage checklist, returning the number of rows
    /// actually inserted.
    ///
    /// `ON CONFLICT DO NOTHING` against `uq_tasks_auto_checklist` closes
    /// the race window left open by the count fast path: two concurrent
    /// moves of the same investor into the same stage cannot duplicate
    /// checklist rows.
    pub async fn insert_auto_batch(
        pool: &PgPool,
        batch: &[NewAutoTask],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut inserted = 0u64;
        for task in batch {
            let result = sqlx::query(
                "INSERT INTO tasks
                    (fund_id, title, stage_id, stage_name, investor_id, investor_name,
                     priority, due_date, is_auto_generated, created_by, created_by_name)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, TRUE, $9, 'Auto-Generated')
                 ON CONFLICT (investor_id, stage_id, title) WHERE is_auto_generated
                 DO NOTHING",
            )
            .bind(task.fund_id)
            .bind(&task.title)
            .bind(task.stage_id)
            .bind(&task.stage_name)
            .bind(task.investor_id)
            .bind(&task.investor_name)
            .bind(&task.priority)
            .bind(task.due_date)
            .bind(task.created_by)
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }
        tx.commit().await?;
        Ok(inserted)
    }

    /// Update a task. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
        investor_name: Option<&str>,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($2, title),
                stage_id = COALESCE($3, stage_id),
                stage_name = COALESCE($4, stage_name),
                investor_id = COALESCE($5, investor_id),
                investor_name = COALESCE($6, investor_name),
                priority = COALESCE($7, priority),
                due_date = COALESCE($8, due_date),
                status = COALESCE($9, status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.stage_id)
            .bind(&input.stage_name)
            .bind(input.investor_id)
            .bind(investor_name.or(input.investor_name.as_deref()))
            .bind(&input.priority)
            .bind(input.due_date)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Transition a task's status (open ↔ completed).
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a task by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
