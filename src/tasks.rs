use crate::db::models::{GeneratedTask, NewTask, PreparedBatch, RejectedTask, Task};
use crate::db::ensure_tasks_table;
use crate::error::Result;
use crate::priority::Rank;
use crate::sql_constants::{DELETE_TASK, INSERT_TASK, LIST_TASKS, UPDATE_TASK_COMPLETED};
use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool};

/// Persistence gateway for the `tasks` table
pub struct TaskStore<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TaskStore<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Idempotently create the tasks table
    pub async fn ensure_schema(&self) -> Result<()> {
        ensure_tasks_table(self.pool).await
    }

    /// All tasks, High before Medium before Low, newest first within a rank
    #[tracing::instrument(skip(self))]
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(LIST_TASKS)
            .fetch_all(self.pool)
            .await?;

        Ok(tasks)
    }

    /// Insert a single task. `priority` must name one of the three ranks.
    #[tracing::instrument(skip(self, details))]
    pub async fn insert_task(
        &self,
        goal: &str,
        task: &str,
        priority: &str,
        details: &str,
    ) -> Result<Task> {
        let new_task = NewTask {
            task: task.to_string(),
            priority: priority.parse::<Rank>()?,
            details: details.to_string(),
        };

        insert_row(self.pool, goal, &new_task, Utc::now()).await
    }

    /// Insert every task generated for one goal as a single unit.
    ///
    /// Either all rows are committed or none are.
    #[tracing::instrument(skip(self, tasks), fields(count = tasks.len()))]
    pub async fn insert_batch(&self, goal: &str, tasks: &[NewTask]) -> Result<Vec<Task>> {
        if tasks.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.pool.begin().await?;
        let mut saved = Vec::with_capacity(tasks.len());

        for new_task in tasks {
            let row = insert_row(&mut *tx, goal, new_task, Utc::now()).await?;
            saved.push(row);
        }

        tx.commit().await?;

        tracing::info!(goal, count = saved.len(), "Saved generated tasks");
        Ok(saved)
    }

    /// Set the completed flag of one task. Returns `None` if no row matched.
    #[tracing::instrument(skip(self))]
    pub async fn set_completed(&self, id: i64, completed: bool) -> Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(UPDATE_TASK_COMPLETED)
            .bind(completed)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        if task.is_none() {
            tracing::debug!(id, "No task matched status update");
        }

        Ok(task)
    }

    /// Delete a task by id. Succeeds whether or not a row matched.
    #[tracing::instrument(skip(self))]
    pub async fn delete_task(&self, id: i64) -> Result<()> {
        let result = sqlx::query(DELETE_TASK)
            .bind(id)
            .execute(self.pool)
            .await?;

        tracing::debug!(id, rows_affected = result.rows_affected(), "Task delete");
        Ok(())
    }
}

async fn insert_row<'c, E>(
    executor: E,
    goal: &str,
    new_task: &NewTask,
    created_at: DateTime<Utc>,
) -> Result<Task>
where
    E: sqlx::Executor<'c, Database = Sqlite>,
{
    let task = sqlx::query_as::<_, Task>(INSERT_TASK)
        .bind(goal.to_string())
        .bind(new_task.task.clone())
        .bind(new_task.priority.as_str())
        .bind(new_task.priority.value())
        .bind(new_task.details.clone())
        .bind(created_at)
        .fetch_one(executor)
        .await?;

    Ok(task)
}

/// Validate generated candidates before they reach storage.
///
/// Candidates with an unknown priority or an empty description are set aside
/// with a reason instead of failing the whole batch.
pub fn prepare_batch(generated: Vec<GeneratedTask>) -> PreparedBatch {
    let mut batch = PreparedBatch::default();

    for candidate in generated {
        if candidate.task.trim().is_empty() {
            batch.rejected.push(RejectedTask {
                candidate,
                reason: "empty task description".to_string(),
            });
            continue;
        }

        match candidate.priority.parse::<Rank>() {
            Ok(priority) => batch.accepted.push(NewTask {
                task: candidate.task,
                priority,
                details: candidate.details,
            }),
            Err(e) => batch.rejected.push(RejectedTask {
                reason: e.to_string(),
                candidate,
            }),
        }
    }

    if !batch.rejected.is_empty() {
        tracing::warn!(
            rejected = batch.rejected.len(),
            accepted = batch.accepted.len(),
            "Discarded invalid generated tasks"
        );
    }

    batch
}
