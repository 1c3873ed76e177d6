use crate::db::ensure_todos_table;
use crate::db::models::Todo;
use crate::error::{AppError, Result};
use crate::sql_constants::{DELETE_TODO, INSERT_TODO, LIST_TODOS};
use chrono::Utc;
use sqlx::SqlitePool;

/// Persistence gateway for the legacy `todos` table
pub struct TodoStore<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TodoStore<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn ensure_schema(&self) -> Result<()> {
        ensure_todos_table(self.pool).await
    }

    /// All todos, newest first
    pub async fn list_todos(&self) -> Result<Vec<Todo>> {
        let todos = sqlx::query_as::<_, Todo>(LIST_TODOS)
            .fetch_all(self.pool)
            .await?;

        Ok(todos)
    }

    pub async fn insert_todo(&self, task: &str) -> Result<Todo> {
        if task.trim().is_empty() {
            return Err(AppError::InvalidInput("Task is required".to_string()));
        }

        let todo = sqlx::query_as::<_, Todo>(INSERT_TODO)
            .bind(task)
            .bind(Utc::now())
            .fetch_one(self.pool)
            .await?;

        Ok(todo)
    }

    /// Delete a todo by id. Succeeds whether or not a row matched.
    pub async fn delete_todo(&self, id: i64) -> Result<()> {
        sqlx::query(DELETE_TODO).bind(id).execute(self.pool).await?;
        Ok(())
    }
}
