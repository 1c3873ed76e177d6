pub mod models;

use crate::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Build the process-wide connection pool from a `sqlite://` URL.
///
/// The pool is created once at startup and handed to the stores; callers own
/// its lifetime and should `close()` it on shutdown.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_millis(5000));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::debug!(database_url, "Connection pool created");

    Ok(pool)
}

/// Create the `tasks` table if it does not exist yet
pub async fn ensure_tasks_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            goal TEXT NOT NULL,
            task TEXT NOT NULL,
            priority TEXT NOT NULL,
            priority_rank INTEGER NOT NULL,
            details TEXT NOT NULL DEFAULT '',
            completed BOOLEAN NOT NULL DEFAULT 0,
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (priority IN ('High', 'Medium', 'Low')),
            CHECK (priority_rank IN (1, 2, 3))
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_tasks_rank_created ON tasks(priority_rank, created_at)
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the `todos` table if it does not exist yet
pub async fn ensure_todos_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS todos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            task TEXT NOT NULL,
            completed BOOLEAN NOT NULL DEFAULT 0,
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create every table the application uses
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    ensure_tasks_table(pool).await?;
    ensure_todos_table(pool).await?;
    Ok(())
}
