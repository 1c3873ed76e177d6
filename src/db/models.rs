use crate::priority::Rank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted task derived from a goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub goal: String,
    pub task: String,
    pub priority: String,
    pub details: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// A legacy free-text todo item, independent of tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: i64,
    pub task: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// A task candidate as produced by the language model, before validation.
/// `priority` is whatever text the model returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedTask {
    pub task: String,
    pub priority: String,
    pub details: String,
}

/// A validated task ready for insertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTask {
    pub task: String,
    pub priority: Rank,
    pub details: String,
}

/// A generated candidate that failed boundary validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedTask {
    pub candidate: GeneratedTask,
    pub reason: String,
}

/// Result of validating a batch of generated candidates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PreparedBatch {
    pub accepted: Vec<NewTask>,
    pub rejected: Vec<RejectedTask>,
}

impl PreparedBatch {
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }
}
