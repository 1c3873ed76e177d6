//! SQL query constants and fragments
//!
//! Column lists and base SELECT statements shared by the task and todo stores,
//! so every read returns rows in the same shape `FromRow` expects.

// ============================================================================
// Task Queries
// ============================================================================

/// Columns returned for a task row. `priority_rank` is a storage detail
/// used only for ordering and is not part of the row model.
pub const TASK_COLUMNS: &str = "id, goal, task, priority, details, completed, created_at";

/// Base SELECT query for tasks
pub const SELECT_TASKS: &str = const_format::formatcp!("SELECT {} FROM tasks", TASK_COLUMNS);

/// Listing order: rank first (1 = High), newest first within a rank
pub const TASK_LIST_ORDER: &str = "ORDER BY priority_rank ASC, created_at DESC, id DESC";

/// Full listing query
pub const LIST_TASKS: &str = const_format::formatcp!("{} {}", SELECT_TASKS, TASK_LIST_ORDER);

pub const INSERT_TASK: &str = const_format::formatcp!(
    "INSERT INTO tasks (goal, task, priority, priority_rank, details, completed, created_at) \
     VALUES (?, ?, ?, ?, ?, 0, ?) RETURNING {}",
    TASK_COLUMNS
);

pub const UPDATE_TASK_COMPLETED: &str = const_format::formatcp!(
    "UPDATE tasks SET completed = ? WHERE id = ? RETURNING {}",
    TASK_COLUMNS
);

pub const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?";

// ============================================================================
// Todo Queries
// ============================================================================

pub const TODO_COLUMNS: &str = "id, task, completed, created_at";

pub const LIST_TODOS: &str = const_format::formatcp!(
    "SELECT {} FROM todos ORDER BY created_at DESC, id DESC",
    TODO_COLUMNS
);

pub const INSERT_TODO: &str = const_format::formatcp!(
    "INSERT INTO todos (task, completed, created_at) VALUES (?, 0, ?) RETURNING {}",
    TODO_COLUMNS
);

pub const DELETE_TODO: &str = "DELETE FROM todos WHERE id = ?";
