use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json, Response},
};

use super::models::*;
use super::server::AppState;
use crate::error::AppError;
use crate::tasks::{prepare_batch, TaskStore};
use crate::todos::TodoStore;

/// Number of generated candidates discarded by validation
pub const REJECTED_TASKS_HEADER: &str = "x-rejected-tasks";

fn api_error(status: StatusCode, code: &str, message: &str) -> Response {
    (
        status,
        Json(ApiError {
            error: message.to_string(),
            code: code.to_string(),
        }),
    )
        .into_response()
}

/// Log the underlying cause and answer with a generic 500
fn internal_error(e: &AppError, message: &str) -> Response {
    tracing::error!(error = %e, "{}", message);
    api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_error_code(), message)
}

fn bad_request(message: &str) -> Response {
    api_error(StatusCode::BAD_REQUEST, "INVALID_INPUT", message)
}

fn parse_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, Response> {
    id.map(|Path(id)| id).map_err(|rejection| {
        tracing::debug!("Rejected path parameter: {}", rejection);
        bad_request("Invalid id")
    })
}

/// List all tasks, creating the table first if needed
pub async fn list_tasks(State(state): State<AppState>) -> Response {
    let store = TaskStore::new(&state.db_pool);

    if let Err(e) = store.ensure_schema().await {
        tracing::error!(error = %e, "Error creating tasks table");
    }

    match store.list_tasks().await {
        Ok(tasks) => (StatusCode::OK, Json(tasks)).into_response(),
        Err(e) => internal_error(&e, "Failed to fetch tasks"),
    }
}

/// Generate tasks for a goal and save them as one batch
pub async fn generate_tasks(
    State(state): State<AppState>,
    payload: Result<Json<GenerateTasksRequest>, JsonRejection>,
) -> Response {
    let goal = match payload {
        Ok(Json(GenerateTasksRequest { goal: Some(goal) })) if !goal.trim().is_empty() => goal,
        _ => return bad_request("Please enter a goal"),
    };

    let generated = match state.generator.generate_tasks(&goal).await {
        Ok(generated) => generated,
        Err(e) => return internal_error(&e, "Failed to generate and save tasks"),
    };

    let batch = prepare_batch(generated);
    let store = TaskStore::new(&state.db_pool);

    match store.insert_batch(&goal, &batch.accepted).await {
        Ok(saved) => (
            StatusCode::CREATED,
            [(
                REJECTED_TASKS_HEADER,
                HeaderValue::from(batch.rejected_count()),
            )],
            Json(saved),
        )
            .into_response(),
        Err(e) => internal_error(&e, "Failed to generate and save tasks"),
    }
}

/// Set a task's completed flag
pub async fn update_task(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Response {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let completed = match payload {
        Ok(Json(UpdateTaskRequest {
            completed: Some(completed),
        })) => completed,
        _ => return bad_request("The completed flag is required"),
    };

    // A missing row answers 200 with null
    match TaskStore::new(&state.db_pool)
        .set_completed(id, completed)
        .await
    {
        Ok(task) => (StatusCode::OK, Json(task)).into_response(),
        Err(e) => internal_error(&e, "Failed to update task"),
    }
}

/// Delete a task; succeeds even if it did not exist
pub async fn delete_task(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match TaskStore::new(&state.db_pool).delete_task(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Task deleted".to_string(),
            }),
        )
            .into_response(),
        Err(e) => internal_error(&e, "Failed to delete task"),
    }
}

pub async fn list_todos(State(state): State<AppState>) -> Response {
    let store = TodoStore::new(&state.db_pool);

    if let Err(e) = store.ensure_schema().await {
        tracing::error!(error = %e, "Error creating todos table");
    }

    match store.list_todos().await {
        Ok(todos) => (StatusCode::OK, Json(todos)).into_response(),
        Err(e) => internal_error(&e, "Failed to fetch todos"),
    }
}

pub async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Response {
    let task = match payload {
        Ok(Json(CreateTodoRequest { task: Some(task) })) if !task.trim().is_empty() => task,
        _ => return bad_request("Task is required"),
    };

    match TodoStore::new(&state.db_pool).insert_todo(&task).await {
        Ok(todo) => (StatusCode::CREATED, Json(todo)).into_response(),
        Err(e) => internal_error(&e, "Failed to create todo"),
    }
}

pub async fn delete_todo(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match TodoStore::new(&state.db_pool).delete_todo(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Todo deleted successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => internal_error(&e, "Failed to delete todo"),
    }
}

/// Health check handler
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// 405 with the verbs the route does support
pub fn method_not_allowed(method: &Method, allow: &'static str) -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, HeaderValue::from_static(allow))],
        format!("Method {} Not Allowed", method),
    )
        .into_response()
}

/// 404 Not Found handler
pub async fn not_found() -> Response {
    api_error(StatusCode::NOT_FOUND, "NOT_FOUND", "Not found")
}
