use axum::{
    http::Method,
    response::Response,
    routing::{delete, get, patch},
    Router,
};

use super::handlers;
use super::server::AppState;

async fn tasks_not_allowed(method: Method) -> Response {
    handlers::method_not_allowed(&method, "GET, POST")
}

async fn task_not_allowed(method: Method) -> Response {
    handlers::method_not_allowed(&method, "PATCH, DELETE")
}

async fn todos_not_allowed(method: Method) -> Response {
    handlers::method_not_allowed(&method, "GET, POST")
}

async fn todo_not_allowed(method: Method) -> Response {
    handlers::method_not_allowed(&method, "DELETE")
}

/// Create API router with all endpoints
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health))
        // Task routes
        .route(
            "/tasks",
            get(handlers::list_tasks)
                .post(handlers::generate_tasks)
                .fallback(tasks_not_allowed),
        )
        .route(
            "/tasks/:id",
            patch(handlers::update_task)
                .delete(handlers::delete_task)
                .fallback(task_not_allowed),
        )
        // Legacy todo routes
        .route(
            "/todos",
            get(handlers::list_todos)
                .post(handlers::create_todo)
                .fallback(todos_not_allowed),
        )
        .route(
            "/todos/:id",
            delete(handlers::delete_todo).fallback(todo_not_allowed),
        )
}
