//! Common utilities for integration tests
//!
//! Builds the real router over a temp-dir SQLite database, with a stub
//! generator standing in for the language model.

#![allow(dead_code)]

pub mod chat_mock;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use goal_tasks::db::models::GeneratedTask;
use goal_tasks::db::{create_pool, run_migrations};
use goal_tasks::error::{AppError, Result};
use goal_tasks::llm::{parse_generated_tasks, TaskGenerator};
use goal_tasks::web::{create_router, AppState};
use serde_json::Value;
use sqlx::SqlitePool;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tower::ServiceExt;

/// What the stub generator does when asked for tasks
pub enum StubReply {
    /// Return these candidates as-is
    Tasks(Vec<GeneratedTask>),
    /// Run this raw model text through the real reply parser
    Raw(String),
    /// Five High/Medium/Low tasks whose names mention the goal
    EchoGoal,
    /// Fail like an unreachable API
    Fail,
}

pub struct StubGenerator {
    reply: StubReply,
    goals: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn new(reply: StubReply) -> Self {
        Self {
            reply,
            goals: Mutex::new(Vec::new()),
        }
    }

    pub fn goals(&self) -> Vec<String> {
        self.goals.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskGenerator for StubGenerator {
    async fn generate_tasks(&self, goal: &str) -> Result<Vec<GeneratedTask>> {
        self.goals.lock().unwrap().push(goal.to_string());

        match &self.reply {
            StubReply::Tasks(tasks) => Ok(tasks.clone()),
            StubReply::Raw(text) => Ok(parse_generated_tasks(text)),
            StubReply::EchoGoal => Ok(["High", "Medium", "Low", "High", "Low"]
                .iter()
                .enumerate()
                .map(|(i, priority)| generated(&format!("{} step {}", goal, i + 1), priority))
                .collect()),
            StubReply::Fail => Err(AppError::LlmApiError {
                status: 503,
                body: "service unavailable".to_string(),
            }),
        }
    }
}

pub fn generated(task: &str, priority: &str) -> GeneratedTask {
    GeneratedTask {
        task: task.to_string(),
        priority: priority.to_string(),
        details: format!("How to {}", task),
    }
}

/// Five well-formed candidates
pub fn five_tasks() -> Vec<GeneratedTask> {
    vec![
        generated("Book movers", "High"),
        generated("Notify landlord", "High"),
        generated("Pack kitchen", "Medium"),
        generated("Change address", "Medium"),
        generated("Sell old furniture", "Low"),
    ]
}

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub generator: Arc<StubGenerator>,
    _temp_dir: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub text: String,
    pub body: Value,
}

impl TestApp {
    pub async fn new(reply: StubReply) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let url = format!("sqlite://{}", temp_dir.path().join("api.db").display());
        let pool = create_pool(&url).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let generator = Arc::new(StubGenerator::new(reply));
        let state = AppState::new(pool.clone(), generator.clone());

        Self {
            router: create_router(state),
            pool,
            generator,
            _temp_dir: temp_dir,
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8_lossy(&bytes).to_string();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            text,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }

    pub async fn task_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM tasks")
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}
