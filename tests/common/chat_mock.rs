//! Local stand-in for an OpenAI-compatible chat-completions server

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// What the mock received on its last request
#[derive(Clone, Default)]
pub struct Captured {
    pub authorization: Arc<Mutex<Option<String>>>,
    pub body: Arc<Mutex<Option<Value>>>,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    reply: Value,
    captured: Captured,
}

async fn chat_completions(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    *state.captured.authorization.lock().unwrap() = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    *state.captured.body.lock().unwrap() = Some(body);

    (state.status, Json(state.reply.clone())).into_response()
}

/// Start the mock on an ephemeral port. Returns the API base
/// (`http://host:port/v1`) and what the mock saw.
pub async fn spawn_chat_mock(status: StatusCode, reply: Value) -> (String, Captured) {
    let captured = Captured::default();
    let state = MockState {
        status,
        reply,
        captured: captured.clone(),
    };

    let app = Router::new()
        .route("/v1/chat/completions", post(chat_completions))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/v1", addr), captured)
}

/// A chat completion whose first choice carries `content`
pub fn completion(content: Value) -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}
