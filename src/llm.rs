use crate::config::env_value;
use crate::db::models::GeneratedTask;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Number of tasks requested per goal
pub const TASKS_PER_GOAL: usize = 5;

const SYSTEM_PROMPT: &str = r#"You are an expert in efficient task management.
Based on the user's goal, produce a list of concrete, actionable tasks.
Respond with JSON in exactly this shape:

{
  "tasks": [
    {
      "task": "Task name",
      "priority": "One of High, Medium, Low",
      "details": "Description of the task"
    }
  ]
}"#;

/// LLM configuration resolved from env vars
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub endpoint: String,
    /// Checked on first use, not at startup
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl LlmConfig {
    /// Resolve from `OPENAI_API_KEY`, `OPENAI_BASE_URL`, `OPENAI_MODEL`,
    /// `GOAL_TASKS_TEMPERATURE` and `GOAL_TASKS_LLM_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let temperature = match env_value("GOAL_TASKS_TEMPERATURE") {
            Some(raw) => raw.parse::<f32>().map_err(|_| {
                AppError::InvalidInput(format!("Invalid GOAL_TASKS_TEMPERATURE '{}'", raw))
            })?,
            None => defaults.temperature,
        };

        let timeout = match env_value("GOAL_TASKS_LLM_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.parse::<u64>().map_err(|_| {
                AppError::InvalidInput(format!("Invalid GOAL_TASKS_LLM_TIMEOUT_SECS '{}'", raw))
            })?),
            None => defaults.timeout,
        };

        Ok(Self {
            endpoint: env_value("OPENAI_BASE_URL")
                .map(|base| chat_endpoint(&base))
                .unwrap_or(defaults.endpoint),
            api_key: env_value("OPENAI_API_KEY"),
            model: env_value("OPENAI_MODEL").unwrap_or(defaults.model),
            temperature,
            timeout,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Chat-completions URL for an API base such as `https://api.openai.com/v1`.
/// A base that already names the endpoint is kept as-is.
pub fn chat_endpoint(base: &str) -> String {
    let base = base.trim().trim_end_matches('/');
    if base.ends_with(CHAT_COMPLETIONS_PATH) {
        base.to_string()
    } else {
        format!("{}{}", base, CHAT_COMPLETIONS_PATH)
    }
}

/// A chat message for the OpenAI-compatible API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// OpenAI-compatible chat completion request
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

/// OpenAI-compatible chat completion response
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Turns a goal into candidate tasks
#[async_trait]
pub trait TaskGenerator: Send + Sync {
    /// Candidate tasks for `goal`. A reply that cannot be understood yields an
    /// empty list; only transport and API failures are errors.
    async fn generate_tasks(&self, goal: &str) -> Result<Vec<GeneratedTask>>;
}

/// OpenAI-compatible LLM client
pub struct LlmClient {
    config: LlmConfig,
    client: reqwest::Client,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, client })
    }

    /// Send the messages and return the first choice's content, if any
    pub async fn chat_with_messages(&self, messages: &[ChatMessage]) -> Result<Option<String>> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(AppError::LlmNotConfigured)?;

        let request = ChatRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
        };

        tracing::debug!(
            endpoint = %self.config.endpoint,
            model = %self.config.model,
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "(no body)".to_string());
            return Err(AppError::LlmApiError { status, body });
        }

        let chat_response: ChatResponse = response.json().await?;

        Ok(chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content))
    }
}

#[async_trait]
impl TaskGenerator for LlmClient {
    #[tracing::instrument(skip(self))]
    async fn generate_tasks(&self, goal: &str) -> Result<Vec<GeneratedTask>> {
        let messages = build_messages(goal);

        match self.chat_with_messages(&messages).await? {
            Some(content) if !content.trim().is_empty() => Ok(parse_generated_tasks(&content)),
            _ => {
                tracing::warn!("LLM returned no content");
                Ok(Vec::new())
            },
        }
    }
}

/// The system and user messages sent for a goal. The goal is embedded verbatim.
pub fn build_messages(goal: &str) -> Vec<ChatMessage> {
    let user_prompt = format!(
        r#"Generate a list of exactly {} concrete tasks for the following goal: {}

Write "task" and "details" in the same language as the goal, but keep "priority" as one of the English words High, Medium or Low.
Always respond with JSON in this shape:
{{
  "tasks": [
    {{
      "task": "Task name",
      "priority": "High, Medium or Low",
      "details": "Concrete steps or points to watch"
    }}
  ]
}}"#,
        TASKS_PER_GOAL, goal
    );

    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(user_prompt)]
}

/// Parse a model reply into candidate tasks.
///
/// Malformed JSON, or a `tasks` field that is not an array, yields an empty
/// list. Priorities are passed through unchecked.
pub fn parse_generated_tasks(content: &str) -> Vec<GeneratedTask> {
    let parsed: Value = match serde_json::from_str(strip_code_fence(content)) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, raw = content, "Failed to parse LLM response");
            return Vec::new();
        },
    };

    let Some(tasks) = parsed.get("tasks").and_then(Value::as_array) else {
        tracing::warn!(raw = content, "Invalid LLM response format: missing tasks array");
        return Vec::new();
    };

    tasks
        .iter()
        .map(|item| GeneratedTask {
            task: coerce_text(item.get("task")),
            priority: coerce_text(item.get("priority")),
            details: coerce_text(item.get("details")),
        })
        .collect()
}

/// Models sometimes wrap JSON in a ```json fence
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };

    // Drop the info string (e.g. "json") on the opening line
    match body.find('\n') {
        Some(newline) => body[newline + 1..].trim(),
        None => body.trim(),
    }
}

fn coerce_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
