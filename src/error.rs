use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid priority '{0}'. Valid values: High, Medium, Low")]
    InvalidPriority(String),

    #[error("LLM not configured: set OPENAI_API_KEY")]
    LlmNotConfigured,

    #[error("LLM API error (HTTP {status}): {body}")]
    LlmApiError { status: u16, body: String },

    #[error(transparent)]
    OtherError(#[from] anyhow::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl AppError {
    pub fn to_error_code(&self) -> &'static str {
        match self {
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::InvalidPriority(_) => "INVALID_PRIORITY",
            AppError::LlmNotConfigured => "LLM_NOT_CONFIGURED",
            AppError::LlmApiError { .. } | AppError::HttpError(_) => "LLM_API_ERROR",
            _ => "INTERNAL_ERROR",
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            code: self.to_error_code().to_string(),
        }
    }

    /// True for failures caused by the caller's input rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::InvalidInput(_) | AppError::InvalidPriority(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
