//! Runtime configuration
//!
//! Values are resolved with the same precedence everywhere:
//! explicit CLI flag > environment variable > built-in default.
//! Empty environment variables count as unset.

use crate::error::{AppError, Result};
use crate::llm::LlmConfig;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://goal-tasks.db";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

/// Read an environment variable, treating empty values as absent
pub fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Resolve a setting: explicit value > env var > default
pub fn resolve_setting(explicit: Option<&str>, env_var: &str, default: &str) -> String {
    if let Some(value) = explicit {
        if !value.is_empty() {
            return value.to_string();
        }
    }

    env_value(env_var).unwrap_or_else(|| default.to_string())
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub server: ServerConfig,
    pub llm: LlmConfig,
}

/// Values supplied on the command line, if any
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub database_url: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl AppConfig {
    pub fn resolve(overrides: &ConfigOverrides) -> Result<Self> {
        let database_url = resolve_setting(
            overrides.database_url.as_deref(),
            "DATABASE_URL",
            DEFAULT_DATABASE_URL,
        );

        let host = resolve_setting(overrides.host.as_deref(), "GOAL_TASKS_HOST", DEFAULT_HOST);

        let port = match overrides.port {
            Some(port) => port,
            None => match env_value("GOAL_TASKS_PORT") {
                Some(raw) => raw.parse::<u16>().map_err(|_| {
                    AppError::InvalidInput(format!("Invalid GOAL_TASKS_PORT '{}'", raw))
                })?,
                None => DEFAULT_PORT,
            },
        };

        Ok(Self {
            database_url,
            server: ServerConfig { host, port },
            llm: LlmConfig::from_env()?,
        })
    }
}
