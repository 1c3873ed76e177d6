use clap::{Parser, Subcommand};
use std::path::PathBuf;

const LONG_ABOUT: &str = r#"
goal-tasks - turn a goal into prioritized, trackable tasks

Type a goal, and a language model breaks it into five concrete tasks
ranked High, Medium or Low. Tasks are stored in SQLite and managed from
a small web page or the JSON API under /api.

Environment:
  DATABASE_URL       SQLite connection string (default sqlite://goal-tasks.db)
  OPENAI_API_KEY     API key for the chat-completion service (required to generate)
  OPENAI_BASE_URL    API base URL, e.g. https://api.openai.com/v1
  OPENAI_MODEL       Model name (default gpt-3.5-turbo)
  GOAL_TASKS_HOST    Bind host for `serve` (default 127.0.0.1)
  GOAL_TASKS_PORT    Bind port for `serve` (default 3000)
  RUST_LOG           Log filter, overrides -v/-q
"#;

#[derive(Parser, Clone)]
#[command(name = "goal-tasks")]
#[command(about = "Generate prioritized tasks from a goal and track them in a web UI")]
#[command(long_about = LONG_ABOUT)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output (-q)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Write logs to this file instead of stdout
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Start the HTTP server (API under /api, UI at /)
    Serve {
        /// Host to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to bind
        #[arg(short, long)]
        port: Option<u16>,

        /// SQLite connection string
        #[arg(long)]
        database_url: Option<String>,
    },

    /// Create the database tables and exit
    InitDb {
        /// SQLite connection string
        #[arg(long)]
        database_url: Option<String>,
    },

    /// Generate tasks for a goal from the command line
    ///
    /// Prints the validated tasks as JSON. With --save they are stored
    /// as one batch, exactly as the web UI would.
    Generate {
        /// The goal to break down
        goal: String,

        /// Persist the generated tasks
        #[arg(long)]
        save: bool,

        /// SQLite connection string
        #[arg(long)]
        database_url: Option<String>,
    },
}
