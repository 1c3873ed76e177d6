use clap::Parser;
use goal_tasks::cli::{Cli, Commands};
use goal_tasks::config::{AppConfig, ConfigOverrides};
use goal_tasks::db::{create_pool, run_migrations};
use goal_tasks::error::Result;
use goal_tasks::llm::{LlmClient, TaskGenerator};
use goal_tasks::logging::{ApplicationMode, LoggingConfig};
use goal_tasks::tasks::{prepare_batch, TaskStore};
use goal_tasks::web::{AppState, WebServer};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging system
    let mut log_config = LoggingConfig::from_args(cli.quiet, cli.verbose > 0, cli.json);
    if matches!(cli.command, Commands::Serve { .. }) {
        let server = LoggingConfig::for_mode(ApplicationMode::Server);
        log_config.stderr = server.stderr;
        if cli.verbose == 0 && !cli.quiet {
            log_config.show_timestamps = server.show_timestamps;
        }
    }
    log_config.file_output = cli.log_file.clone();

    if let Err(e) = goal_tasks::logging::init_logging(log_config) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli).await {
        let error_response = e.to_error_response();
        match serde_json::to_string_pretty(&error_response) {
            Ok(json) => eprintln!("{}", json),
            Err(_) => eprintln!("{}", e),
        }
        // Usage errors exit 2, everything else 1
        std::process::exit(if e.is_client_error() { 2 } else { 1 });
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve {
            host,
            port,
            database_url,
        } => {
            let config = AppConfig::resolve(&ConfigOverrides {
                database_url,
                host,
                port,
            })?;

            let pool = create_pool(&config.database_url).await?;
            if let Err(e) = run_migrations(&pool).await {
                tracing::error!(error = %e, "Error creating tables");
            }

            if !config.llm.is_configured() {
                tracing::warn!("OPENAI_API_KEY is not set; task generation will fail until it is");
            }
            let generator: Arc<dyn TaskGenerator> = Arc::new(LlmClient::new(config.llm)?);

            WebServer::new(config.server, AppState::new(pool, generator))
                .run()
                .await?;
        },

        Commands::InitDb { database_url } => {
            let config = AppConfig::resolve(&ConfigOverrides {
                database_url,
                ..Default::default()
            })?;

            let pool = create_pool(&config.database_url).await?;
            run_migrations(&pool).await?;
            pool.close().await;

            tracing::info!("Database ready at {}", config.database_url);
        },

        Commands::Generate {
            goal,
            save,
            database_url,
        } => {
            if goal.trim().is_empty() {
                return Err(goal_tasks::error::AppError::InvalidInput(
                    "Please enter a goal".to_string(),
                ));
            }

            let config = AppConfig::resolve(&ConfigOverrides {
                database_url,
                ..Default::default()
            })?;

            let client = LlmClient::new(config.llm)?;
            let batch = prepare_batch(client.generate_tasks(&goal).await?);

            if save {
                let pool = create_pool(&config.database_url).await?;
                run_migrations(&pool).await?;
                let saved = TaskStore::new(&pool)
                    .insert_batch(&goal, &batch.accepted)
                    .await?;
                pool.close().await;

                println!("{}", serde_json::to_string_pretty(&saved)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&batch)?);
            }
        },
    }

    Ok(())
}
