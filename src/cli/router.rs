//! Command routing and execution

use crate::app::AppConfig;
use crate::cli::args::Commands;
use crate::cli::commands::*;
use crate::config::load_config;
use anyhow::Result;

/// Load configuration and run one command, returning the process exit code
pub async fn execute_command(command: Commands, app: &AppConfig) -> Result<i32> {
    let loaded = load_config(app.config_path.as_deref()).await?;
    match &loaded.source {
        Some(path) => tracing::info!("Using configuration from {}", path.display()),
        None => tracing::info!("Using built-in configuration"),
    }
    let config = loaded.config;

    match command {
        Commands::Analyze { log_file, json } => {
            run_analyze(AnalyzeParams { log_file, json }, &config).await
        }
        Commands::Scan {
            target,
            timeout,
            concurrency,
            require_open,
            json,
        } => {
            run_scan(
                ScanParams {
                    target,
                    timeout,
                    concurrency: concurrency.map(usize::from),
                    require_open,
                    json,
                },
                config,
            )
            .await
        }
        Commands::Validate { interface, timeout } => {
            run_validate(ValidateParams { interface, timeout }, config).await
        }
        Commands::Config => run_config_command(&config, loaded.source.as_deref()),
    }
}
