//! modelsync CLI - Main entry point

use clap::Parser;
use modelsync_cli::commands::fetch::FetchArgs;
use modelsync_cli::{CliError, Cli, Commands};
use modelsync_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Warnings only by default, debug with --verbose; LOG_* variables take precedence
    let log_config = LogConfig::builder()
        .level(if cli.verbose { LogLevel::Debug } else { LogLevel::Warn })
        .output(LogOutput::Console)
        .log_file_prefix("modelsync")
        .build();
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // The CLI works without logging
    let _ = init_logging(&log_config);

    if let Err(e) = execute_command(cli).await {
        match &e {
            // The summary has already been printed
            CliError::BatchIncomplete { .. } => eprintln!("{e}"),
            _ => {
                error!(error = %e, "Command failed");
                eprintln!("Error: {e}");
            },
        }
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: Cli) -> modelsync_cli::Result<()> {
    match cli.command {
        Commands::Fetch {
            base_dir,
            report,
            concurrency,
            retries,
        } => {
            modelsync_cli::commands::fetch::run(FetchArgs {
                manifest: cli.manifest,
                base_dir,
                report,
                concurrency: usize::from(concurrency),
                retries,
                quiet: cli.quiet,
            })
            .await
        },

        Commands::Generate { base_dir, size, only } => {
            modelsync_cli::commands::generate::run(cli.manifest, base_dir, size, only).await
        },

        Commands::Status { base_dir } => {
            modelsync_cli::commands::status::run(cli.manifest, base_dir).await
        },
    }
}
