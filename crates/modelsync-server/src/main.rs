//! modelsync Server - Main entry point

use anyhow::Result;
use clap::Parser;
use modelsync_common::logging::{init_logging, LogConfig};
use modelsync_server::{config::Config, router};
use std::path::PathBuf;
use tokio::signal;
use tracing::info;

/// Serve a model directory over HTTP for local viewing
#[derive(Parser, Debug)]
#[command(name = "modelsync-serve")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind (overrides MODELSYNC_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides MODELSYNC_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory to serve (overrides MODELSYNC_ROOT)
    #[arg(long)]
    root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Initialize logging with configuration from environment
    let log_config = LogConfig::builder()
        .log_file_prefix("modelsync-server")
        .filter_directives("modelsync_server=debug,tower_http=debug")
        .build();
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    init_logging(&log_config)?;

    // Flags take precedence over the environment
    let mut config = Config::from_env()?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(root) = args.root {
        config.server.root = root;
    }
    config.validate()?;

    let app = router(&config);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!(
        root = %config.server.root.display(),
        "Serving models at http://{}",
        listener.local_addr()?
    );

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }
}
