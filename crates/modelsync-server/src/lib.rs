//! modelsync Server Library
//!
//! Development HTTP server for a directory of 3D model assets.
//!
//! # Overview
//!
//! - **Static files**: every file under the configured root, served with GET
//! - **CORS**: `Access-Control-Allow-Origin` on every response (any origin
//!   by default) so browser viewers on other ports can load models
//! - **No caching**: `Cache-Control: no-store, no-cache, must-revalidate`
//! - **Health**: `GET /health`
//!
//! # Example
//!
//! ```no_run
//! use modelsync_server::{config::Config, router};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
//!     axum::serve(listener, router(&config)).await?;
//!     Ok(())
//! }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod config;
pub mod middleware;

use axum::{response::IntoResponse, routing::get, Json, Router};
use config::Config;
use serde_json::json;
use tower_http::services::ServeDir;

/// Build the application router with all routes and middleware
pub fn router(config: &Config) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .fallback_service(ServeDir::new(&config.server.root))
        // Apply layers from innermost to outermost
        .layer(axum::middleware::from_fn(middleware::pattern_content_type))
        .layer(middleware::no_cache_layer())
        .layer(middleware::allow_methods_layer())
        .layer(middleware::cors_layer(&config.cors))
        .layer(middleware::tracing_layer())
}

/// Health check handler
async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}
