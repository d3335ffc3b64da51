//! Batch asset fetcher
//!
//! Downloads every item of a plan to `<base_dir>/<name>/<filename>`.
//! Each item is independent: whatever happens to one is recorded as its
//! [`Outcome`] and the batch moves on. Results keep input order even when
//! several downloads run at once.

pub mod download;
pub mod error;
pub mod outcome;

pub use download::{download_to, part_path, Downloaded};
pub use error::FetchError;
pub use outcome::{BatchResult, FailureKind, ItemOutcome, Outcome};

use crate::api::SketchfabClient;
use crate::config::{usable_token, Config};
use crate::error::{CliError, Result};
use crate::item::{Item, Source};
use crate::progress::Progress;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Delay before the first retry; later retries wait proportionally longer
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Knobs for a fetch run
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Items downloaded at once
    pub concurrency: usize,
    /// Extra attempts for transient failures
    pub retries: u32,
    pub retry_delay: Duration,
    pub show_progress: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            concurrency: 1,
            retries: 0,
            retry_delay: DEFAULT_RETRY_DELAY,
            show_progress: false,
        }
    }
}

/// Downloads items over a shared HTTP client
pub struct Fetcher {
    client: Client,
    sketchfab: Option<SketchfabClient>,
    options: FetchOptions,
    progress: Progress,
}

impl Fetcher {
    /// Build a fetcher from runtime config; the token comes from the
    /// environment first, then the manifest.
    pub fn new(config: &Config, manifest_token: Option<&str>, options: FetchOptions) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.http_timeout())
            .user_agent(concat!("modelsync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CliError::config(format!("failed to build HTTP client: {e}")))?;

        let token = usable_token(config.sketchfab_token.as_deref()).or(usable_token(manifest_token));
        let sketchfab = token
            .map(|token| SketchfabClient::new(client.clone(), config.sketchfab_api_url.clone(), token));

        Ok(Self::with_client(client, sketchfab, options))
    }

    pub fn with_client(client: Client, sketchfab: Option<SketchfabClient>, options: FetchOptions) -> Self {
        let progress = Progress::new(options.show_progress);
        Self {
            client,
            sketchfab,
            options,
            progress,
        }
    }

    /// Fetch every item, returning exactly one outcome per item in order
    pub async fn fetch_all(&self, items: &[Item]) -> BatchResult {
        let concurrency = self.options.concurrency.max(1);
        info!(items = items.len(), concurrency, "Fetching assets");

        stream::iter(items)
            .map(|item| async move {
                ItemOutcome {
                    name: item.name.clone(),
                    outcome: self.fetch_one(item).await,
                }
            })
            .buffered(concurrency)
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .collect()
    }

    /// Fetch a single item; errors become a failure outcome
    #[instrument(skip(self, item), fields(asset = %item.name))]
    pub async fn fetch_one(&self, item: &Item) -> Outcome {
        match self.try_fetch(item).await {
            Ok(downloaded) => {
                info!(bytes = downloaded.bytes, path = %item.target_path.display(), "Fetched");
                Outcome::Success {
                    path: item.target_path.clone(),
                    bytes: downloaded.bytes,
                    sha256: downloaded.sha256,
                }
            },
            Err(e) => {
                warn!(kind = %e.kind(), error = %e, "Fetch failed");
                Outcome::failure(e.kind(), e.to_string())
            },
        }
    }

    async fn try_fetch(&self, item: &Item) -> std::result::Result<Downloaded, FetchError> {
        tokio::fs::create_dir_all(item.directory())
            .await
            .map_err(|source| FetchError::Write {
                path: item.directory().to_path_buf(),
                source,
            })?;

        let mut attempt = 0;
        loop {
            match self.attempt(item).await {
                Err(e) if e.is_retryable() && attempt < self.options.retries => {
                    attempt += 1;
                    let delay = self.options.retry_delay * attempt;
                    warn!(attempt, retries = self.options.retries, error = %e, "Retrying in {:?}", delay);
                    tokio::time::sleep(delay).await;
                },
                other => return other,
            }
        }
    }

    /// Resolve and download once. Each attempt asks for a fresh Sketchfab link.
    async fn attempt(&self, item: &Item) -> std::result::Result<Downloaded, FetchError> {
        let url = self.resolve(&item.source).await?;
        download_to(
            &self.client,
            &url,
            &item.target_path,
            item.expected_sha256.as_deref(),
            &self.progress,
            &item.name,
        )
        .await
    }

    async fn resolve(&self, source: &Source) -> std::result::Result<String, FetchError> {
        match source {
            Source::Direct(url) => Ok(url.to_string()),
            Source::Sketchfab { uid } => {
                let client = self.sketchfab.as_ref().ok_or_else(|| {
                    FetchError::Config(
                        "no usable Sketchfab API token; set sketchfab.api_token in the manifest or MODELSYNC_SKETCHFAB_TOKEN"
                            .to_string(),
                    )
                })?;
                Ok(client.download_url(uid).await?)
            },
        }
    }
}
