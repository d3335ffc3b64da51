//! Sketchfab download API client

use crate::api::{endpoints, types::DownloadResponse};
use crate::error::{CliError, Result};
use reqwest::{header::AUTHORIZATION, Client, StatusCode};
use tracing::{debug, instrument};

/// Client for resolving Sketchfab models to download URLs
#[derive(Clone)]
pub struct SketchfabClient {
    client: Client,
    base_url: String,
    token: String,
}

impl SketchfabClient {
    /// Create a client sharing an existing HTTP connection pool
    pub fn new(client: Client, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Resolve a model uid to a temporary download URL
    #[instrument(skip(self), fields(api = %self.base_url))]
    pub async fn download_url(&self, uid: &str) -> Result<String> {
        let url = endpoints::model_download_url(&self.base_url, uid);

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, format!("Token {}", self.token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = match status {
                StatusCode::UNAUTHORIZED => {
                    "API token was rejected. Check sketchfab.api_token or MODELSYNC_SKETCHFAB_TOKEN"
                        .to_string()
                },
                StatusCode::FORBIDDEN => format!("model '{uid}' is not downloadable with this account"),
                StatusCode::NOT_FOUND => format!("model '{uid}' does not exist"),
                other => format!("download lookup for model '{uid}' returned HTTP {other}"),
            };
            return Err(CliError::api_status(status, message));
        }

        let body: DownloadResponse = response.json().await?;
        let link = body
            .preferred()
            .ok_or_else(|| CliError::api(format!("no glTF download offered for model '{uid}'")))?;

        debug!(uid, size = ?link.size, expires = ?link.expires, "Resolved Sketchfab download");
        Ok(link.url.clone())
    }
}

/// Extract a model uid from a Sketchfab model URL or a bare uid
///
/// `https://sketchfab.com/3d-models/konark-sun-temple-0a1b2c` → `0a1b2c`.
/// The uid is the last `-`-separated token of the last path segment.
pub fn parse_sketchfab_uid(input: &str) -> Option<String> {
    let without_query = input.trim().split(['?', '#']).next().unwrap_or_default();
    let segment = without_query.trim_end_matches('/').rsplit('/').next()?;
    let uid = segment.rsplit('-').next()?;

    if !uid.is_empty() && uid.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(uid.to_string())
    } else {
        None
    }
}
