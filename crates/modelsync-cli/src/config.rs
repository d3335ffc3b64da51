//! Runtime configuration for the modelsync CLI
//!
//! Holds settings that are not part of an asset manifest: HTTP timeout and
//! Sketchfab API access. Values come from defaults, then the environment,
//! then command-line flags.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ============================================================================
// CLI Configuration Constants
// ============================================================================

/// Default timeout for a single HTTP request, in seconds.
/// Large assets need a generous value.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 300;

/// Default Sketchfab API base URL.
pub const DEFAULT_SKETCHFAB_API_URL: &str = "https://api.sketchfab.com";

/// Placeholder token shipped in manifest templates.
pub const TEMPLATE_SKETCHFAB_TOKEN: &str = "YOUR_SKETCHFAB_API_TOKEN";

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Per-request HTTP timeout in seconds
    pub http_timeout_secs: u64,

    /// Sketchfab API base URL
    pub sketchfab_api_url: String,

    /// Sketchfab API token (overrides the manifest's token when set)
    #[serde(skip_serializing)]
    pub sketchfab_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            sketchfab_api_url: DEFAULT_SKETCHFAB_API_URL.to_string(),
            sketchfab_token: None,
        }
    }
}

impl Config {
    /// Load config from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(secs) = std::env::var("MODELSYNC_HTTP_TIMEOUT_SECS") {
            config.http_timeout_secs = secs.parse().map_err(|_| {
                CliError::config(format!(
                    "MODELSYNC_HTTP_TIMEOUT_SECS must be a whole number of seconds, got '{secs}'"
                ))
            })?;
        }

        if let Ok(url) = std::env::var("MODELSYNC_SKETCHFAB_API_URL") {
            config.sketchfab_api_url = url;
        }

        if let Ok(token) = std::env::var("MODELSYNC_SKETCHFAB_TOKEN") {
            if !token.trim().is_empty() {
                config.sketchfab_token = Some(token);
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.http_timeout_secs == 0 {
            return Err(CliError::config("HTTP timeout must be greater than 0"));
        }
        url::Url::parse(&self.sketchfab_api_url).map_err(|e| {
            CliError::config(format!(
                "Sketchfab API URL '{}' is not a valid URL: {e}",
                self.sketchfab_api_url
            ))
        })?;
        Ok(())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

/// Returns the token if it is usable, i.e. non-empty and not the template value
pub fn usable_token(token: Option<&str>) -> Option<&str> {
    token
        .map(str::trim)
        .filter(|t| !t.is_empty() && *t != TEMPLATE_SKETCHFAB_TOKEN)
}
