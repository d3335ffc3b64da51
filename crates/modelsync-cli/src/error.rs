//! Error types for the modelsync CLI
//!
//! Command-level errors carry user-facing messages that say what to fix.
//! Per-asset problems never surface here: the fetcher turns them into
//! [`crate::fetcher::Outcome::Failure`] entries instead.

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Command-level error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Manifest file does not exist
    #[error("Manifest not found: '{0}'. Pass --manifest or set MODELSYNC_MANIFEST.")]
    ManifestNotFound(String),

    /// Manifest could not be parsed or is structurally invalid
    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your environment variables or manifest.")]
    Config(String),

    /// Sketchfab API refused or could not serve the request
    #[error("Sketchfab API error: {message}")]
    Api {
        /// HTTP status when the API answered with an error code
        status: Option<StatusCode>,
        message: String,
    },

    /// Some assets in the batch failed; the batch itself completed
    #[error("{failed} of {total} asset(s) failed. See the summary above; re-run to retry them.")]
    BatchIncomplete { failed: usize, total: usize },

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("Network request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// YAML parsing failed
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON parsing failed
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl CliError {
    pub fn invalid_manifest(msg: impl Into<String>) -> Self {
        Self::InvalidManifest(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api {
            status: None,
            message: msg.into(),
        }
    }

    pub fn api_status(status: StatusCode, msg: impl Into<String>) -> Self {
        Self::Api {
            status: Some(status),
            message: msg.into(),
        }
    }
}
