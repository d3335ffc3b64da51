//! Item-level fetch errors
//!
//! These never leave the fetcher: each one is classified into a
//! [`FailureKind`] and recorded as that item's outcome.

use super::outcome::FailureKind;
use crate::error::CliError;
use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    /// The item cannot be fetched with the current settings
    #[error("{0}")]
    Config(String),

    /// The Sketchfab download URL could not be obtained
    #[error("could not resolve download: {message}")]
    Resolve {
        status: Option<StatusCode>,
        message: String,
    },

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("server returned HTTP {0}")]
    Status(StatusCode),

    #[error("connection dropped mid-transfer: {0}")]
    Body(#[source] reqwest::Error),

    #[error("checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::Config(_) => FailureKind::ConfigInvalid,
            FetchError::Resolve { .. }
            | FetchError::Request(_)
            | FetchError::Status(_)
            | FetchError::Body(_)
            | FetchError::ChecksumMismatch { .. } => FailureKind::FetchFailed,
            FetchError::Write { .. } => FailureKind::WriteFailed,
        }
    }

    /// Transport errors and server-side statuses that may clear up on their own
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Request(e) => !e.is_decode() && !e.is_builder(),
            FetchError::Body(_) => true,
            FetchError::Status(status)
            | FetchError::Resolve {
                status: Some(status),
                ..
            } => is_transient(*status),
            _ => false,
        }
    }
}

fn is_transient(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

impl From<CliError> for FetchError {
    /// Sketchfab lookups keep their transport error or HTTP status
    fn from(err: CliError) -> Self {
        let status = match &err {
            CliError::Api { status, .. } => *status,
            _ => None,
        };
        match err {
            CliError::Http(e) => FetchError::Request(e),
            other => FetchError::Resolve {
                status,
                message: other.to_string(),
            },
        }
    }
}
