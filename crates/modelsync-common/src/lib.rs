//! modelsync common library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared utilities for the modelsync workspace members:
//!
//! - **Error Handling**: the shared [`ModelsyncError`] and result alias
//! - **Checksums**: streaming SHA-256 for downloaded and generated assets
//! - **Logging**: `tracing` subscriber setup driven by environment variables
//!
//! # Example
//!
//! ```no_run
//! use modelsync_common::checksum::compute_file_checksum;
//!
//! fn print_digest(path: &str) -> modelsync_common::Result<()> {
//!     let digest = compute_file_checksum(path)?;
//!     println!("{path}: {digest}");
//!     Ok(())
//! }
//! ```

pub mod checksum;
pub mod error;
pub mod logging;

pub use error::{ModelsyncError, Result};
