//! modelsync CLI Library
//!
//! Keeps a directory of 3D model assets in sync with a manifest.
//!
//! # Overview
//!
//! - **Fetching**: Download every asset listed in the manifest into
//!   `<base_dir>/<name>/<filename>` (`modelsync fetch`)
//! - **Placeholders**: Write simple stand-in GLB models (`modelsync generate`)
//! - **Status**: Show which assets are present on disk (`modelsync status`)
//!
//! Every batch is best-effort: one outcome per asset, in manifest order, and
//! a failing asset never stops the others.

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod item;
pub mod manifest;
pub mod placeholder;
pub mod progress;
pub mod report;

// Re-export commonly used types
pub use error::{CliError, Result};
pub use fetcher::{BatchResult, FailureKind, Fetcher, Outcome};
pub use item::{Item, Source};
pub use manifest::Manifest;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// modelsync - fetch and manage 3D model assets
#[derive(Parser, Debug)]
#[command(name = "modelsync")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Hide progress bars and status chatter
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Asset manifest (YAML or JSON)
    #[arg(
        short,
        long,
        global = true,
        env = "MODELSYNC_MANIFEST",
        default_value = manifest::DEFAULT_MANIFEST_PATH
    )]
    pub manifest: PathBuf,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download every asset in the manifest
    Fetch {
        /// Directory receiving one sub-directory per asset (overrides the manifest)
        #[arg(long, env = "MODELSYNC_BASE_DIR")]
        base_dir: Option<PathBuf>,

        /// Write a JSON report of the run to this path
        #[arg(long)]
        report: Option<PathBuf>,

        /// Number of assets downloaded at once
        #[arg(short = 'j', long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
        concurrency: u16,

        /// Extra attempts for transient network failures
        #[arg(long, default_value_t = 0)]
        retries: u32,
    },

    /// Write placeholder models for manifest assets
    Generate {
        /// Directory receiving one sub-directory per asset (overrides the manifest)
        #[arg(long, env = "MODELSYNC_BASE_DIR")]
        base_dir: Option<PathBuf>,

        /// Footprint of each placeholder, in scene units
        #[arg(long, default_value_t = placeholder::DEFAULT_SIZE)]
        size: f32,

        /// Only generate these assets
        #[arg(long, num_args = 1..)]
        only: Vec<String>,
    },

    /// Show which assets are present locally
    Status {
        /// Directory holding the asset sub-directories (overrides the manifest)
        #[arg(long, env = "MODELSYNC_BASE_DIR")]
        base_dir: Option<PathBuf>,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_fetch() {
        let cli = Cli::try_parse_from([
            "modelsync",
            "-m",
            "site/assets.json",
            "fetch",
            "--report",
            "out.json",
            "-j",
            "4",
        ])
        .unwrap();

        assert_eq!(cli.manifest, PathBuf::from("site/assets.json"));
        match cli.command {
            Commands::Fetch {
                report,
                concurrency,
                retries,
                ..
            } => {
                assert_eq!(report, Some(PathBuf::from("out.json")));
                assert_eq!(concurrency, 4);
                assert_eq!(retries, 0);
            },
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        assert!(Cli::try_parse_from(["modelsync", "fetch", "-j", "0"]).is_err());
    }

    #[test]
    fn test_parse_generate_only() {
        let cli = Cli::try_parse_from(["modelsync", "generate", "--only", "hampi", "konark"]).unwrap();
        match cli.command {
            Commands::Generate { only, size, .. } => {
                assert_eq!(only, ["hampi", "konark"]);
                assert_eq!(size, 1.0);
            },
            other => panic!("unexpected command {other:?}"),
        }
    }
}
