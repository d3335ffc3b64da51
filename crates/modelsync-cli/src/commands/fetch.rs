//! `modelsync fetch` command implementation
//!
//! Downloads every asset in the manifest into its per-asset directory.

use crate::commands::collate;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::fetcher::{FetchOptions, Fetcher};
use crate::manifest::Manifest;
use crate::report::{self, BatchReport};
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;

/// Options for one fetch run
#[derive(Debug, Clone)]
pub struct FetchArgs {
    pub manifest: PathBuf,
    pub base_dir: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub concurrency: usize,
    pub retries: u32,
    pub quiet: bool,
}

/// Fetch all assets from the manifest
pub async fn run(args: FetchArgs) -> Result<()> {
    let manifest = Manifest::load(&args.manifest)?;
    let base_dir = args.base_dir.clone().unwrap_or_else(|| manifest.base_dir.clone());
    let plan = manifest.plan(Some(&base_dir));

    if plan.is_empty() {
        println!("No assets listed in {}. Nothing to fetch.", args.manifest.display());
        return Ok(());
    }

    let config = Config::from_env()?;
    let options = FetchOptions {
        concurrency: args.concurrency,
        retries: args.retries,
        show_progress: !args.quiet,
        ..FetchOptions::default()
    };
    let fetcher = Fetcher::new(&config, manifest.sketchfab_token(), options)?;

    if !args.quiet {
        println!(
            "{} Fetching {} asset(s) into {}",
            "→".cyan(),
            plan.len(),
            base_dir.display()
        );
        for rejected in &plan.rejected {
            println!("{} {}: {}", "✗".red(), rejected.name, rejected.reason);
        }
    }

    let batch = fetcher.fetch_all(&plan.items).await;
    let batch = collate(&manifest, &plan.rejected, batch);
    info!(
        total = batch.len(),
        succeeded = batch.succeeded(),
        failed = batch.failed(),
        "Fetch finished"
    );

    report::print_summary(&batch);

    if let Some(path) = &args.report {
        BatchReport::new(&batch, &base_dir, &manifest).write(path)?;
        println!("Report saved: {}", path.display());
    }

    if batch.all_succeeded() {
        Ok(())
    } else {
        Err(CliError::BatchIncomplete {
            failed: batch.failed(),
            total: batch.len(),
        })
    }
}
