//! `modelsync generate` command implementation
//!
//! Writes placeholder models at every asset's target path.

use crate::commands::collate;
use crate::error::{CliError, Result};
use crate::manifest::Manifest;
use crate::placeholder;
use crate::report;
use colored::Colorize;
use std::path::PathBuf;

/// Generate placeholders for the manifest's assets (or only the named ones)
pub async fn run(manifest_path: PathBuf, base_dir: Option<PathBuf>, size: f32, only: Vec<String>) -> Result<()> {
    let manifest = Manifest::load(&manifest_path)?;
    let base_dir = base_dir.unwrap_or_else(|| manifest.base_dir.clone());
    let mut plan = manifest.plan(Some(&base_dir));

    if !only.is_empty() {
        for name in only.iter().filter(|n| manifest.asset(n).is_none()) {
            println!("{} '{}' is not in the manifest", "!".yellow(), name);
        }
        plan.items.retain(|item| only.contains(&item.name));
        plan.rejected.retain(|r| only.contains(&r.name));
    }

    if plan.is_empty() {
        println!("No assets to generate.");
        return Ok(());
    }

    println!(
        "{} Generating {} placeholder(s) in {}",
        "→".cyan(),
        plan.len(),
        base_dir.display()
    );

    let batch = placeholder::generate_all(&plan.items, size);
    let batch = collate(&manifest, &plan.rejected, batch);

    report::print_summary(&batch);

    if batch.all_succeeded() {
        Ok(())
    } else {
        Err(CliError::BatchIncomplete {
            failed: batch.failed(),
            total: batch.len(),
        })
    }
}
