//! `modelsync status` command implementation
//!
//! Shows which manifest assets are present on disk.

use crate::error::Result;
use crate::item::Item;
use crate::manifest::Manifest;
use crate::progress::format_bytes;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};
use modelsync_common::checksum::compute_file_checksum;
use std::path::PathBuf;

const DIGEST_PREFIX_LEN: usize = 12;

/// Local state of one asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetStatus {
    pub name: String,
    pub source_kind: String,
    pub target: String,
    pub present: bool,
    pub size: Option<u64>,
    pub sha256: Option<String>,
    /// Reason the manifest entry is unusable
    pub problem: Option<String>,
}

impl AssetStatus {
    fn inspect(item: &Item) -> Self {
        let size = std::fs::metadata(&item.target_path)
            .ok()
            .filter(|m| m.is_file())
            .map(|m| m.len());
        let sha256 = size.and_then(|_| compute_file_checksum(&item.target_path).ok());

        Self {
            name: item.name.clone(),
            source_kind: item.source.kind().to_string(),
            target: item.target_path.display().to_string(),
            present: size.is_some(),
            size,
            sha256,
            problem: None,
        }
    }
}

/// Status of every manifest entry, in manifest order
pub fn collect(manifest: &Manifest, base_dir: Option<PathBuf>) -> Vec<AssetStatus> {
    let base_dir = base_dir.unwrap_or_else(|| manifest.base_dir.clone());
    let plan = manifest.plan(Some(&base_dir));

    manifest
        .assets
        .iter()
        .filter_map(|(name, _)| {
            if let Some(item) = plan.items.iter().find(|i| &i.name == name) {
                return Some(AssetStatus::inspect(item));
            }
            plan.rejected.iter().find(|r| &r.name == name).map(|r| AssetStatus {
                name: name.clone(),
                source_kind: "-".to_string(),
                target: "-".to_string(),
                present: false,
                size: None,
                sha256: None,
                problem: Some(r.reason.clone()),
            })
        })
        .collect()
}

/// Show status of the manifest's assets
pub async fn run(manifest_path: PathBuf, base_dir: Option<PathBuf>) -> Result<()> {
    let manifest = Manifest::load(&manifest_path)?;
    let statuses = collect(&manifest, base_dir);

    if statuses.is_empty() {
        println!("No assets listed in {}.", manifest_path.display());
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["Name", "Source", "Target", "Present", "Size", "SHA-256"]);

    for status in &statuses {
        let present = match (&status.problem, status.present) {
            (Some(problem), _) => Cell::new(format!("invalid: {problem}")).fg(Color::Red),
            (None, true) => Cell::new("yes").fg(Color::Green),
            (None, false) => Cell::new("no").fg(Color::Yellow),
        };
        let digest = status
            .sha256
            .as_deref()
            .map(|d| d.chars().take(DIGEST_PREFIX_LEN).collect::<String>())
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            Cell::new(&status.name),
            Cell::new(&status.source_kind),
            Cell::new(&status.target),
            present,
            Cell::new(status.size.map(format_bytes).unwrap_or_else(|| "-".to_string())),
            Cell::new(digest),
        ]);
    }

    println!("{table}");

    let present = statuses.iter().filter(|s| s.present).count();
    println!(
        "{} {} of {} asset(s) present",
        if present == statuses.len() { "✓".green() } else { "→".cyan() },
        present,
        statuses.len()
    );

    Ok(())
}
