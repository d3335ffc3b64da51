//! Batch summaries: the line-oriented console summary and the JSON report
//! written with `--report`.

use crate::error::Result;
use crate::fetcher::{BatchResult, FailureKind, Outcome};
use crate::manifest::Manifest;
use crate::progress::format_bytes;
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Plain summary lines, one per item, followed by the totals
pub fn summary_lines(batch: &BatchResult) -> Vec<String> {
    let mut lines: Vec<String> = batch
        .iter()
        .map(|item| match &item.outcome {
            Outcome::Success { bytes, .. } => {
                format!("- {}: success ({})", item.name, format_bytes(*bytes))
            },
            Outcome::Failure { reason, .. } => format!("- {}: failed ({reason})", item.name),
        })
        .collect();
    lines.push(format!(
        "{} total, {} succeeded, {} failed",
        batch.len(),
        batch.succeeded(),
        batch.failed()
    ));
    lines
}

/// Print the summary to stdout, failed items in red
pub fn print_summary(batch: &BatchResult) {
    let mut lines = summary_lines(batch);
    let totals = lines.pop().unwrap_or_default();

    println!();
    println!("{}", "Summary:".cyan().bold());
    for (line, item) in lines.iter().zip(batch.iter()) {
        if item.outcome.is_success() {
            println!("{line}");
        } else {
            println!("{}", line.red());
        }
    }

    if batch.all_succeeded() {
        println!("{} {}", "✓".green(), totals);
    } else {
        println!("{} {}", "✗".red(), totals);
    }
}

/// Counts for the whole batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// One entry of the JSON report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportItem {
    pub name: String,
    /// `success` or `failed`
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FailureKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
    /// Descriptive manifest fields, passed through untouched
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// Machine-readable report of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub base_dir: PathBuf,
    pub summary: ReportSummary,
    pub items: Vec<ReportItem>,
}

impl BatchReport {
    pub fn new(batch: &BatchResult, base_dir: &Path, manifest: &Manifest) -> Self {
        let items = batch
            .iter()
            .map(|item| {
                let metadata = manifest
                    .asset(&item.name)
                    .map(|entry| entry.metadata.clone())
                    .unwrap_or_default();

                match &item.outcome {
                    Outcome::Success { path, bytes, sha256 } => ReportItem {
                        name: item.name.clone(),
                        status: "success".to_string(),
                        kind: None,
                        reason: None,
                        model_path: Some(path.clone()),
                        bytes: Some(*bytes),
                        sha256: Some(sha256.clone()),
                        metadata,
                    },
                    Outcome::Failure { kind, reason } => ReportItem {
                        name: item.name.clone(),
                        status: "failed".to_string(),
                        kind: Some(*kind),
                        reason: Some(reason.clone()),
                        model_path: None,
                        bytes: None,
                        sha256: None,
                        metadata,
                    },
                }
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            base_dir: base_dir.to_path_buf(),
            summary: ReportSummary {
                total: batch.len(),
                succeeded: batch.succeeded(),
                failed: batch.failed(),
            },
            items,
        }
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
