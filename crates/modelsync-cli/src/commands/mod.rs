//! CLI command implementations
//!
//! Each subcommand has its own module with a `run` function.

pub mod fetch;
pub mod generate;
pub mod status;

use crate::fetcher::{BatchResult, FailureKind, ItemOutcome, Outcome};
use crate::manifest::{Manifest, Rejected};

/// Merge rejected entries and processed items back into manifest order
///
/// Names that appear in neither list (filtered out by the caller) are skipped.
pub(crate) fn collate(manifest: &Manifest, rejected: &[Rejected], batch: BatchResult) -> BatchResult {
    let mut processed = batch.outcomes;

    manifest
        .assets
        .iter()
        .filter_map(|(name, _)| {
            if let Some(r) = rejected.iter().find(|r| &r.name == name) {
                return Some(ItemOutcome {
                    name: name.clone(),
                    outcome: Outcome::failure(FailureKind::ConfigInvalid, r.reason.clone()),
                });
            }
            let index = processed.iter().position(|o| &o.name == name)?;
            Some(processed.swap_remove(index))
        })
        .collect()
}
