//! Per-item outcomes and the ordered batch result

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Why an item failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The manifest entry (or the settings it needs) is unusable
    ConfigInvalid,
    /// The resource could not be retrieved
    FetchFailed,
    /// The retrieved bytes could not be persisted
    WriteFailed,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::ConfigInvalid => "config_invalid",
            FailureKind::FetchFailed => "fetch_failed",
            FailureKind::WriteFailed => "write_failed",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of processing one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Success {
        path: PathBuf,
        bytes: u64,
        sha256: String,
    },
    Failure {
        kind: FailureKind,
        reason: String,
    },
}

impl Outcome {
    pub fn failure(kind: FailureKind, reason: impl Into<String>) -> Self {
        Outcome::Failure {
            kind,
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}

/// An outcome keyed by the item's name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemOutcome {
    pub name: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Outcomes for a whole batch, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub outcomes: Vec<ItemOutcome>,
}

impl BatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: impl Into<String>, outcome: Outcome) {
        self.outcomes.push(ItemOutcome {
            name: name.into(),
            outcome,
        });
    }

    pub fn get(&self, name: &str) -> Option<&Outcome> {
        self.outcomes
            .iter()
            .find(|o| o.name == name)
            .map(|o| &o.outcome)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.outcome.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.len() - self.succeeded()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.outcomes.iter()
    }
}

impl FromIterator<ItemOutcome> for BatchResult {
    fn from_iter<I: IntoIterator<Item = ItemOutcome>>(iter: I) -> Self {
        Self {
            outcomes: iter.into_iter().collect(),
        }
    }
}

impl Extend<ItemOutcome> for BatchResult {
    fn extend<I: IntoIterator<Item = ItemOutcome>>(&mut self, iter: I) {
        self.outcomes.extend(iter);
    }
}
