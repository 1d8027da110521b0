//! Per-branch records.

use crate::config::SearchMode;
use crate::inspect::{Inspection, VersionClass};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Why a branch could not be inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Target file does not exist on the branch.
    NotFound,

    /// Target file is not valid JSON.
    InvalidJson,

    /// The API call failed.
    Api,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotFound => "not found",
            Self::InvalidJson => "invalid JSON",
            Self::Api => "API error",
        })
    }
}

/// What was found on a branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BranchOutcome {
    /// Marker scan result.
    Marker {
        /// Classification of the marker line.
        class: VersionClass,
        /// The trimmed marker line, if present.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        line: Option<String>,
    },

    /// Captured document or search matches.
    Search {
        /// Captured JSON.
        value: Value,
    },

    /// Inspection failed.
    Error {
        /// Failure category.
        kind: ErrorKind,
        /// Human-readable detail.
        message: String,
    },
}

impl From<Inspection> for BranchOutcome {
    fn from(inspection: Inspection) -> Self {
        match inspection {
            Inspection::Marker(scan) => Self::Marker {
                class: scan.class,
                line: scan.line,
            },
            Inspection::Structured(value) => Self::Search { value },
        }
    }
}

/// Inspection result for one branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchRecord {
    /// Branch name.
    pub branch: String,

    /// What was found.
    #[serde(flatten)]
    pub outcome: BranchOutcome,
}

impl BranchRecord {
    /// Creates a record.
    #[must_use]
    pub fn new(branch: impl Into<String>, outcome: BranchOutcome) -> Self {
        Self {
            branch: branch.into(),
            outcome,
        }
    }

    /// Creates an error record.
    #[must_use]
    pub fn error(branch: impl Into<String>, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::new(
            branch,
            BranchOutcome::Error {
                kind,
                message: message.into(),
            },
        )
    }

    /// Marker classification, if this is a marker record.
    #[must_use]
    pub fn class(&self) -> Option<VersionClass> {
        match &self.outcome {
            BranchOutcome::Marker { class, .. } => Some(*class),
            _ => None,
        }
    }

    /// Returns true if inspection failed.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, BranchOutcome::Error { .. })
    }

    /// Returns whether this branch should receive an update.
    ///
    /// In marker mode only open-ended (`latest`) branches qualify. A full
    /// dump qualifies whenever it was captured, a key/value search only if
    /// it matched something.
    #[must_use]
    pub fn is_update_candidate(&self, mode: SearchMode) -> bool {
        match (&self.outcome, mode) {
            (BranchOutcome::Marker { class, .. }, SearchMode::Marker) => {
                *class == VersionClass::Latest
            }
            (BranchOutcome::Search { .. }, SearchMode::FullDump) => true,
            (BranchOutcome::Search { value }, SearchMode::KeyValue) => {
                !matches!(value, Value::Object(found) if found.is_empty())
            }
            _ => false,
        }
    }

    /// Short text describing what was found.
    #[must_use]
    pub fn summary(&self) -> String {
        match &self.outcome {
            BranchOutcome::Marker { line, .. } => line.clone().unwrap_or_else(|| "N/A".to_string()),
            BranchOutcome::Search { value } => match value {
                Value::Object(map) => format!("{} entries", map.len()),
                Value::Array(items) => format!("{} items", items.len()),
                other => other.to_string(),
            },
            BranchOutcome::Error { kind, message } => format!("{kind}: {message}"),
        }
    }
}
