//! Pull request status types.

use serde::{Deserialize, Serialize};

/// Outcome of one update PR attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PrStatus {
    /// PR successfully created.
    Created {
        /// PR number.
        number: u64,
        /// PR URL.
        url: String,
    },

    /// Nothing to change on the branch.
    Skipped {
        /// Reason for skipping.
        reason: String,
    },

    /// A step failed. Earlier steps are not undone.
    Failed {
        /// Error message.
        error: String,
    },
}

impl PrStatus {
    /// Returns the status as a short string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::Skipped { .. } => "skipped",
            Self::Failed { .. } => "failed",
        }
    }

    /// Returns the PR URL if created.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Created { url, .. } => Some(url),
            _ => None,
        }
    }
}
