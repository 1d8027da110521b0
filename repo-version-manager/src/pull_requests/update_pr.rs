//! Update pull request information.

use super::{PrError, PrStatus};
use crate::github::RepositoryId;
use serde::{Deserialize, Serialize};

/// One attempted update of a branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePr {
    /// Repository in `owner/name` form.
    pub repository: String,

    /// Branch the PR targets.
    pub source_branch: String,

    /// Working branch, once its name was rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_branch: Option<String>,

    /// PR title, once rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Creation status.
    #[serde(flatten)]
    pub status: PrStatus,
}

impl UpdatePr {
    /// Records a failed attempt.
    #[must_use]
    pub fn failed(repository: &RepositoryId, source_branch: &str, error: &PrError) -> Self {
        Self {
            repository: repository.full_name(),
            source_branch: source_branch.to_string(),
            working_branch: None,
            title: None,
            status: PrStatus::Failed {
                error: error.to_string(),
            },
        }
    }
}
