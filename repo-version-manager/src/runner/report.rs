//! Output of one update run.

use crate::pull_requests::{PrStatus, UpdatePr};
use serde::Serialize;

/// Every branch an update run attempted, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateReport {
    /// One entry per attempted branch.
    pub prs: Vec<UpdatePr>,
}

impl UpdateReport {
    /// URLs of the created PRs, in creation order.
    #[must_use]
    pub fn created_urls(&self) -> Vec<String> {
        self.prs
            .iter()
            .filter_map(|pr| pr.status.url())
            .map(str::to_string)
            .collect()
    }

    /// Number of created PRs.
    #[must_use]
    pub fn created(&self) -> usize {
        self.count(|status| matches!(status, PrStatus::Created { .. }))
    }

    /// Number of skipped branches.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(|status| matches!(status, PrStatus::Skipped { .. }))
    }

    /// Number of failed branches.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|status| matches!(status, PrStatus::Failed { .. }))
    }

    fn count(&self, predicate: impl Fn(&PrStatus) -> bool) -> usize {
        self.prs.iter().filter(|pr| predicate(&pr.status)).count()
    }
}
