//! Run summary types.

use super::Buckets;
use crate::runner::{CampaignResult, UpdateReport};

/// Counts describing a check run and, optionally, the update that followed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of repositories checked.
    pub repositories: usize,

    /// Repositories whose branches could not be listed.
    pub repositories_failed: usize,

    /// Number of branch records.
    pub branches: usize,

    /// Branches with a pinned marker.
    pub fixed: usize,

    /// Branches with an open-ended marker.
    pub latest: usize,

    /// Branches with a missing or unrecognized marker.
    pub unknown: usize,

    /// Branches with a structured search result.
    pub searched: usize,

    /// Branches that could not be inspected.
    pub errors: usize,

    /// Number of PRs successfully created.
    pub prs_created: usize,

    /// Number of branches skipped during the update.
    pub prs_skipped: usize,

    /// Number of PRs that failed to create.
    pub prs_failed: usize,
}

impl RunSummary {
    /// Counts the records of a check run.
    #[must_use]
    pub fn from_campaign(result: &CampaignResult) -> Self {
        let mut summary = Self {
            repositories: result.repositories.len(),
            ..Default::default()
        };

        for records in &result.repositories {
            if records.error.is_some() {
                summary.repositories_failed += 1;
            }
            let buckets = Buckets::from_records(&records.branches);
            summary.branches += records.branches.len();
            summary.fixed += buckets.fixed.len();
            summary.latest += buckets.latest.len();
            summary.unknown += buckets.unknown.len();
            summary.searched += buckets.searches.len();
            summary.errors += buckets.errors.len();
        }
        summary
    }

    /// Updates the summary with an update report.
    pub fn record_update(&mut self, report: &UpdateReport) {
        self.prs_created += report.created();
        self.prs_skipped += report.skipped();
        self.prs_failed += report.failed();
    }

    /// Returns true if any failures occurred.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.repositories_failed > 0 || self.errors > 0 || self.prs_failed > 0
    }
}
