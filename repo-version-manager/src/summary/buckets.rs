//! Grouping of branch records for display.

use crate::inspect::VersionClass;
use crate::runner::{BranchOutcome, BranchRecord};

/// One repository's records grouped by what was found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Buckets<'a> {
    /// Pinned markers.
    pub fixed: Vec<&'a BranchRecord>,

    /// Open-ended markers.
    pub latest: Vec<&'a BranchRecord>,

    /// Missing or unrecognized markers.
    pub unknown: Vec<&'a BranchRecord>,

    /// Structured search results.
    pub searches: Vec<&'a BranchRecord>,

    /// Branches that could not be inspected.
    pub errors: Vec<&'a BranchRecord>,
}

impl<'a> Buckets<'a> {
    /// Groups `records`, keeping their order within each bucket.
    #[must_use]
    pub fn from_records(records: &'a [BranchRecord]) -> Self {
        let mut buckets = Self::default();
        for record in records {
            let bucket = match &record.outcome {
                BranchOutcome::Marker { class, .. } => match class {
                    VersionClass::Fixed => &mut buckets.fixed,
                    VersionClass::Latest => &mut buckets.latest,
                    VersionClass::Unknown => &mut buckets.unknown,
                },
                BranchOutcome::Search { .. } => &mut buckets.searches,
                BranchOutcome::Error { .. } => &mut buckets.errors,
            };
            bucket.push(record);
        }
        buckets
    }

    /// Returns true if no record was grouped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fixed.is_empty()
            && self.latest.is_empty()
            && self.unknown.is_empty()
            && self.searches.is_empty()
            && self.errors.is_empty()
    }
}
