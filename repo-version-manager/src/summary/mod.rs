//! Run summary types and helpers.

mod buckets;
mod run_summary;

pub use buckets::Buckets;
pub use run_summary::RunSummary;
