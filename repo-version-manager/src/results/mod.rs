//! Persistence of the last campaign.
//!
//! The check run's [`CampaignResult`] is written as JSON and is the only
//! input of later update and display actions. URLs of created PRs go to a
//! plain text file, one per line, replaced by every update run.

mod error;

pub use error::StoreError;

use crate::runner::{BranchOutcome, BranchRecord, CampaignResult};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default results file name.
pub const DEFAULT_RESULTS_FILE: &str = "output.json";

/// Default PR list file name.
pub const DEFAULT_PR_LIST_FILE: &str = "created_prs.txt";

/// Reads and writes the results and PR list files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsStore {
    results_path: PathBuf,
    pr_list_path: PathBuf,
}

impl Default for ResultsStore {
    fn default() -> Self {
        Self::new(DEFAULT_RESULTS_FILE, DEFAULT_PR_LIST_FILE)
    }
}

impl ResultsStore {
    /// Creates a store for the given files.
    #[must_use]
    pub fn new(results_path: impl Into<PathBuf>, pr_list_path: impl Into<PathBuf>) -> Self {
        Self {
            results_path: results_path.into(),
            pr_list_path: pr_list_path.into(),
        }
    }

    /// Path of the results file.
    #[must_use]
    pub fn results_path(&self) -> &Path {
        &self.results_path
    }

    /// Path of the PR list file.
    #[must_use]
    pub fn pr_list_path(&self) -> &Path {
        &self.pr_list_path
    }

    /// Loads the last campaign result.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingFile`] if no check has been saved yet.
    pub fn load(&self) -> Result<CampaignResult, StoreError> {
        let path = &self.results_path;
        debug!(path = %path.display(), "Loading results");

        if !path.exists() {
            return Err(StoreError::MissingFile {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
        serde_json::from_str(&content).map_err(|e| StoreError::JsonError {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Replaces the stored campaign result.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, result: &CampaignResult) -> Result<(), StoreError> {
        let path = &self.results_path;
        let json = serde_json::to_string_pretty(result).map_err(|e| StoreError::JsonError {
            path: path.display().to_string(),
            source: e,
        })?;

        std::fs::write(path, json + "\n").map_err(|e| io_error(path, e))?;
        info!(path = %path.display(), "Saved results");
        Ok(())
    }

    /// Replaces the PR list with `urls`.
    ///
    /// Nothing is written when `urls` is empty, so the list of the previous
    /// run stays in place. Returns whether the file was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save_pr_urls(&self, urls: &[String]) -> Result<bool, StoreError> {
        if urls.is_empty() {
            debug!("No PR URLs to save");
            return Ok(false);
        }

        let path = &self.pr_list_path;
        let mut content = urls.join("\n");
        content.push('\n');
        std::fs::write(path, content).map_err(|e| io_error(path, e))?;
        info!(path = %path.display(), count = urls.len(), "Saved PR URLs");
        Ok(true)
    }

    /// Loads the PR list. A missing file yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn load_pr_urls(&self) -> Result<Vec<String>, StoreError> {
        let path = &self.pr_list_path;
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

/// Pretty-prints the raw captured value of one record.
///
/// Marker records show their line; errors show their message.
#[must_use]
pub fn deep_dive(record: &BranchRecord) -> String {
    match &record.outcome {
        BranchOutcome::Search { value } => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        BranchOutcome::Marker { line, class } => match line {
            Some(line) => format!("{line} ({class})"),
            None => format!("no marker line ({class})"),
        },
        BranchOutcome::Error { kind, message } => format!("{kind}: {message}"),
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::IoError {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::inspect::VersionClass;
    use crate::runner::RepositoryRecords;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> ResultsStore {
        ResultsStore::new(
            dir.path().join(DEFAULT_RESULTS_FILE),
            dir.path().join(DEFAULT_PR_LIST_FILE),
        )
    }

    fn sample() -> CampaignResult {
        let mut result = CampaignResult::for_settings(&Settings::default());
        result.repositories.push(RepositoryRecords {
            repository: "acme/widgets".to_string(),
            error: None,
            branches: vec![BranchRecord::new(
                "release/1.0",
                BranchOutcome::Marker {
                    class: VersionClass::Latest,
                    line: Some("constructionkit/[>=1.0.0]@spx00/release".to_string()),
                },
            )],
        });
        result
    }

    #[test]
    fn missing_results_are_reported() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            store(&dir).load(),
            Err(StoreError::MissingFile { .. })
        ));
    }

    #[test]
    fn saves_and_loads_results() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), sample());
    }

    #[test]
    fn invalid_results_are_reported() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::write(store.results_path(), "{ nope").unwrap();

        assert!(matches!(store.load(), Err(StoreError::JsonError { .. })));
    }

    #[test]
    fn pr_list_is_replaced_not_appended() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store
            .save_pr_urls(&["https://a/1".to_string(), "https://a/2".to_string()])
            .unwrap();
        store.save_pr_urls(&["https://b/3".to_string()]).unwrap();

        assert_eq!(
            fs::read_to_string(store.pr_list_path()).unwrap(),
            "https://b/3\n"
        );
        assert_eq!(store.load_pr_urls().unwrap(), vec!["https://b/3"]);
    }

    #[test]
    fn empty_pr_list_keeps_previous_file() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        assert!(!store.save_pr_urls(&[]).unwrap());
        assert!(!store.pr_list_path().exists());
        assert!(store.load_pr_urls().unwrap().is_empty());

        store.save_pr_urls(&["https://a/1".to_string()]).unwrap();
        assert!(!store.save_pr_urls(&[]).unwrap());
        assert_eq!(store.load_pr_urls().unwrap(), vec!["https://a/1"]);
    }

    #[test]
    fn deep_dive_pretty_prints_values() {
        let record = BranchRecord::new(
            "release/1.0",
            BranchOutcome::Search {
                value: json!({"a": {"b": 1}}),
            },
        );
        assert_eq!(deep_dive(&record), "{\n  \"a\": {\n    \"b\": 1\n  }\n}");

        let marker = BranchRecord::new(
            "release/1.0",
            BranchOutcome::Marker {
                class: VersionClass::Unknown,
                line: None,
            },
        );
        assert_eq!(deep_dive(&marker), "no marker line (unknown)");
    }
}
