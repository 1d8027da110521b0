//! Output of one check run.

use super::record::BranchRecord;
use crate::config::{default_marker_prefix, SearchMode, Settings};
use serde::{Deserialize, Serialize};

/// Records of one repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryRecords {
    /// Repository in `owner/name` form.
    pub repository: String,

    /// Set when the branches could not be listed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// One record per matching branch, in listing order.
    #[serde(default)]
    pub branches: Vec<BranchRecord>,
}

impl RepositoryRecords {
    /// Creates an empty entry.
    #[must_use]
    pub fn new(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            error: None,
            branches: Vec::new(),
        }
    }

    /// Finds the record of `branch`.
    #[must_use]
    pub fn branch(&self, branch: &str) -> Option<&BranchRecord> {
        self.branches.iter().find(|record| record.branch == branch)
    }
}

/// Everything found by one check run.
///
/// This is the only input of the update and show-results actions: the
/// update rewrites the file and marker recorded here, whatever the
/// settings say by then.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignResult {
    /// Inspected file.
    pub target_path: String,

    /// Glob the branches were matched with.
    pub branch_pattern: String,

    /// How the file was inspected.
    pub search_mode: SearchMode,

    /// Key filter of a key/value search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_key: Option<String>,

    /// Value filter of a key/value search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_value: Option<String>,

    /// Marker prefix the file was scanned for.
    #[serde(default = "default_marker_prefix")]
    pub marker_prefix: String,

    /// Per-repository records, in settings order.
    #[serde(default)]
    pub repositories: Vec<RepositoryRecords>,
}

impl CampaignResult {
    /// Creates an empty result carrying the run parameters of `settings`.
    #[must_use]
    pub fn for_settings(settings: &Settings) -> Self {
        let key_value = settings.search_mode == SearchMode::KeyValue;
        Self {
            target_path: settings.target_path.clone(),
            branch_pattern: settings.branch_pattern.clone(),
            search_mode: settings.search_mode,
            search_key: settings.search_key.clone().filter(|_| key_value),
            search_value: settings.search_value.clone().filter(|_| key_value),
            marker_prefix: settings.marker_prefix.clone(),
            repositories: Vec::new(),
        }
    }

    /// Finds the records of a repository.
    #[must_use]
    pub fn repository(&self, repository: &str) -> Option<&RepositoryRecords> {
        self.repositories
            .iter()
            .find(|records| records.repository == repository)
    }

    /// Finds one branch record.
    #[must_use]
    pub fn find(&self, repository: &str, branch: &str) -> Option<&BranchRecord> {
        self.repository(repository)
            .and_then(|records| records.branch(branch))
    }

    /// Branches an update run should touch, as `(repository, branch)`.
    pub fn update_candidates(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.repositories.iter().flat_map(move |records| {
            records
                .branches
                .iter()
                .filter(move |record| record.is_update_candidate(self.search_mode))
                .map(move |record| (records.repository.as_str(), record.branch.as_str()))
        })
    }

    /// Total number of branch records.
    #[must_use]
    pub fn branch_count(&self) -> usize {
        self.repositories
            .iter()
            .map(|records| records.branches.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::VersionClass;
    use crate::runner::record::{BranchOutcome, ErrorKind};

    fn marker(branch: &str, class: VersionClass) -> BranchRecord {
        BranchRecord::new(branch, BranchOutcome::Marker { class, line: None })
    }

    fn sample() -> CampaignResult {
        let mut result = CampaignResult::for_settings(&Settings::default());
        result.repositories = vec![
            RepositoryRecords {
                repository: "acme/widgets".to_string(),
                error: None,
                branches: vec![
                    marker("release/1.0", VersionClass::Fixed),
                    marker("release/2.0", VersionClass::Latest),
                    BranchRecord::error("release/3.0", ErrorKind::NotFound, "missing"),
                ],
            },
            RepositoryRecords {
                repository: "acme/gadgets".to_string(),
                error: Some("GitHub API error (404): Not Found".to_string()),
                branches: Vec::new(),
            },
        ];
        result
    }

    #[test]
    fn lists_only_latest_branches_as_candidates() {
        let result = sample();
        let candidates: Vec<_> = result.update_candidates().collect();
        assert_eq!(candidates, vec![("acme/widgets", "release/2.0")]);
    }

    #[test]
    fn finds_records() {
        let result = sample();
        assert_eq!(
            result.find("acme/widgets", "release/1.0").and_then(BranchRecord::class),
            Some(VersionClass::Fixed)
        );
        assert!(result.find("acme/widgets", "release/9.0").is_none());
        assert!(result.find("acme/other", "release/1.0").is_none());
        assert_eq!(result.branch_count(), 3);
    }

    #[test]
    fn drops_filters_outside_key_value_mode() {
        let settings = Settings {
            search_key: Some("version".to_string()),
            ..Settings::default()
        };
        let result = CampaignResult::for_settings(&settings);
        assert_eq!(result.search_key, None);
    }

    #[test]
    fn records_marker_prefix_of_the_check() {
        let settings = Settings {
            marker_prefix: "ck/".to_string(),
            ..Settings::default()
        };
        assert_eq!(CampaignResult::for_settings(&settings).marker_prefix, "ck/");

        let stored: CampaignResult = serde_json::from_str(
            r#"{"target_path":"a.txt","branch_pattern":"release/*","search_mode":"marker"}"#,
        )
        .unwrap();
        assert_eq!(stored.marker_prefix, "constructionkit/");
    }

    #[test]
    fn round_trips_through_json() {
        let result = sample();
        let json = serde_json::to_string_pretty(&result).unwrap();
        let parsed: CampaignResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }
}
