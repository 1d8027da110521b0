//! Persisted settings.

use super::{ConfigError, SearchMode};
use crate::github::RepositoryId;
use crate::inspect::SearchFilter;
use crate::templates::MessageFormats;
use globset::{Glob, GlobMatcher};
use serde::{Deserialize, Serialize};

/// Settings describing what a campaign checks and how updates are worded.
///
/// Every field has a default so that partially written files still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Path of the inspected file inside each repository.
    #[serde(alias = "recipe_path", default = "default_target_path")]
    pub target_path: String,

    /// Glob selecting the branches to inspect (e.g. `release/*`).
    #[serde(default = "default_branch_pattern")]
    pub branch_pattern: String,

    /// Repositories in `owner/name` form.
    #[serde(default)]
    pub repos: Vec<String>,

    /// How the target file is inspected.
    #[serde(default)]
    pub search_mode: SearchMode,

    /// Key filter for [`SearchMode::KeyValue`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_key: Option<String>,

    /// Value filter for [`SearchMode::KeyValue`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_value: Option<String>,

    /// Literal prefix identifying the marker line.
    #[serde(default = "default_marker_prefix")]
    pub marker_prefix: String,

    /// Handlebars format of the text written after the marker prefix.
    #[serde(default = "default_marker_format")]
    pub marker_format: String,

    /// Handlebars format for working branch names.
    #[serde(default = "default_branch_name_format")]
    pub branch_name_format: String,

    /// Handlebars format for PR titles.
    #[serde(default = "default_pr_title_format")]
    pub pr_title_format: String,

    /// Handlebars format for PR bodies.
    #[serde(default = "default_pr_body_format")]
    pub pr_body_format: String,

    /// Handlebars format for commit messages.
    #[serde(default = "default_commit_message_format")]
    pub commit_message_format: String,
}

pub(crate) fn default_target_path() -> String {
    "conanrecipe_ckit.txt".to_string()
}

pub(crate) fn default_branch_pattern() -> String {
    "release/*".to_string()
}

pub(crate) fn default_marker_prefix() -> String {
    "constructionkit/".to_string()
}

pub(crate) fn default_marker_format() -> String {
    "{{version}}@spx00/release".to_string()
}

pub(crate) fn default_branch_name_format() -> String {
    "update-version-{{version}}-{{branch}}".to_string()
}

pub(crate) fn default_pr_title_format() -> String {
    "Update {{subject}} to {{version}}".to_string()
}

pub(crate) fn default_pr_body_format() -> String {
    concat!(
        "{{#if (eq mode \"marker\")}}",
        "This PR updates {{subject}} to version {{version}}.",
        "{{else}}",
        "This PR sets `{{subject}}` to `{{version}}` in `{{target_path}}`.",
        "{{/if}}"
    )
    .to_string()
}

pub(crate) fn default_commit_message_format() -> String {
    "Update {{subject}} to {{version}}".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_path: default_target_path(),
            branch_pattern: default_branch_pattern(),
            repos: Vec::new(),
            search_mode: SearchMode::default(),
            search_key: None,
            search_value: None,
            marker_prefix: default_marker_prefix(),
            marker_format: default_marker_format(),
            branch_name_format: default_branch_name_format(),
            pr_title_format: default_pr_title_format(),
            pr_body_format: default_pr_body_format(),
            commit_message_format: default_commit_message_format(),
        }
    }
}

impl Settings {
    /// Checks that the settings describe a runnable campaign.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_path.trim().is_empty() {
            return Err(validation("target path must not be empty"));
        }
        if self.branch_pattern.trim().is_empty() {
            return Err(validation("branch pattern must not be empty"));
        }
        if self.repos.is_empty() {
            return Err(validation("no repositories configured"));
        }
        self.repositories()?;
        self.branch_matcher()?;

        match self.search_mode {
            SearchMode::Marker if self.marker_prefix.trim().is_empty() => {
                Err(validation("marker prefix must not be empty"))
            }
            SearchMode::KeyValue if self.search_filter().is_empty() => Err(validation(
                "key/value search needs a search key or a search value",
            )),
            _ => Ok(()),
        }
    }

    /// Parses the configured repositories.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRepository`] for the first malformed entry.
    pub fn repositories(&self) -> Result<Vec<RepositoryId>, ConfigError> {
        self.repos.iter().map(|r| RepositoryId::parse(r)).collect()
    }

    /// Compiles the branch pattern.
    ///
    /// `*` also matches `/`, so `release/*` covers `release/1.0/hotfix`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if the glob does not compile.
    pub fn branch_matcher(&self) -> Result<GlobMatcher, ConfigError> {
        Glob::new(self.branch_pattern.trim())
            .map(|glob| glob.compile_matcher())
            .map_err(|source| ConfigError::InvalidPattern {
                pattern: self.branch_pattern.clone(),
                source,
            })
    }

    /// Builds the key/value filter. Outside key/value mode the filter is empty.
    #[must_use]
    pub fn search_filter(&self) -> SearchFilter {
        match self.search_mode {
            SearchMode::KeyValue => {
                SearchFilter::new(self.search_key.as_deref(), self.search_value.as_deref())
            }
            _ => SearchFilter::default(),
        }
    }

    /// Collects the message formats used when opening pull requests.
    #[must_use]
    pub fn message_formats(&self) -> MessageFormats {
        MessageFormats {
            marker: self.marker_format.clone(),
            branch_name: self.branch_name_format.clone(),
            pr_title: self.pr_title_format.clone(),
            pr_body: self.pr_body_format.clone(),
            commit_message: self.commit_message_format.clone(),
        }
    }
}

fn validation(message: &str) -> ConfigError {
    ConfigError::ValidationError {
        message: message.to_string(),
    }
}
