//! GitHub REST access.
//!
//! [`RepositoryHost`] is the set of calls a campaign needs. [`GitHubClient`]
//! implements it on top of octocrab; tests use
//! [`InMemoryHost`](crate::testing::InMemoryHost).

mod client_config;
mod error;
mod file;
mod repository;

pub use client_config::ClientConfig;
pub use error::ApiError;
pub use file::{CreatedPullRequest, FileWrite, PullRequestSpec, RemoteFile};
pub use repository::RepositoryId;

use octocrab::models::repos::Object;
use octocrab::params::repos::Reference;
use octocrab::Octocrab;
use tracing::debug;

/// Branches requested per page when listing.
pub const BRANCH_PAGE_SIZE: u8 = 30;

/// Operations the campaign runner performs against a repository host.
///
/// None of the operations retry; every failure is returned to the caller.
#[allow(async_fn_in_trait)]
pub trait RepositoryHost {
    /// Lists branch names, stopping at a short page or once `limit` names
    /// have been collected.
    async fn list_branches(
        &self,
        repository: &RepositoryId,
        limit: Option<usize>,
    ) -> Result<Vec<String>, ApiError>;

    /// Fetches a file at `branch`. Returns `Ok(None)` if it does not exist.
    async fn get_file(
        &self,
        repository: &RepositoryId,
        path: &str,
        branch: &str,
    ) -> Result<Option<RemoteFile>, ApiError>;

    /// Returns the commit sha at the tip of `branch`.
    async fn branch_tip(&self, repository: &RepositoryId, branch: &str)
        -> Result<String, ApiError>;

    /// Creates `branch` pointing at `sha`.
    async fn create_branch(
        &self,
        repository: &RepositoryId,
        branch: &str,
        sha: &str,
    ) -> Result<(), ApiError>;

    /// Commits new file content. The write must name the sha it replaces.
    async fn put_file(
        &self,
        repository: &RepositoryId,
        write: FileWrite<'_>,
    ) -> Result<(), ApiError>;

    /// Opens a pull request.
    async fn create_pull_request(
        &self,
        repository: &RepositoryId,
        pull_request: PullRequestSpec<'_>,
    ) -> Result<CreatedPullRequest, ApiError>;
}

/// Returns true once branch paging should stop.
#[must_use]
pub fn should_stop_paging(page_len: usize, collected: usize, limit: Option<usize>) -> bool {
    page_len < usize::from(BRANCH_PAGE_SIZE) || limit.is_some_and(|limit| collected >= limit)
}

/// Picks the text of a fetched file, telling a missing body apart from one
/// that does not decode to UTF-8.
fn file_text(path: &str, has_body: bool, decoded: Option<String>) -> Result<String, ApiError> {
    match decoded {
        Some(text) => Ok(text),
        None if has_body => Err(ApiError::UnexpectedResponse {
            message: format!("'{path}' is not valid UTF-8 text"),
        }),
        None => Err(ApiError::UnexpectedResponse {
            message: format!("'{path}' has no inline content"),
        }),
    }
}

/// Octocrab-backed [`RepositoryHost`].
#[derive(Debug, Clone)]
pub struct GitHubClient {
    octocrab: Octocrab,
}

impl GitHubClient {
    /// Builds a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingToken`] without a token, or a client error
    /// if the base URL is unusable.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let token = config.token().ok_or(ApiError::MissingToken)?;
        let mut builder = Octocrab::builder().personal_token(token.to_string());
        if let Some(base) = config.api_base() {
            builder = builder.base_uri(base.as_str())?;
        }

        Ok(Self {
            octocrab: builder.build()?,
        })
    }
}

impl RepositoryHost for GitHubClient {
    async fn list_branches(
        &self,
        repository: &RepositoryId,
        limit: Option<usize>,
    ) -> Result<Vec<String>, ApiError> {
        let mut branches = Vec::new();
        let mut page: u32 = 1;

        loop {
            debug!(repo = %repository, page, "Listing branches");
            let result = self
                .octocrab
                .repos(repository.owner(), repository.name())
                .list_branches()
                .per_page(BRANCH_PAGE_SIZE)
                .page(page)
                .send()
                .await?;

            let page_len = result.items.len();
            branches.extend(result.items.into_iter().map(|branch| branch.name));

            if should_stop_paging(page_len, branches.len(), limit) {
                break;
            }
            page += 1;
        }

        if let Some(limit) = limit {
            branches.truncate(limit);
        }
        Ok(branches)
    }

    async fn get_file(
        &self,
        repository: &RepositoryId,
        path: &str,
        branch: &str,
    ) -> Result<Option<RemoteFile>, ApiError> {
        let response = self
            .octocrab
            .repos(repository.owner(), repository.name())
            .get_content()
            .path(path)
            .r#ref(branch)
            .send()
            .await;

        let items = match response {
            Ok(items) => items.items,
            Err(e) => {
                let error = ApiError::from(e);
                if error.is_not_found() {
                    return Ok(None);
                }
                return Err(error);
            }
        };

        let [item] = <[_; 1]>::try_from(items).map_err(|items| {
            ApiError::UnexpectedResponse {
                message: format!("'{path}' resolved to {} entries, expected a file", items.len()),
            }
        })?;

        let decoded = item.decoded_content();
        let content = file_text(path, item.content.is_some(), decoded)?;

        Ok(Some(RemoteFile {
            content,
            sha: item.sha,
        }))
    }

    async fn branch_tip(
        &self,
        repository: &RepositoryId,
        branch: &str,
    ) -> Result<String, ApiError> {
        let reference = self
            .octocrab
            .repos(repository.owner(), repository.name())
            .get_ref(&Reference::Branch(branch.to_string()))
            .await?;

        match reference.object {
            Object::Commit { sha, .. } | Object::Tag { sha, .. } => Ok(sha),
            #[allow(unreachable_patterns)]
            _ => Err(ApiError::UnexpectedResponse {
                message: format!("refs/heads/{branch} does not point at a commit"),
            }),
        }
    }

    async fn create_branch(
        &self,
        repository: &RepositoryId,
        branch: &str,
        sha: &str,
    ) -> Result<(), ApiError> {
        self.octocrab
            .repos(repository.owner(), repository.name())
            .create_ref(&Reference::Branch(branch.to_string()), sha)
            .await?;
        Ok(())
    }

    async fn put_file(
        &self,
        repository: &RepositoryId,
        write: FileWrite<'_>,
    ) -> Result<(), ApiError> {
        self.octocrab
            .repos(repository.owner(), repository.name())
            .update_file(write.path, write.message, write.content, write.sha)
            .branch(write.branch)
            .send()
            .await?;
        Ok(())
    }

    async fn create_pull_request(
        &self,
        repository: &RepositoryId,
        pull_request: PullRequestSpec<'_>,
    ) -> Result<CreatedPullRequest, ApiError> {
        let pr = self
            .octocrab
            .pulls(repository.owner(), repository.name())
            .create(pull_request.title, pull_request.head, pull_request.base)
            .body(pull_request.body)
            .send()
            .await?;

        let url = pr
            .html_url
            .as_ref()
            .map(|u| u.to_string())
            .unwrap_or_else(|| pr.url.clone());

        Ok(CreatedPullRequest {
            number: pr.number,
            url,
        })
    }
}
