//! In-memory repository host.

use crate::github::{
    should_stop_paging, ApiError, CreatedPullRequest, FileWrite, PullRequestSpec, RemoteFile,
    RepositoryHost, RepositoryId, BRANCH_PAGE_SIZE,
};
use crate::github::ClientConfig;
use crate::menu::Connect;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

/// Host operations, used to inject failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListBranches,
    GetFile,
    BranchTip,
    CreateBranch,
    PutFile,
    CreatePullRequest,
}

/// A call received by [`InMemoryHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    ListBranches {
        repository: String,
        page: u32,
    },
    GetFile {
        repository: String,
        path: String,
        branch: String,
    },
    BranchTip {
        repository: String,
        branch: String,
    },
    CreateBranch {
        repository: String,
        branch: String,
        sha: String,
    },
    PutFile {
        repository: String,
        branch: String,
        path: String,
        content: String,
        sha: String,
        message: String,
    },
    CreatePullRequest {
        repository: String,
        head: String,
        base: String,
        title: String,
        body: String,
    },
}

#[derive(Debug, Default)]
struct Branch {
    tip: String,
    files: BTreeMap<String, RemoteFile>,
}

#[derive(Debug, Default)]
struct Repository {
    branches: Vec<(String, Branch)>,
}

impl Repository {
    fn branch(&self, name: &str) -> Option<&Branch> {
        self.branches
            .iter()
            .find(|(branch, _)| branch == name)
            .map(|(_, branch)| branch)
    }

    fn branch_mut(&mut self, name: &str) -> Option<&mut Branch> {
        self.branches
            .iter_mut()
            .find(|(branch, _)| branch == name)
            .map(|(_, branch)| branch)
    }
}

#[derive(Debug, Default)]
struct State {
    repositories: BTreeMap<String, Repository>,
    failures: HashMap<(Operation, String, Option<String>), (u16, String)>,
    calls: Vec<HostCall>,
    next_pr: u64,
    revision: u64,
}

impl State {
    fn check_failure(
        &self,
        operation: Operation,
        repository: &str,
        branch: Option<&str>,
    ) -> Result<(), ApiError> {
        let specific = branch
            .and_then(|b| {
                self.failures
                    .get(&(operation, repository.to_string(), Some(b.to_string())))
            })
            .or_else(|| self.failures.get(&(operation, repository.to_string(), None)));

        match specific {
            Some((status, message)) => Err(ApiError::Status {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn repository(&self, repository: &str) -> Result<&Repository, ApiError> {
        self.repositories.get(repository).ok_or_else(not_found)
    }

    fn next_sha(&mut self, seed: &str) -> String {
        self.revision += 1;
        format!("{seed}-{}", self.revision)
    }
}

fn not_found() -> ApiError {
    ApiError::Status {
        status: 404,
        message: "Not Found".to_string(),
    }
}

/// A [`RepositoryHost`] backed by in-memory repositories.
///
/// Every call is recorded. Branches created through the host copy the files
/// of the branch whose tip they point at, and writes must name the current
/// sha of the file, as on GitHub. Clones share their state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHost {
    state: Rc<RefCell<State>>,
}

impl InMemoryHost {
    /// Creates an empty host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an empty branch, creating the repository if needed.
    #[must_use]
    pub fn with_branch(self, repository: &str, branch: &str) -> Self {
        {
            let mut state = self.state.borrow_mut();
            let tip = state.next_sha("commit");
            let repo = state.repositories.entry(repository.to_string()).or_default();
            if repo.branch(branch).is_none() {
                repo.branches.push((
                    branch.to_string(),
                    Branch {
                        tip,
                        files: BTreeMap::new(),
                    },
                ));
            }
        }
        self
    }

    /// Adds a file to a branch, creating the branch if needed.
    #[must_use]
    pub fn with_file(self, repository: &str, branch: &str, path: &str, content: &str) -> Self {
        let host = self.with_branch(repository, branch);
        {
            let mut state = host.state.borrow_mut();
            let sha = state.next_sha("blob");
            if let Some(target) = state
                .repositories
                .get_mut(repository)
                .and_then(|repo| repo.branch_mut(branch))
            {
                target.files.insert(
                    path.to_string(),
                    RemoteFile {
                        content: content.to_string(),
                        sha,
                    },
                );
            }
        }
        host
    }

    /// Makes `operation` fail with `status` for a repository, optionally
    /// only for one branch.
    #[must_use]
    pub fn with_failure(
        self,
        operation: Operation,
        repository: &str,
        branch: Option<&str>,
        status: u16,
    ) -> Self {
        self.state.borrow_mut().failures.insert(
            (
                operation,
                repository.to_string(),
                branch.map(str::to_string),
            ),
            (status, format!("injected {operation:?} failure")),
        );
        self
    }

    /// Every call received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<HostCall> {
        self.state.borrow().calls.clone()
    }

    /// Pull requests opened so far.
    #[must_use]
    pub fn pull_requests(&self) -> Vec<HostCall> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, HostCall::CreatePullRequest { .. }))
            .collect()
    }

    /// Branch names of a repository, in creation order.
    #[must_use]
    pub fn branch_names(&self, repository: &str) -> Vec<String> {
        self.state
            .borrow()
            .repositories
            .get(repository)
            .map(|repo| repo.branches.iter().map(|(name, _)| name.clone()).collect())
            .unwrap_or_default()
    }

    /// Current content of a file.
    #[must_use]
    pub fn file_content(&self, repository: &str, branch: &str, path: &str) -> Option<String> {
        self.state
            .borrow()
            .repositories
            .get(repository)
            .and_then(|repo| repo.branch(branch))
            .and_then(|branch| branch.files.get(path))
            .map(|file| file.content.clone())
    }
}

impl Connect for InMemoryHost {
    type Host = InMemoryHost;

    fn connect(&self, config: &ClientConfig) -> Result<Self::Host, ApiError> {
        if !config.has_token() {
            return Err(ApiError::MissingToken);
        }
        Ok(self.clone())
    }
}

impl RepositoryHost for InMemoryHost {
    async fn list_branches(
        &self,
        repository: &RepositoryId,
        limit: Option<usize>,
    ) -> Result<Vec<String>, ApiError> {
        let full_name = repository.full_name();
        let mut state = self.state.borrow_mut();
        let mut branches = Vec::new();
        let mut page: u32 = 1;

        loop {
            state.calls.push(HostCall::ListBranches {
                repository: full_name.clone(),
                page,
            });
            state.check_failure(Operation::ListBranches, &full_name, None)?;

            let page_size = usize::from(BRANCH_PAGE_SIZE);
            let start = (page as usize - 1) * page_size;
            let names: Vec<String> = state
                .repository(&full_name)?
                .branches
                .iter()
                .skip(start)
                .take(page_size)
                .map(|(name, _)| name.clone())
                .collect();

            let page_len = names.len();
            branches.extend(names);
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
        let full_name = repository.full_name();
        let mut state = self.state.borrow_mut();
        state.calls.push(HostCall::GetFile {
            repository: full_name.clone(),
            path: path.to_string(),
            branch: branch.to_string(),
        });
        state.check_failure(Operation::GetFile, &full_name, Some(branch))?;

        Ok(state
            .repository(&full_name)?
            .branch(branch)
            .and_then(|branch| branch.files.get(path))
            .cloned())
    }

    async fn branch_tip(
        &self,
        repository: &RepositoryId,
        branch: &str,
    ) -> Result<String, ApiError> {
        let full_name = repository.full_name();
        let mut state = self.state.borrow_mut();
        state.calls.push(HostCall::BranchTip {
            repository: full_name.clone(),
            branch: branch.to_string(),
        });
        state.check_failure(Operation::BranchTip, &full_name, Some(branch))?;

        state
            .repository(&full_name)?
            .branch(branch)
            .map(|branch| branch.tip.clone())
            .ok_or_else(not_found)
    }

    async fn create_branch(
        &self,
        repository: &RepositoryId,
        branch: &str,
        sha: &str,
    ) -> Result<(), ApiError> {
        let full_name = repository.full_name();
        let mut state = self.state.borrow_mut();
        state.calls.push(HostCall::CreateBranch {
            repository: full_name.clone(),
            branch: branch.to_string(),
            sha: sha.to_string(),
        });
        state.check_failure(Operation::CreateBranch, &full_name, Some(branch))?;

        let repo = state
            .repositories
            .get_mut(&full_name)
            .ok_or_else(not_found)?;
        if repo.branch(branch).is_some() {
            return Err(ApiError::Status {
                status: 422,
                message: "Reference already exists".to_string(),
            });
        }

        let files = repo
            .branches
            .iter()
            .find(|(_, source)| source.tip == sha)
            .map(|(_, source)| source.files.clone())
            .ok_or_else(|| ApiError::Status {
                status: 422,
                message: "Object does not exist".to_string(),
            })?;

        repo.branches.push((
            branch.to_string(),
            Branch {
                tip: sha.to_string(),
                files,
            },
        ));
        Ok(())
    }

    async fn put_file(
        &self,
        repository: &RepositoryId,
        write: FileWrite<'_>,
    ) -> Result<(), ApiError> {
        let full_name = repository.full_name();
        let mut state = self.state.borrow_mut();
        state.calls.push(HostCall::PutFile {
            repository: full_name.clone(),
            branch: write.branch.to_string(),
            path: write.path.to_string(),
            content: write.content.to_string(),
            sha: write.sha.to_string(),
            message: write.message.to_string(),
        });
        state.check_failure(Operation::PutFile, &full_name, Some(write.branch))?;

        let blob = state.next_sha("blob");
        let commit = state.next_sha("commit");
        let branch = state
            .repositories
            .get_mut(&full_name)
            .and_then(|repo| repo.branch_mut(write.branch))
            .ok_or_else(not_found)?;

        match branch.files.get_mut(write.path) {
            Some(file) if file.sha == write.sha => {
                file.content = write.content.to_string();
                file.sha = blob;
                branch.tip = commit;
                Ok(())
            }
            Some(_) => Err(ApiError::Status {
                status: 409,
                message: format!("{} does not match", write.sha),
            }),
            None => Err(not_found()),
        }
    }

    async fn create_pull_request(
        &self,
        repository: &RepositoryId,
        pull_request: PullRequestSpec<'_>,
    ) -> Result<CreatedPullRequest, ApiError> {
        let full_name = repository.full_name();
        let mut state = self.state.borrow_mut();
        state.calls.push(HostCall::CreatePullRequest {
            repository: full_name.clone(),
            head: pull_request.head.to_string(),
            base: pull_request.base.to_string(),
            title: pull_request.title.to_string(),
            body: pull_request.body.to_string(),
        });
        state.check_failure(
            Operation::CreatePullRequest,
            &full_name,
            Some(pull_request.base),
        )?;

        let repo = state.repository(&full_name)?;
        if repo.branch(pull_request.head).is_none() || repo.branch(pull_request.base).is_none() {
            return Err(ApiError::Status {
                status: 422,
                message: "Validation Failed".to_string(),
            });
        }

        state.next_pr += 1;
        let number = state.next_pr;
        Ok(CreatedPullRequest {
            number,
            url: format!("https://github.com/{full_name}/pull/{number}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> RepositoryId {
        RepositoryId::parse("acme/widgets").unwrap()
    }

    #[tokio::test]
    async fn pages_through_branches() {
        let mut host = InMemoryHost::new();
        for i in 0..45 {
            host = host.with_branch("acme/widgets", &format!("release/{i}"));
        }

        let all = host.list_branches(&repo(), None).await.unwrap();
        assert_eq!(all.len(), 45);

        let limited = host.list_branches(&repo(), Some(10)).await.unwrap();
        assert_eq!(limited.len(), 10);

        let pages = host
            .calls()
            .iter()
            .filter(|call| matches!(call, HostCall::ListBranches { .. }))
            .count();
        assert_eq!(pages, 3);
    }

    #[tokio::test]
    async fn missing_file_is_none_and_unknown_repo_is_404() {
        let host = InMemoryHost::new().with_branch("acme/widgets", "main");

        assert!(host
            .get_file(&repo(), "missing.txt", "main")
            .await
            .unwrap()
            .is_none());

        let other = RepositoryId::parse("acme/other").unwrap();
        let error = host.list_branches(&other, None).await.unwrap_err();
        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn writes_require_current_sha() {
        let host = InMemoryHost::new().with_file("acme/widgets", "main", "a.txt", "one");
        let file = host.get_file(&repo(), "a.txt", "main").await.unwrap().unwrap();

        let stale = FileWrite {
            path: "a.txt",
            branch: "main",
            content: "two",
            sha: "stale",
            message: "update",
        };
        assert_eq!(
            host.put_file(&repo(), stale).await.unwrap_err().status(),
            Some(409)
        );

        let current = FileWrite {
            sha: &file.sha,
            ..stale
        };
        host.put_file(&repo(), current).await.unwrap();
        assert_eq!(
            host.file_content("acme/widgets", "main", "a.txt").as_deref(),
            Some("two")
        );
    }

    #[tokio::test]
    async fn injected_failures_are_scoped_to_branch() {
        let host = InMemoryHost::new()
            .with_file("acme/widgets", "a", "f", "x")
            .with_file("acme/widgets", "b", "f", "x")
            .with_failure(Operation::GetFile, "acme/widgets", Some("a"), 500);

        assert_eq!(
            host.get_file(&repo(), "f", "a").await.unwrap_err().status(),
            Some(500)
        );
        assert!(host.get_file(&repo(), "f", "b").await.unwrap().is_some());
    }
}
