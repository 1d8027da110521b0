//! Values exchanged with the repository host.

/// A file fetched from a branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    /// Decoded UTF-8 content.
    pub content: String,

    /// Blob sha identifying this exact revision; required to overwrite it.
    pub sha: String,
}

/// A file write committed onto a branch.
#[derive(Debug, Clone, Copy)]
pub struct FileWrite<'a> {
    /// Path of the file inside the repository.
    pub path: &'a str,

    /// Branch that receives the commit.
    pub branch: &'a str,

    /// New file content (plain text, encoded by the client).
    pub content: &'a str,

    /// Sha of the revision being replaced.
    pub sha: &'a str,

    /// Commit message.
    pub message: &'a str,
}

/// A pull request to open.
#[derive(Debug, Clone, Copy)]
pub struct PullRequestSpec<'a> {
    /// Branch holding the changes.
    pub head: &'a str,

    /// Branch the changes should land on.
    pub base: &'a str,

    /// PR title.
    pub title: &'a str,

    /// PR body.
    pub body: &'a str,
}

/// A pull request opened on the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPullRequest {
    /// PR number.
    pub number: u64,

    /// Browser URL of the PR.
    pub url: String,
}
