//! Runner configuration.

use std::time::Duration;

/// Pause between branches by default.
pub const DEFAULT_BRANCH_DELAY: Duration = Duration::from_millis(500);

/// Pause between repositories by default.
pub const DEFAULT_REPO_DELAY: Duration = Duration::from_millis(500);

/// Pause between the API calls of one PR by default.
pub const DEFAULT_PR_STEP_DELAY: Duration = Duration::from_secs(1);

/// Pacing and limits for a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Pause after each branch.
    branch_delay: Duration,
    /// Pause after each repository.
    repo_delay: Duration,
    /// Pause between the API calls that open one PR.
    pr_step_delay: Duration,
    /// Maximum branches listed per repository.
    branch_limit: Option<usize>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            branch_delay: DEFAULT_BRANCH_DELAY,
            repo_delay: DEFAULT_REPO_DELAY,
            pr_step_delay: DEFAULT_PR_STEP_DELAY,
            branch_limit: None,
        }
    }
}

impl RunnerConfig {
    /// Creates a configuration with default pacing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration without any pauses.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            branch_delay: Duration::ZERO,
            repo_delay: Duration::ZERO,
            pr_step_delay: Duration::ZERO,
            branch_limit: None,
        }
    }

    /// Sets the pause after each branch.
    #[must_use]
    pub fn with_branch_delay(mut self, delay: Duration) -> Self {
        self.branch_delay = delay;
        self
    }

    /// Sets the pause after each repository.
    #[must_use]
    pub fn with_repo_delay(mut self, delay: Duration) -> Self {
        self.repo_delay = delay;
        self
    }

    /// Sets the pause between the API calls of one PR.
    #[must_use]
    pub fn with_pr_step_delay(mut self, delay: Duration) -> Self {
        self.pr_step_delay = delay;
        self
    }

    /// Limits how many branches are listed per repository.
    #[must_use]
    pub fn with_branch_limit(mut self, limit: Option<usize>) -> Self {
        self.branch_limit = limit;
        self
    }

    /// Returns the pause after each branch.
    pub fn branch_delay(&self) -> Duration {
        self.branch_delay
    }

    /// Returns the pause after each repository.
    pub fn repo_delay(&self) -> Duration {
        self.repo_delay
    }

    /// Returns the pause between the API calls of one PR.
    pub fn pr_step_delay(&self) -> Duration {
        self.pr_step_delay
    }

    /// Returns the branch listing limit.
    pub fn branch_limit(&self) -> Option<usize> {
        self.branch_limit
    }
}
