//! Orchestrates check and update campaigns.
//!
//! Repositories and branches are processed one at a time with courtesy
//! pauses in between. Failures on a single branch are recorded and never
//! stop the campaign.

mod config;
mod error;
mod record;
mod report;
mod result;

pub use config::{
    RunnerConfig, DEFAULT_BRANCH_DELAY, DEFAULT_PR_STEP_DELAY, DEFAULT_REPO_DELAY,
};
pub use error::CampaignError;
pub use record::{BranchOutcome, BranchRecord, ErrorKind};
pub use report::UpdateReport;
pub use result::{CampaignResult, RepositoryRecords};

use crate::config::{SearchMode, Settings};
use crate::github::{RepositoryHost, RepositoryId};
use crate::inspect::Inspector;
use crate::pull_requests::{create_update_pr, PrStatus, UpdatePlan, UpdatePr};
use crate::rate_limit::pause;
use globset::GlobMatcher;
use tracing::{debug, error, info, warn};

/// Runs campaigns against a [`RepositoryHost`].
#[derive(Debug)]
pub struct Runner<'a, H> {
    host: &'a H,
    config: RunnerConfig,
}

impl<'a, H: RepositoryHost> Runner<'a, H> {
    /// Creates a runner.
    pub fn new(host: &'a H, config: RunnerConfig) -> Self {
        Self { host, config }
    }

    /// Inspects the target file on every matching branch of every
    /// configured repository.
    ///
    /// # Errors
    ///
    /// Returns [`CampaignError::Config`] if the settings are invalid. API and
    /// content failures are recorded in the result instead.
    pub async fn check(&self, settings: &Settings) -> Result<CampaignResult, CampaignError> {
        settings.validate()?;
        let repositories = settings.repositories()?;
        let matcher = settings.branch_matcher()?;
        let inspector = Inspector::from_settings(settings);
        let mut result = CampaignResult::for_settings(settings);

        info!(
            repositories = repositories.len(),
            pattern = %settings.branch_pattern,
            path = %settings.target_path,
            mode = %settings.search_mode,
            "Starting check"
        );

        for (index, repository) in repositories.iter().enumerate() {
            if index > 0 {
                pause(self.config.repo_delay()).await;
            }
            let records = self
                .check_repository(repository, &settings.target_path, &matcher, &inspector)
                .await;
            result.repositories.push(records);
        }

        info!(branches = result.branch_count(), "Check finished");
        Ok(result)
    }

    async fn check_repository(
        &self,
        repository: &RepositoryId,
        path: &str,
        matcher: &GlobMatcher,
        inspector: &Inspector,
    ) -> RepositoryRecords {
        info!(repo = %repository, "Processing repository");
        let mut records = RepositoryRecords::new(repository.full_name());

        let branches = match self
            .host
            .list_branches(repository, self.config.branch_limit())
            .await
        {
            Ok(branches) => branches,
            Err(e) => {
                error!(repo = %repository, error = %e, "Failed to list branches");
                records.error = Some(e.to_string());
                return records;
            }
        };

        let matching: Vec<String> = branches
            .into_iter()
            .filter(|branch| matcher.is_match(branch))
            .collect();
        info!(repo = %repository, count = matching.len(), "Found matching branches");

        for (index, branch) in matching.iter().enumerate() {
            if index > 0 {
                pause(self.config.branch_delay()).await;
            }
            let record = self.check_branch(repository, path, branch, inspector).await;
            records.branches.push(record);
        }
        records
    }

    async fn check_branch(
        &self,
        repository: &RepositoryId,
        path: &str,
        branch: &str,
        inspector: &Inspector,
    ) -> BranchRecord {
        let file = match self.host.get_file(repository, path, branch).await {
            Ok(Some(file)) => file,
            Ok(None) => {
                warn!(repo = %repository, branch = %branch, path = %path, "File not found");
                return BranchRecord::error(
                    branch,
                    ErrorKind::NotFound,
                    format!("'{path}' not found"),
                );
            }
            Err(e) => {
                warn!(repo = %repository, branch = %branch, error = %e, "Failed to fetch file");
                return BranchRecord::error(branch, ErrorKind::Api, e.to_string());
            }
        };

        match inspector.inspect(&file.content) {
            Ok(inspection) => {
                let record = BranchRecord::new(branch, inspection.into());
                debug!(repo = %repository, branch = %branch, found = %record.summary(), "Inspected branch");
                record
            }
            Err(e) => {
                warn!(repo = %repository, branch = %branch, error = %e, "Invalid content");
                BranchRecord::error(branch, ErrorKind::InvalidJson, e.to_string())
            }
        }
    }

    /// Opens an update PR for every candidate branch of `result`.
    ///
    /// In marker mode only `latest` branches are candidates; in the
    /// structured modes every successfully searched branch is.
    ///
    /// # Errors
    ///
    /// Returns [`CampaignError::PlanMismatch`] if the kind of request does
    /// not fit the mode of `result`. Per-branch failures are reported as
    /// [`PrStatus::Failed`] entries instead.
    pub async fn update(
        &self,
        result: &CampaignResult,
        plan: &UpdatePlan,
    ) -> Result<UpdateReport, CampaignError> {
        check_plan(result, plan)?;

        let candidates = result
            .update_candidates()
            .map(|(repository, branch)| Ok((RepositoryId::parse(repository)?, branch)))
            .collect::<Result<Vec<_>, crate::config::ConfigError>>()?;

        info!(count = candidates.len(), request = %plan.request(), "Starting update");
        let mut report = UpdateReport::default();

        for (index, (repository, branch)) in candidates.iter().enumerate() {
            if index > 0 {
                pause(self.config.branch_delay()).await;
            }

            let pr = match create_update_pr(
                self.host,
                plan,
                repository,
                branch,
                self.config.pr_step_delay(),
            )
            .await
            {
                Ok(pr) => pr,
                Err(e) => {
                    warn!(repo = %repository, branch = %branch, error = %e, "Failed to create PR");
                    UpdatePr::failed(repository, branch, &e)
                }
            };

            if let PrStatus::Skipped { reason } = &pr.status {
                info!(repo = %repository, branch = %branch, reason = %reason, "Skipped branch");
            }
            report.prs.push(pr);
        }

        info!(
            created = report.created(),
            skipped = report.skipped(),
            failed = report.failed(),
            "Update finished"
        );
        Ok(report)
    }
}

fn check_plan(result: &CampaignResult, plan: &UpdatePlan) -> Result<(), CampaignError> {
    if plan.request().is_marker() != (result.search_mode == SearchMode::Marker) {
        return Err(CampaignError::PlanMismatch {
            message: format!(
                "a {} update cannot be applied to {} results",
                if plan.request().is_marker() { "marker" } else { "key path" },
                result.search_mode
            ),
        });
    }
    Ok(())
}
