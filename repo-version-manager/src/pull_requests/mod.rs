//! Pull request creation for version updates.
//!
//! Every step goes through the [`RepositoryHost`] API; nothing is cloned
//! locally. A failed step leaves earlier steps in place.

mod error;
mod plan;
mod request;
mod status;
mod update_pr;

pub use error::PrError;
pub use plan::UpdatePlan;
pub use request::UpdateRequest;
pub use status::PrStatus;
pub use update_pr::UpdatePr;

use crate::github::{FileWrite, PullRequestSpec, RepositoryHost, RepositoryId};
use crate::rate_limit::pause;
use crate::templates::{TemplateContext, UpdateTexts};
use std::time::Duration;
use tracing::{debug, info, info_span, Instrument};

/// Opens a PR applying `plan` to `branch`.
///
/// This function:
/// 1. Renders the texts and validates the working branch name
/// 2. Creates the working branch from the tip of `branch`
/// 3. Fetches the target file and applies the change
/// 4. Commits the result to the working branch
/// 5. Opens a PR from the working branch into `branch`
///
/// `step_delay` is slept between API calls.
///
/// # Returns
///
/// An [`UpdatePr`] that is either created or skipped because the file
/// already holds the requested content.
///
/// # Errors
///
/// Returns the first failing step. A working branch created before the
/// failure is left in place.
pub async fn create_update_pr<H: RepositoryHost>(
    host: &H,
    plan: &UpdatePlan,
    repository: &RepositoryId,
    branch: &str,
    step_delay: Duration,
) -> Result<UpdatePr, PrError> {
    let span = info_span!(
        "create_update_pr",
        repo = %repository,
        branch = %branch
    );

    async {
        info!(request = %plan.request(), "Creating update PR");

        let context = TemplateContext {
            repository: repository.full_name(),
            branch: branch.to_string(),
            version: plan.request().version().to_string(),
            target_path: plan.target_path().to_string(),
            subject: plan.request().subject(plan.marker_prefix()),
            mode: plan.mode().as_str().to_string(),
        };
        let texts = UpdateTexts::render(plan.renderer(), plan.formats(), &context)?;
        let marker_suffix = if plan.request().is_marker() {
            plan.renderer().render(&plan.formats().marker, &context)?
        } else {
            String::new()
        };

        let tip = host
            .branch_tip(repository, branch)
            .await
            .map_err(PrError::api("read branch tip"))?;
        debug!(sha = %tip, "Resolved branch tip");
        pause(step_delay).await;

        host.create_branch(repository, &texts.branch_name, &tip)
            .await
            .map_err(PrError::api("create branch"))?;
        debug!(working_branch = %texts.branch_name, "Created working branch");
        pause(step_delay).await;

        let file = host
            .get_file(repository, plan.target_path(), branch)
            .await
            .map_err(PrError::api("fetch file"))?
            .ok_or_else(|| PrError::FileMissing {
                path: plan.target_path().to_string(),
                branch: branch.to_string(),
            })?;

        let updated = plan
            .request()
            .apply(&file.content, plan.marker_prefix(), &marker_suffix)?;

        let mut pr = UpdatePr {
            repository: repository.full_name(),
            source_branch: branch.to_string(),
            working_branch: Some(texts.branch_name.clone()),
            title: Some(texts.title.clone()),
            status: PrStatus::Skipped {
                reason: "file already up to date".to_string(),
            },
        };

        if updated == file.content {
            info!("File already up to date");
            return Ok(pr);
        }
        pause(step_delay).await;

        host.put_file(
            repository,
            FileWrite {
                path: plan.target_path(),
                branch: &texts.branch_name,
                content: &updated,
                sha: &file.sha,
                message: &texts.commit_message,
            },
        )
        .await
        .map_err(PrError::api("commit file"))?;
        pause(step_delay).await;

        let created = host
            .create_pull_request(
                repository,
                PullRequestSpec {
                    head: &texts.branch_name,
                    base: branch,
                    title: &texts.title,
                    body: &texts.body,
                },
            )
            .await
            .map_err(PrError::api("open pull request"))?;

        info!(pr_number = created.number, url = %created.url, "PR created successfully");
        pr.status = PrStatus::Created {
            number: created.number,
            url: created.url,
        };
        Ok(pr)
    }
    .instrument(span)
    .await
}
