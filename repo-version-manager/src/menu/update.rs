//! Update action.

use super::prompt::{ask, ask_or_keep, ask_required, confirm};
use super::{Connect, Console, MenuError, Session};
use crate::config::{load_settings, ConfigError, SearchMode, Settings};
use crate::mutate::ValueKind;
use crate::pull_requests::{PrStatus, UpdatePlan, UpdateRequest};
use crate::runner::{CampaignResult, Runner};
use crate::summary::RunSummary;
use crate::templates::MessageFormats;

impl<C: Connect> Session<C> {
    pub(super) async fn update<K: Console>(&mut self, console: &mut K) -> Result<(), MenuError> {
        let result = self.store.load()?;
        let host = self.connect()?;
        let formats = self.message_formats()?;

        console.heading("Update branches");
        let candidates: Vec<(&str, &str)> = result.update_candidates().collect();
        if candidates.is_empty() {
            console.warn(match result.search_mode {
                SearchMode::Marker => "No branches with an open-ended version were found.",
                _ => "No branches with search results were found.",
            });
            return Ok(());
        }

        console.info(&format!("{} branches will be updated:", candidates.len()));
        for (repository, branch) in &candidates {
            console.info(&format!("  {repository} @ {branch}"));
        }

        let request = ask_request(console, &result)?;
        if !confirm(
            console,
            &format!("Create {} pull requests for {request}?", candidates.len()),
        )? {
            console.info("Update cancelled.");
            return Ok(());
        }

        let plan = UpdatePlan::for_result(&result, formats, request);
        let report = Runner::new(&host, self.runner_config)
            .update(&result, &plan)
            .await?;

        for pr in &report.prs {
            let target = format!("{} @ {}", pr.repository, pr.source_branch);
            match &pr.status {
                PrStatus::Created { url, .. } => console.success(&format!("{target}: {url}")),
                PrStatus::Skipped { reason } => console.warn(&format!("{target}: skipped, {reason}")),
                PrStatus::Failed { error } => console.error(&format!("{target}: {error}")),
            }
        }

        if self.store.save_pr_urls(&report.created_urls())? {
            console.info(&format!(
                "PR links saved to {}.",
                self.store.pr_list_path().display()
            ));
        }

        let mut summary = RunSummary::default();
        summary.record_update(&report);
        let line = format!(
            "{} created, {} skipped, {} failed.",
            summary.prs_created, summary.prs_skipped, summary.prs_failed
        );
        if summary.has_failures() {
            console.warn(&line);
        } else {
            console.success(&line);
        }
        Ok(())
    }
}

impl<C> Session<C> {
    fn message_formats(&self) -> Result<MessageFormats, MenuError> {
        let settings = match load_settings(&self.settings_path) {
            Ok(settings) => settings,
            Err(ConfigError::MissingFile { .. }) => Settings::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(settings.message_formats())
    }
}

fn ask_request<K: Console>(
    console: &mut K,
    result: &CampaignResult,
) -> Result<UpdateRequest, MenuError> {
    if result.search_mode == SearchMode::Marker {
        let version = ask_required(console, "New version")?;
        return Ok(UpdateRequest::Marker { version });
    }

    let path = ask_required(console, "Key path to update (e.g. dependencies.ck.version)")?;
    let value = ask(console, "New value")?;
    let kind = ask_or_keep(console, "Value type (string, number, boolean)", "string")?;
    let kind = ValueKind::parse(&kind)
        .ok_or_else(|| MenuError::input(format!("Unknown value type '{kind}'")))?;
    kind.coerce(&value)
        .map_err(|e| MenuError::input(e.to_string()))?;

    Ok(UpdateRequest::JsonPath { path, value, kind })
}
