//! Show-results action and result rendering.

use super::prompt::ask;
use super::{Connect, Console, MenuError, Session};
use crate::results::deep_dive;
use crate::runner::{BranchRecord, CampaignResult};
use crate::summary::Buckets;

impl<C: Connect> Session<C> {
    pub(super) fn show_results<K: Console>(&mut self, console: &mut K) -> Result<(), MenuError> {
        let result = self.store.load()?;

        console.heading("Last results");
        console.info(&format!(
            "File '{}', branches '{}', {} mode",
            result.target_path, result.branch_pattern, result.search_mode
        ));
        if let Some(key) = &result.search_key {
            console.info(&format!("Key filter: {key}"));
        }
        if let Some(value) = &result.search_value {
            console.info(&format!("Value filter: {value}"));
        }
        render_campaign(console, &result);

        let urls = self.store.load_pr_urls()?;
        if !urls.is_empty() {
            console.heading("Created pull requests");
            for url in &urls {
                console.info(url);
            }
        }

        let repository = ask(console, "Repository to inspect (blank to skip)")?;
        if repository.is_empty() {
            return Ok(());
        }
        let Some(records) = result.repository(&repository) else {
            console.warn(&format!("No results for repository '{repository}'."));
            return Ok(());
        };

        let branch = ask(console, "Branch to inspect")?;
        match records.branch(&branch) {
            Some(record) => {
                console.heading(&format!("{repository} @ {branch}"));
                for line in deep_dive(record).lines() {
                    console.info(line);
                }
            }
            None => console.warn(&format!("No results for branch '{branch}'.")),
        }
        Ok(())
    }
}

/// Prints every repository's records grouped by outcome.
pub(super) fn render_campaign<K: Console>(console: &mut K, result: &CampaignResult) {
    for records in &result.repositories {
        console.heading(&records.repository);
        if let Some(error) = &records.error {
            console.error(&format!("  {error}"));
            continue;
        }

        let buckets = Buckets::from_records(&records.branches);
        if buckets.is_empty() {
            console.warn("  No matching branches.");
            continue;
        }

        render_bucket(console, "Fixed version", &buckets.fixed, Level::Info);
        render_bucket(console, "Latest version", &buckets.latest, Level::Success);
        render_bucket(console, "Unknown", &buckets.unknown, Level::Warn);
        render_bucket(console, "Search results", &buckets.searches, Level::Info);
        render_bucket(console, "Errors", &buckets.errors, Level::Error);
    }
}

#[derive(Clone, Copy)]
enum Level {
    Info,
    Success,
    Warn,
    Error,
}

fn render_bucket<K: Console>(console: &mut K, title: &str, records: &[&BranchRecord], level: Level) {
    if records.is_empty() {
        return;
    }
    console.info(&format!("  {title} ({}):", records.len()));
    for record in records {
        let line = format!("    {}: {}", record.branch, record.summary());
        match level {
            Level::Info => console.info(&line),
            Level::Success => console.success(&line),
            Level::Warn => console.warn(&line),
            Level::Error => console.error(&line),
        }
    }
}
