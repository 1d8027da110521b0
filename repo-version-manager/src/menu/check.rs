//! Check action.

use super::{show_results::render_campaign, Connect, Console, MenuError, Session};
use crate::config::load_settings;
use crate::runner::Runner;
use crate::summary::RunSummary;

impl<C: Connect> Session<C> {
    pub(super) async fn check<K: Console>(&mut self, console: &mut K) -> Result<(), MenuError> {
        let settings = load_settings(&self.settings_path)?;
        settings.validate()?;
        let host = self.connect()?;

        console.heading("Check branches");
        console.info(&format!(
            "Checking '{}' on branches matching '{}' in {} repositories ({} mode)...",
            settings.target_path,
            settings.branch_pattern,
            settings.repos.len(),
            settings.search_mode
        ));

        let result = Runner::new(&host, self.runner_config)
            .check(&settings)
            .await?;
        self.store.save(&result)?;

        render_campaign(console, &result);

        let summary = RunSummary::from_campaign(&result);
        let line = format!(
            "Checked {} branches in {} repositories: {} fixed, {} latest, {} unknown, {} searched, {} errors.",
            summary.branches,
            summary.repositories,
            summary.fixed,
            summary.latest,
            summary.unknown,
            summary.searched,
            summary.errors
        );
        if summary.has_failures() {
            console.warn(&line);
        } else {
            console.success(&line);
        }
        console.info(&format!(
            "Results saved to {}.",
            self.store.results_path().display()
        ));
        Ok(())
    }
}
