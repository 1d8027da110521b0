//! Edit-configuration action.

use super::prompt::{ask, ask_or_keep};
use super::{Connect, Console, MenuError, Session};
use crate::config::{load_or_create_settings, save_settings, SearchMode, Settings};
use crate::github::RepositoryId;

impl<C: Connect> Session<C> {
    pub(super) fn edit_config<K: Console>(&mut self, console: &mut K) -> Result<(), MenuError> {
        let (mut settings, created) = load_or_create_settings(&self.settings_path)?;
        console.heading("Edit configuration");
        if created {
            console.info(&format!(
                "Created default settings at {}.",
                self.settings_path.display()
            ));
        }
        console.info("Press Enter to keep the current value.");

        settings.target_path = ask_or_keep(console, "Target file path", &settings.target_path)?;
        settings.branch_pattern =
            ask_or_keep(console, "Branch pattern", &settings.branch_pattern)?;
        edit_repositories(console, &mut settings)?;
        edit_search(console, &mut settings)?;

        save_settings(&self.settings_path, &settings)?;
        console.success(&format!(
            "Settings saved to {}.",
            self.settings_path.display()
        ));
        if let Err(e) = settings.validate() {
            console.warn(&format!("Settings are not ready for a check yet: {e}"));
        }
        Ok(())
    }
}

fn edit_repositories<K: Console>(console: &mut K, settings: &mut Settings) -> Result<(), MenuError> {
    if settings.repos.is_empty() {
        console.info("No repositories configured.");
    } else {
        console.info("Current repositories:");
        for repo in &settings.repos {
            console.info(&format!("  {repo}"));
        }
    }

    let choice = ask(console, "Repositories: (k)eep, (n)ew list, (c)lear [k]")?;
    match choice.to_ascii_lowercase().as_str() {
        "" | "k" | "keep" => {}
        "c" | "clear" => {
            settings.repos.clear();
            console.info("Repository list cleared.");
        }
        "n" | "new" => {
            let mut repos = Vec::new();
            loop {
                let entry = ask(console, "Repository owner/name (blank to finish)")?;
                if entry.is_empty() {
                    break;
                }
                match RepositoryId::parse(&entry) {
                    Ok(id) => repos.push(id.full_name()),
                    Err(e) => console.warn(&e.to_string()),
                }
            }
            console.info(&format!("{} repositories entered.", repos.len()));
            settings.repos = repos;
        }
        other => console.warn(&format!("Unknown choice '{other}', keeping repositories.")),
    }
    Ok(())
}

fn edit_search<K: Console>(console: &mut K, settings: &mut Settings) -> Result<(), MenuError> {
    let modes = SearchMode::ALL.map(SearchMode::as_str).join(", ");
    let answer = ask_or_keep(
        console,
        &format!("Search mode ({modes})"),
        settings.search_mode.as_str(),
    )?;
    match SearchMode::parse(&answer) {
        Some(mode) => settings.search_mode = mode,
        None => console.warn(&format!(
            "Unknown search mode '{answer}', keeping {}.",
            settings.search_mode
        )),
    }

    match settings.search_mode {
        SearchMode::Marker => {
            settings.marker_prefix =
                ask_or_keep(console, "Marker prefix", &settings.marker_prefix)?;
        }
        SearchMode::KeyValue => {
            settings.search_key = ask_filter(console, "Search key", settings.search_key.take())?;
            settings.search_value =
                ask_filter(console, "Search value", settings.search_value.take())?;
        }
        SearchMode::FullDump => {}
    }
    Ok(())
}

/// Asks for an optional filter; `-` clears it.
fn ask_filter<K: Console>(
    console: &mut K,
    label: &str,
    current: Option<String>,
) -> Result<Option<String>, MenuError> {
    let shown = current.as_deref().unwrap_or("none");
    let answer = ask(console, &format!("{label}, '-' to clear [{shown}]"))?;
    Ok(match answer.as_str() {
        "" => current,
        "-" => None,
        _ => Some(answer),
    })
}
