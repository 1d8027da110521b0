//! Interactive menu.
//!
//! [`Session`] owns everything an action needs; all terminal I/O goes
//! through a [`Console`] so the loop can be driven by a script in tests.

mod check;
mod command;
mod console;
mod edit_config;
mod error;
mod prompt;
mod show_results;
mod token;
mod update;

pub use command::Command;
pub use console::Console;
pub use error::MenuError;

use crate::github::{ApiError, ClientConfig, GitHubClient, RepositoryHost};
use crate::results::ResultsStore;
use crate::runner::RunnerConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Builds a host from the session's client configuration.
pub trait Connect {
    /// Host type produced.
    type Host: RepositoryHost;

    /// Creates a host for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingToken`] if no token is configured, or a
    /// client error.
    fn connect(&self, config: &ClientConfig) -> Result<Self::Host, ApiError>;
}

/// Connects to GitHub through octocrab.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitHubConnector;

impl Connect for GitHubConnector {
    type Host = GitHubClient;

    fn connect(&self, config: &ClientConfig) -> Result<Self::Host, ApiError> {
        GitHubClient::new(config)
    }
}

/// Whether the menu loop continues after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Show the menu again.
    Continue,
    /// Leave the loop.
    Exit,
}

/// State shared by the menu actions.
#[derive(Debug)]
pub struct Session<C> {
    connector: C,
    settings_path: PathBuf,
    store: ResultsStore,
    client_config: ClientConfig,
    runner_config: RunnerConfig,
}

impl<C: Connect> Session<C> {
    /// Creates a session.
    pub fn new(
        connector: C,
        settings_path: impl Into<PathBuf>,
        store: ResultsStore,
        client_config: ClientConfig,
        runner_config: RunnerConfig,
    ) -> Self {
        Self {
            connector,
            settings_path: settings_path.into(),
            store,
            client_config,
            runner_config,
        }
    }

    /// Path of the settings file.
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Store holding the last results.
    pub fn store(&self) -> &ResultsStore {
        &self.store
    }

    /// Current client configuration.
    pub fn client_config(&self) -> &ClientConfig {
        &self.client_config
    }

    /// Runs one command.
    ///
    /// # Errors
    ///
    /// Returns the error that ended the action. The session stays usable.
    pub async fn dispatch<K: Console>(
        &mut self,
        command: Command,
        console: &mut K,
    ) -> Result<Flow, MenuError> {
        debug!(?command, "Dispatching command");
        match command {
            Command::Check => self.check(console).await?,
            Command::EditConfig => self.edit_config(console)?,
            Command::Update => self.update(console).await?,
            Command::ShowResults => self.show_results(console)?,
            Command::ConfigureToken => self.configure_token(console)?,
            Command::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    fn connect(&self) -> Result<C::Host, MenuError> {
        Ok(self.connector.connect(&self.client_config)?)
    }
}

/// Shows the menu and runs commands until exit or end of input.
///
/// Errors of single actions are printed with a hint and the loop
/// continues.
///
/// # Errors
///
/// Returns an error only if the console fails.
pub async fn run_menu<C: Connect, K: Console>(
    session: &mut Session<C>,
    console: &mut K,
) -> Result<(), MenuError> {
    loop {
        console.heading("Repository version manager");
        for command in Command::ALL {
            console.info(&command.to_string());
        }

        let Some(choice) = console.prompt("Choose an option")? else {
            return Ok(());
        };
        let Some(command) = Command::parse(&choice) else {
            console.warn(&format!(
                "Unknown option '{}'. Enter a letter from A to F.",
                choice.trim()
            ));
            continue;
        };

        match session.dispatch(command, console).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => {
                console.info("Goodbye.");
                return Ok(());
            }
            Err(MenuError::EndOfInput) => return Ok(()),
            Err(MenuError::Io(e)) => return Err(MenuError::Io(e)),
            Err(e) => {
                console.error(&e.to_string());
                if let Some(hint) = e.hint() {
                    console.info(hint);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_settings, save_settings, SearchMode, Settings};
    use crate::testing::{InMemoryHost, Output, ScriptedConsole};
    use std::fs;
    use tempfile::TempDir;

    const REPO: &str = "acme/widgets";
    const PATH: &str = "conanrecipe_ckit.txt";

    fn host() -> InMemoryHost {
        InMemoryHost::new()
            .with_file(REPO, "release/1.0", PATH, "constructionkit/[1.2.0]@spx00/release\n")
            .with_file(REPO, "release/1.1", PATH, "constructionkit/[1.3.0]@spx00/release\n")
            .with_file(REPO, "release/2.0", PATH, "constructionkit/[>=1.0.0]@spx00/release\n")
    }

    fn session(dir: &TempDir, host: &InMemoryHost) -> Session<InMemoryHost> {
        Session::new(
            host.clone(),
            dir.path().join("config.json"),
            ResultsStore::new(dir.path().join("output.json"), dir.path().join("created_prs.txt")),
            ClientConfig::default(),
            RunnerConfig::immediate(),
        )
    }

    #[tokio::test]
    async fn exit_and_end_of_input_leave_the_loop() {
        let dir = TempDir::new().unwrap();
        let host = InMemoryHost::new();

        let mut console = ScriptedConsole::new(["f"]);
        run_menu(&mut session(&dir, &host), &mut console).await.unwrap();
        assert!(console.printed("Goodbye."));

        let mut console = ScriptedConsole::new(Vec::<String>::new());
        run_menu(&mut session(&dir, &host), &mut console).await.unwrap();
        assert!(!console.printed("Goodbye."));
    }

    #[tokio::test]
    async fn unknown_option_is_rejected_with_hint() {
        let dir = TempDir::new().unwrap();
        let mut console = ScriptedConsole::new(["z", "F"]);

        run_menu(&mut session(&dir, &InMemoryHost::new()), &mut console)
            .await
            .unwrap();

        assert!(console
            .output()
            .contains(&Output::Warn("Unknown option 'z'. Enter a letter from A to F.".to_string())));
    }

    #[tokio::test]
    async fn actions_without_prerequisites_point_to_producing_action() {
        let dir = TempDir::new().unwrap();
        let host = host();
        let mut session = session(&dir, &host);
        let mut console = ScriptedConsole::new(["a", "c", "f"]);

        run_menu(&mut session, &mut console).await.unwrap();

        assert!(console.printed("Settings file not found"));
        assert!(console.printed("Choose B) Edit configuration"));
        assert!(console.printed("Results file not found"));
        assert!(console.printed("Choose A) Check branches first."));
        assert!(host.calls().is_empty());
    }

    #[tokio::test]
    async fn check_requires_token() {
        let dir = TempDir::new().unwrap();
        let settings = Settings {
            repos: vec![REPO.to_string()],
            ..Settings::default()
        };
        save_settings(&dir.path().join("config.json"), &settings).unwrap();
        let host = host();
        let mut session = session(&dir, &host);
        let mut console = ScriptedConsole::new(Vec::<String>::new());

        let error = session
            .dispatch(Command::Check, &mut console)
            .await
            .unwrap_err();

        assert!(matches!(error, MenuError::Api(ApiError::MissingToken)));
        assert_eq!(error.hint(), Some("Choose E) Configure GitHub token first."));
    }

    #[tokio::test]
    async fn edit_config_creates_and_updates_settings() {
        let dir = TempDir::new().unwrap();
        let host = InMemoryHost::new();
        let mut session = session(&dir, &host);
        let mut console = ScriptedConsole::new([
            "deps.json",
            "",
            "n",
            "acme/widgets",
            "not-a-repo",
            "acme/gadgets",
            "",
            "key-value",
            "version",
            "",
        ]);

        let flow = session
            .dispatch(Command::EditConfig, &mut console)
            .await
            .unwrap();

        assert_eq!(flow, Flow::Continue);
        assert!(console.printed("Created default settings"));
        assert!(console.printed("Invalid repository 'not-a-repo'"));

        let settings = load_settings(session.settings_path()).unwrap();
        assert_eq!(settings.target_path, "deps.json");
        assert_eq!(settings.branch_pattern, "release/*");
        assert_eq!(settings.repos, vec!["acme/widgets", "acme/gadgets"]);
        assert_eq!(settings.search_mode, SearchMode::KeyValue);
        assert_eq!(settings.search_key.as_deref(), Some("version"));
        assert_eq!(settings.search_value, None);
    }

    #[tokio::test]
    async fn edit_config_keeps_and_clears_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        save_settings(
            &path,
            &Settings {
                repos: vec![REPO.to_string()],
                search_mode: SearchMode::KeyValue,
                search_key: Some("version".to_string()),
                search_value: Some("1.0".to_string()),
                ..Settings::default()
            },
        )
        .unwrap();
        let host = InMemoryHost::new();
        let mut session = session(&dir, &host);
        let mut console = ScriptedConsole::new(["", "", "", "", "", "-"]);

        session
            .dispatch(Command::EditConfig, &mut console)
            .await
            .unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.repos, vec![REPO]);
        assert_eq!(settings.search_key.as_deref(), Some("version"));
        assert_eq!(settings.search_value, None);
    }

    #[tokio::test]
    async fn token_is_replaced_for_the_session_only() {
        let dir = TempDir::new().unwrap();
        let host = InMemoryHost::new();
        let mut session = session(&dir, &host);
        let mut console = ScriptedConsole::new(["ghp_secret"]);

        session
            .dispatch(Command::ConfigureToken, &mut console)
            .await
            .unwrap();

        assert_eq!(session.client_config().token(), Some("ghp_secret"));
        assert!(!session.settings_path().exists());
    }

    #[tokio::test]
    async fn full_campaign_through_the_menu() {
        let dir = TempDir::new().unwrap();
        let host = host();
        let mut session = session(&dir, &host);
        let mut console = ScriptedConsole::new([
            // edit configuration
            "b", "", "", "n", REPO, "", "", "",
            // token
            "e", "ghp_secret",
            // check
            "a",
            // update
            "c", "1.45.0", "y",
            // show results with deep dive
            "d", REPO, "release/2.0",
            "f",
        ]);

        run_menu(&mut session, &mut console).await.unwrap();

        assert!(console.errors().is_empty(), "{:?}", console.errors());
        assert_eq!(console.remaining(), 0);
        assert!(console.printed("1 latest"));
        assert!(console.printed("1 created, 0 skipped, 0 failed."));
        assert!(console.printed("constructionkit/[>=1.0.0]@spx00/release (latest)"));

        assert_eq!(host.pull_requests().len(), 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("created_prs.txt")).unwrap(),
            "https://github.com/acme/widgets/pull/1\n"
        );
        assert!(dir.path().join("output.json").exists());
    }

    #[tokio::test]
    async fn update_requires_token_before_asking_for_a_version() {
        let dir = TempDir::new().unwrap();
        let host = host();
        let mut session = session(&dir, &host);
        save_settings(
            session.settings_path(),
            &Settings {
                repos: vec![REPO.to_string()],
                ..Settings::default()
            },
        )
        .unwrap();
        let mut console = ScriptedConsole::new(["e", "t", "a", "f"]);
        run_menu(&mut session, &mut console).await.unwrap();
        assert!(session.store().results_path().exists());

        let mut fresh = Session::new(
            host.clone(),
            dir.path().join("config.json"),
            ResultsStore::new(dir.path().join("output.json"), dir.path().join("created_prs.txt")),
            ClientConfig::default(),
            RunnerConfig::immediate(),
        );
        let mut console = ScriptedConsole::new(["1.45.0", "y"]);
        let error = fresh
            .dispatch(Command::Update, &mut console)
            .await
            .unwrap_err();

        assert!(matches!(error, MenuError::Api(ApiError::MissingToken)));
        assert_eq!(console.remaining(), 2);
        assert!(host.pull_requests().is_empty());
    }

    #[tokio::test]
    async fn update_follows_stored_results_not_edited_settings() {
        let dir = TempDir::new().unwrap();
        let host = host();
        let mut session = session(&dir, &host);
        save_settings(
            session.settings_path(),
            &Settings {
                repos: vec![REPO.to_string()],
                ..Settings::default()
            },
        )
        .unwrap();
        let mut console = ScriptedConsole::new(["e", "t", "a", "f"]);
        run_menu(&mut session, &mut console).await.unwrap();

        save_settings(
            session.settings_path(),
            &Settings {
                repos: vec![REPO.to_string()],
                target_path: "deps.json".to_string(),
                search_mode: SearchMode::FullDump,
                marker_prefix: "other/".to_string(),
                ..Settings::default()
            },
        )
        .unwrap();
        let mut console = ScriptedConsole::new(["c", "1.45.0", "y", "f"]);
        run_menu(&mut session, &mut console).await.unwrap();

        assert!(console.errors().is_empty(), "{:?}", console.errors());
        assert!(console.printed("1 created, 0 skipped, 0 failed."));
        assert_eq!(
            host.file_content(REPO, "update-version-1.45.0-release/2.0", PATH)
                .as_deref(),
            Some("constructionkit/1.45.0@spx00/release\n")
        );
    }

    #[tokio::test]
    async fn update_falls_back_to_default_formats_without_settings() {
        let dir = TempDir::new().unwrap();
        let host = host();
        let mut session = session(&dir, &host);
        save_settings(
            session.settings_path(),
            &Settings {
                repos: vec![REPO.to_string()],
                ..Settings::default()
            },
        )
        .unwrap();
        let mut console = ScriptedConsole::new(["e", "t", "a", "f"]);
        run_menu(&mut session, &mut console).await.unwrap();

        fs::remove_file(session.settings_path()).unwrap();
        let mut console = ScriptedConsole::new(["c", "1.45.0", "y", "f"]);
        run_menu(&mut session, &mut console).await.unwrap();

        assert!(console.errors().is_empty(), "{:?}", console.errors());
        assert_eq!(host.pull_requests().len(), 1);
    }

    #[tokio::test]
    async fn cancelled_update_opens_nothing() {
        let dir = TempDir::new().unwrap();
        let host = host();
        let mut session = session(&dir, &host);
        save_settings(
            session.settings_path(),
            &Settings {
                repos: vec![REPO.to_string()],
                ..Settings::default()
            },
        )
        .unwrap();
        let mut console = ScriptedConsole::new(["e", "t", "a", "c", "1.45.0", "n", "f"]);

        run_menu(&mut session, &mut console).await.unwrap();

        assert!(console.printed("Update cancelled."));
        assert!(host.pull_requests().is_empty());
        assert!(!dir.path().join("created_prs.txt").exists());
    }
}
