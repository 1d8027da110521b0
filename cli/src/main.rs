//! CLI for the repository version manager.
//!
//! Shows an interactive menu to check a dependency version marker (or JSON
//! values) across the release branches of many repositories and to open
//! update pull requests.

mod console;

use clap::Parser;
use console::TerminalConsole;
use repo_version_manager::github::ClientConfig;
use repo_version_manager::menu::{run_menu, GitHubConnector, Session};
use repo_version_manager::results::{ResultsStore, DEFAULT_PR_LIST_FILE, DEFAULT_RESULTS_FILE};
use repo_version_manager::runner::RunnerConfig;
use std::future::Future;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use url::Url;

/// Repository Version Manager - Check and update dependency versions across release branches.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the settings file.
    #[arg(long, default_value = "config.json")]
    settings: PathBuf,

    /// Path to the results of the last check.
    #[arg(long, default_value = DEFAULT_RESULTS_FILE)]
    results: PathBuf,

    /// Path to the list of created pull requests.
    #[arg(long, default_value = DEFAULT_PR_LIST_FILE)]
    pr_list: PathBuf,

    /// GitHub API base URL, for GitHub Enterprise (e.g. https://ghe.example.com/api/v3).
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<Url>,

    /// GitHub Personal Access Token. Can also be set from the menu.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Pause between branches, in milliseconds.
    #[arg(long, default_value_t = 500)]
    branch_delay_ms: u64,

    /// Pause between repositories, in milliseconds.
    #[arg(long, default_value_t = 500)]
    repo_delay_ms: u64,

    /// Pause between the API calls that open one PR, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    pr_step_delay_ms: u64,

    /// Maximum branches listed per repository.
    #[arg(long)]
    branch_limit: Option<usize>,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    // The menu blocks the main thread on stdin, so the signal is handled
    // on a worker.
    tokio::spawn(async {
        let mut stdout = io::stdout();
        if wait_for_interrupt(tokio::signal::ctrl_c(), &mut stdout).await {
            std::process::exit(0);
        }
    });

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Critical failure");
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output) on stderr
/// - Log level filtering via `RUST_LOG` env var (defaults to "warn" so the
///   menu stays readable)
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}

/// Waits for `signal` and says goodbye on `output`.
///
/// Returns false if the signal handler could not be installed.
async fn wait_for_interrupt<F, W>(signal: F, output: &mut W) -> bool
where
    F: Future<Output = io::Result<()>>,
    W: Write,
{
    match signal.await {
        Ok(()) => {
            let _ = writeln!(output, "\nInterrupted. Goodbye.");
            let _ = output.flush();
            true
        }
        Err(e) => {
            error!(error = %e, "Failed to listen for Ctrl+C");
            false
        }
    }
}

/// Main execution logic.
async fn run(args: Args) -> Result<(), repo_version_manager::menu::MenuError> {
    let runner_config = RunnerConfig::new()
        .with_branch_delay(Duration::from_millis(args.branch_delay_ms))
        .with_repo_delay(Duration::from_millis(args.repo_delay_ms))
        .with_pr_step_delay(Duration::from_millis(args.pr_step_delay_ms))
        .with_branch_limit(args.branch_limit);

    let mut session = Session::new(
        GitHubConnector,
        args.settings,
        ResultsStore::new(args.results, args.pr_list),
        ClientConfig::new(args.api_url, args.token),
        runner_config,
    );

    let stdin = io::stdin();
    let mut console = TerminalConsole::new(stdin.lock(), io::stdout());
    run_menu(&mut session, &mut console).await
}
