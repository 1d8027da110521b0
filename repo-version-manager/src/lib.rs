#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod github;
pub mod inspect;
pub mod menu;
pub mod mutate;
pub mod pull_requests;
pub mod rate_limit;
pub mod results;
pub mod runner;
pub mod summary;
pub mod templates;
pub mod testing;

pub use config::{
    load_or_create_settings, load_settings, save_settings, ConfigError, SearchMode, Settings,
};
pub use github::{ApiError, ClientConfig, GitHubClient, RepositoryHost, RepositoryId};
pub use inspect::{Inspection, Inspector, SearchFilter, VersionClass};
pub use menu::{run_menu, Command, Console, Flow, GitHubConnector, MenuError, Session};
pub use mutate::{rewrite_marker, update_json_path, MutateError, ValueKind};
pub use pull_requests::{create_update_pr, PrError, PrStatus, UpdatePlan, UpdatePr, UpdateRequest};
pub use results::{ResultsStore, StoreError};
pub use runner::{
    BranchOutcome, BranchRecord, CampaignError, CampaignResult, ErrorKind, RepositoryRecords,
    Runner, RunnerConfig, UpdateReport,
};
pub use summary::{Buckets, RunSummary};
pub use templates::{TemplateError, TemplateRenderer};
