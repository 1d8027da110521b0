//! Runner error types.

/// Errors that stop a campaign before any repository is processed.
#[derive(Debug, thiserror::Error)]
pub enum CampaignError {
    /// The settings are incomplete or invalid.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// The update does not fit the stored results.
    #[error("{message}")]
    PlanMismatch { message: String },
}
