//! Menu action error types.

use crate::config::ConfigError;
use crate::github::ApiError;
use crate::results::StoreError;
use crate::runner::CampaignError;
use thiserror::Error;

/// Errors that end a menu action early.
#[derive(Debug, Error)]
pub enum MenuError {
    /// Settings could not be loaded, saved or validated.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Results could not be loaded or saved.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The campaign could not start.
    #[error(transparent)]
    Campaign(#[from] CampaignError),

    /// The client could not be created.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Required input was empty or malformed.
    #[error("{message}")]
    Input { message: String },

    /// Reading from the console failed.
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// The console reached end of input.
    #[error("End of input")]
    EndOfInput,
}

impl MenuError {
    /// Suggests the menu action that resolves this error.
    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Config(ConfigError::MissingFile { .. })
            | Self::Campaign(CampaignError::Config(ConfigError::MissingFile { .. })) => {
                Some("Choose B) Edit configuration to create the settings file.")
            }
            Self::Config(_) | Self::Campaign(CampaignError::Config(_)) => {
                Some("Choose B) Edit configuration to fix the settings.")
            }
            Self::Store(StoreError::MissingFile { .. })
            | Self::Campaign(CampaignError::PlanMismatch { .. }) => {
                Some("Choose A) Check branches first.")
            }
            Self::Api(ApiError::MissingToken) => Some("Choose E) Configure GitHub token first."),
            _ => None,
        }
    }

    pub(crate) fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_point_to_producing_action() {
        let missing_settings = MenuError::Config(ConfigError::MissingFile {
            path: "config.json".to_string(),
        });
        assert!(missing_settings.hint().unwrap().starts_with("Choose B)"));

        let missing_results = MenuError::Store(StoreError::MissingFile {
            path: "output.json".to_string(),
        });
        assert!(missing_results.hint().unwrap().starts_with("Choose A)"));

        assert!(MenuError::Api(ApiError::MissingToken)
            .hint()
            .unwrap()
            .starts_with("Choose E)"));
        assert_eq!(MenuError::input("empty").hint(), None);
    }
}
