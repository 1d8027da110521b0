//! Pull request error types.

use crate::github::ApiError;
use crate::mutate::MutateError;
use crate::templates::TemplateError;
use thiserror::Error;

/// Errors that can occur while opening an update PR.
#[derive(Debug, Error)]
pub enum PrError {
    /// An API call failed.
    #[error("{step} failed: {source}")]
    Api {
        /// Step that failed.
        step: &'static str,
        #[source]
        source: ApiError,
    },

    /// A format failed to render, or produced an invalid branch name.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The file content could not be updated.
    #[error(transparent)]
    Mutate(#[from] MutateError),

    /// The target file is not on the source branch.
    #[error("'{path}' not found on branch '{branch}'")]
    FileMissing { path: String, branch: String },
}

impl PrError {
    pub(crate) fn api(step: &'static str) -> impl FnOnce(ApiError) -> Self {
        move |source| Self::Api { step, source }
    }
}
