//! Template rendering using Handlebars.
//!
//! Working branch names, PR titles and bodies, commit messages and the
//! marker replacement are all rendered from formats stored in the settings.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, TemplateRenderer};

use bstr::ByteSlice;
use serde::Serialize;

/// Variables available to every format.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateContext {
    /// Repository in `owner/name` form.
    pub repository: String,

    /// Branch being updated.
    pub branch: String,

    /// New version or value being written.
    pub version: String,

    /// Path of the updated file.
    pub target_path: String,

    /// What is updated: the marker name or the JSON key path.
    pub subject: String,

    /// Search mode of the campaign (`marker`, `full_dump`, `key_value`).
    pub mode: String,
}

/// Formats used when opening an update PR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageFormats {
    /// Text written after the marker prefix.
    pub marker: String,

    /// Working branch name.
    pub branch_name: String,

    /// PR title.
    pub pr_title: String,

    /// PR body.
    pub pr_body: String,

    /// Commit message.
    pub commit_message: String,
}

/// Rendered texts for one update PR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTexts {
    /// Working branch name (validated).
    pub branch_name: String,

    /// PR title.
    pub title: String,

    /// PR body.
    pub body: String,

    /// Commit message.
    pub commit_message: String,
}

impl UpdateTexts {
    /// Renders every format for `context`.
    ///
    /// # Errors
    ///
    /// Returns an error if a format fails to render or the branch name is not
    /// a valid reference name.
    pub fn render(
        renderer: &TemplateRenderer,
        formats: &MessageFormats,
        context: &TemplateContext,
    ) -> Result<Self, TemplateError> {
        let branch_name = renderer.render(&formats.branch_name, context)?;
        validate_branch_name(&branch_name)?;

        Ok(Self {
            branch_name,
            title: renderer.render(&formats.pr_title, context)?,
            body: renderer.render(&formats.pr_body, context)?,
            commit_message: renderer.render(&formats.commit_message, context)?,
        })
    }
}

/// Checks that `name` can be used as a branch name.
///
/// # Errors
///
/// Returns [`TemplateError::InvalidBranchName`] otherwise.
pub fn validate_branch_name(name: &str) -> Result<(), TemplateError> {
    gix_validate::reference::name_partial(name.as_bytes().as_bstr())
        .map(|_| ())
        .map_err(|e| TemplateError::InvalidBranchName {
            name: name.to_string(),
            message: e.to_string(),
        })
}

/// Name used for the marker in titles: the prefix without trailing `/`.
#[must_use]
pub fn marker_subject(prefix: &str) -> String {
    prefix.trim().trim_end_matches('/').to_string()
}
