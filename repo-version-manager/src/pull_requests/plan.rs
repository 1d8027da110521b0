//! Everything needed to open update PRs for one run.

use super::UpdateRequest;
use crate::config::SearchMode;
use crate::runner::CampaignResult;
use crate::templates::{MessageFormats, TemplateRenderer};

/// The change to apply plus the formats used to describe it.
#[derive(Debug)]
pub struct UpdatePlan {
    request: UpdateRequest,
    mode: SearchMode,
    target_path: String,
    marker_prefix: String,
    formats: MessageFormats,
    renderer: TemplateRenderer,
}

impl UpdatePlan {
    /// Creates a plan.
    #[must_use]
    pub fn new(
        request: UpdateRequest,
        mode: SearchMode,
        target_path: impl Into<String>,
        marker_prefix: impl Into<String>,
        formats: MessageFormats,
    ) -> Self {
        Self {
            request,
            mode,
            target_path: target_path.into(),
            marker_prefix: marker_prefix.into(),
            formats,
            renderer: TemplateRenderer::new(),
        }
    }

    /// Creates a plan for the file and marker recorded in `result`.
    ///
    /// Only the message formats come from outside the stored results.
    #[must_use]
    pub fn for_result(
        result: &CampaignResult,
        formats: MessageFormats,
        request: UpdateRequest,
    ) -> Self {
        Self::new(
            request,
            result.search_mode,
            result.target_path.clone(),
            result.marker_prefix.clone(),
            formats,
        )
    }

    /// The change applied to each branch.
    #[must_use]
    pub fn request(&self) -> &UpdateRequest {
        &self.request
    }

    /// Search mode the candidates were inspected with.
    #[must_use]
    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Path of the file that is updated.
    #[must_use]
    pub fn target_path(&self) -> &str {
        &self.target_path
    }

    /// Marker prefix.
    #[must_use]
    pub fn marker_prefix(&self) -> &str {
        &self.marker_prefix
    }

    /// Message formats.
    #[must_use]
    pub fn formats(&self) -> &MessageFormats {
        &self.formats
    }

    /// Renderer for the formats.
    #[must_use]
    pub fn renderer(&self) -> &TemplateRenderer {
        &self.renderer
    }
}
