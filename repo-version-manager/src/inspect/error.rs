//! Inspection error types.

use thiserror::Error;

/// Errors that can occur while inspecting file content.
#[derive(Debug, Error)]
pub enum InspectError {
    /// Content is not valid JSON.
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
