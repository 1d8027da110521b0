//! Mutation error types.

use super::ValueKind;
use thiserror::Error;

/// Errors that can occur while rewriting file content.
#[derive(Debug, Error)]
pub enum MutateError {
    /// No line starts with the marker prefix.
    #[error("No line starts with '{prefix}'")]
    MarkerNotFound { prefix: String },

    /// Content is not valid JSON.
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// Key path is empty or has an empty segment.
    #[error("Invalid key path '{path}'")]
    InvalidPath { path: String },

    /// A key on the path does not exist.
    #[error("Key path '{path}' does not exist")]
    PathNotFound { path: String },

    /// An intermediate value on the path is not an object.
    #[error("'{path}' is not an object")]
    NotAnObject { path: String },

    /// Replacement cannot be coerced to the requested type.
    #[error("'{value}' is not a valid {kind}")]
    InvalidValue { value: String, kind: ValueKind },

    /// Re-serializing the document failed.
    #[error("Failed to serialize JSON: {0}")]
    Serialize(#[source] serde_json::Error),
}
