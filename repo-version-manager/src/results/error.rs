//! Results store error types.

use thiserror::Error;

/// Errors that can occur while persisting campaign output.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to read or write a file.
    #[error("Failed to access file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse or serialize the results.
    #[error("Invalid results JSON in '{path}': {source}")]
    JsonError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// No check has been run yet.
    #[error("Results file not found: {path}")]
    MissingFile { path: String },
}
