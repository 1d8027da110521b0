//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while loading, saving or validating settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or write a file.
    #[error("Failed to access file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse or serialize JSON content.
    #[error("Invalid settings JSON in '{path}': {source}")]
    JsonError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Validation error in settings.
    #[error("Invalid settings: {message}")]
    ValidationError { message: String },

    /// Settings file does not exist yet.
    #[error("Settings file not found: {path}")]
    MissingFile { path: String },

    /// Repository identifier is not `owner/name`.
    #[error("Invalid repository '{value}': expected 'owner/name'")]
    InvalidRepository { value: String },

    /// Branch pattern is not a valid glob.
    #[error("Invalid branch pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}
