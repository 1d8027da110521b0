//! GitHub API error types.

use thiserror::Error;

/// Errors that can occur while talking to the repository host.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API answered with a non-success status.
    #[error("GitHub API error ({status}): {message}")]
    Status { status: u16, message: String },

    /// Transport, URI or decoding failure inside the client.
    #[error("GitHub client error: {0}")]
    Client(#[source] octocrab::Error),

    /// The response did not carry what the operation needs.
    #[error("Unexpected GitHub response: {message}")]
    UnexpectedResponse { message: String },

    /// No credential has been configured for this session.
    #[error("No GitHub token configured")]
    MissingToken,
}

impl ApiError {
    /// Returns the HTTP status if the API rejected the request.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true for a 404 answer.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<octocrab::Error> for ApiError {
    fn from(error: octocrab::Error) -> Self {
        match error {
            octocrab::Error::GitHub { source, .. } => {
                let source = *source;
                Self::Status {
                    status: source.status_code.as_u16(),
                    message: source.message,
                }
            }
            other => Self::Client(other),
        }
    }
}
