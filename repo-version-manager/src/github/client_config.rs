//! Client configuration.

use std::fmt;
use url::Url;

/// Connection settings for the GitHub API.
///
/// This is the only place the credential lives. Reconfiguring produces a new
/// value from which a new client is built.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    api_base: Option<Url>,
    token: Option<String>,
}

impl ClientConfig {
    /// Creates a configuration. Blank tokens are treated as absent.
    #[must_use]
    pub fn new(api_base: Option<Url>, token: Option<String>) -> Self {
        Self {
            api_base,
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    /// Returns a copy of this configuration using `token`.
    #[must_use]
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self::new(self.api_base.clone(), Some(token.into()))
    }

    /// API base URL; `None` means public github.com.
    #[must_use]
    pub fn api_base(&self) -> Option<&Url> {
        self.api_base.as_ref()
    }

    /// The configured token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns whether a token is configured.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base", &self.api_base.as_ref().map(Url::as_str))
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
