//! Error types exposed by the Jira/Confluence adapter.

use thiserror::Error;

/// Errors surfaced while talking to the Atlassian workspace.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AtlassianError {
    /// Workspace coordinates or credentials were not configured.
    #[error("Atlassian configuration is incomplete: {message}")]
    MissingConfiguration {
        /// Which setting was absent.
        message: String,
    },

    /// The remote reported that the requested resource does not exist.
    #[error("Atlassian resource not found: {message}")]
    NotFound {
        /// Remote error detail.
        message: String,
    },

    /// The basic-auth pair was rejected.
    #[error("Atlassian rejected the credentials: {message}")]
    Authentication {
        /// Remote error detail from the 401/403 response.
        message: String,
    },

    /// The workspace returned a non-authentication API error.
    #[error("Atlassian API error: {message}")]
    Api {
        /// Response body describing the failure.
        message: String,
    },

    /// Networking failed while calling the workspace.
    #[error("network error talking to Atlassian: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },
}

impl AtlassianError {
    pub(crate) fn from_reqwest(operation: &str, error: &reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() || error.is_request() {
            Self::Network {
                message: format!("{operation} failed: {error}"),
            }
        } else {
            Self::Api {
                message: format!("{operation} failed: {error}"),
            }
        }
    }
}
