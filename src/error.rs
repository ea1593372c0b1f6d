//! Top-level error type returned by the CLI.

use thiserror::Error;

use crate::atlassian::AtlassianError;
use crate::github::GithubError;
use crate::google::GoogleError;

/// Errors surfaced by the dispatcher and its handlers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GleanerError {
    /// A GitHub lookup failed.
    #[error(transparent)]
    GitHub(#[from] GithubError),

    /// A Google Docs/Sheets lookup failed.
    #[error(transparent)]
    Google(#[from] GoogleError),

    /// A Jira or Confluence lookup failed.
    #[error(transparent)]
    Atlassian(#[from] AtlassianError),

    /// Configuration could not be loaded or validated.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Writing output failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}
