//! Error types exposed by the GitHub pull request adapter.

use thiserror::Error;

/// Errors surfaced while parsing input or communicating with GitHub.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GithubError {
    /// The provided URL could not be parsed.
    #[error("pull request URL is invalid: {0}")]
    InvalidUrl(String),

    /// The pull request path is incomplete.
    #[error("pull request URL must match /owner/repo/pull/<number>")]
    MissingPathSegments,

    /// The pull request number is not a valid integer.
    #[error("pull request number must be a positive integer")]
    InvalidPullRequestNumber,

    /// The authentication token was missing.
    #[error("GitHub token is required (set GITHUB_TOKEN)")]
    MissingToken,

    /// Repository coordinates were not configured.
    #[error("repository coordinates are required: {message}")]
    MissingRepository {
        /// Which coordinate was absent.
        message: String,
    },

    /// No pull request in the repository carries the requested title.
    #[error("no pull request found with title: {title}")]
    NoPullRequestWithTitle {
        /// The title that was searched for.
        title: String,
    },

    /// The remote reported that the requested resource does not exist.
    #[error("GitHub resource not found: {message}")]
    NotFound {
        /// GitHub error message returned with the 404 response.
        message: String,
    },

    /// The authentication token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// GitHub returned a non-authentication API error.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response body from GitHub describing the failure.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },
}
