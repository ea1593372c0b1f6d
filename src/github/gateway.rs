//! Gateways for loading pull requests through Octocrab.
//!
//! The trait-based design enables mocking in tests while the Octocrab
//! implementation handles real HTTP requests.

use async_trait::async_trait;
use http::{StatusCode, Uri};
use octocrab::{Octocrab, Page};

use super::error::GithubError;
use super::locator::{PersonalAccessToken, PullRequestLocator, RepositoryLocator};
use super::models::{
    ApiComment, ApiFile, ApiPullRequest, ApiPullRequestSummary, FileChange, PullRequestSummary,
};

/// Metadata of a single pull request, before flattening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestMetadata {
    /// Pull request number.
    pub number: u64,
    /// Title of the pull request.
    pub title: Option<String>,
    /// Pull request body.
    pub body: Option<String>,
}

impl From<ApiPullRequest> for PullRequestMetadata {
    fn from(value: ApiPullRequest) -> Self {
        Self {
            number: value.number,
            title: value.title,
            body: value.body,
        }
    }
}

/// Builds an Octocrab client for the given token and API base URL.
///
/// # Errors
///
/// Returns `GithubError::InvalidUrl` when the base URI cannot be parsed or
/// `GithubError::Api` when Octocrab fails to construct a client.
fn build_octocrab_client(
    token: &PersonalAccessToken,
    api_base: &str,
) -> Result<Octocrab, GithubError> {
    let base_uri: Uri = api_base
        .parse::<Uri>()
        .map_err(|error| GithubError::InvalidUrl(error.to_string()))?;

    Octocrab::builder()
        .personal_token(token.as_ref())
        .base_uri(base_uri)
        .map_err(|error| GithubError::Api {
            message: format!("build client failed: {error}"),
        })?
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}

/// Gateway that can load pull request data.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestGateway: Send + Sync {
    /// List every pull request in the repository regardless of state.
    async fn list_pull_requests(
        &self,
        repository: &RepositoryLocator,
    ) -> Result<Vec<PullRequestSummary>, GithubError>;

    /// Fetch the pull request metadata.
    async fn pull_request(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<PullRequestMetadata, GithubError>;

    /// Fetch all review comment bodies for the pull request, in API order.
    async fn pull_request_comments(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<Vec<String>, GithubError>;

    /// Fetch all changed files for the pull request, in API order.
    async fn pull_request_files(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<Vec<FileChange>, GithubError>;
}

/// Octocrab-backed gateway.
pub struct OctocrabGateway {
    client: Octocrab,
}

impl OctocrabGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an Octocrab client for the given token and API base URL.
    ///
    /// # Errors
    ///
    /// Returns `GithubError::InvalidUrl` when the base URI cannot be parsed
    /// or `GithubError::Api` when Octocrab fails to construct a client.
    pub fn for_token(token: &PersonalAccessToken, api_base: &str) -> Result<Self, GithubError> {
        let octocrab = build_octocrab_client(token, api_base)?;
        Ok(Self::new(octocrab))
    }
}

#[async_trait]
impl PullRequestGateway for OctocrabGateway {
    async fn list_pull_requests(
        &self,
        repository: &RepositoryLocator,
    ) -> Result<Vec<PullRequestSummary>, GithubError> {
        let page = self
            .client
            .get::<Page<ApiPullRequestSummary>, _, _>(
                repository.pulls_path(),
                Some(&[("state", "all")]),
            )
            .await
            .map_err(|error| map_octocrab_error("list pull requests", &error))?;

        self.client
            .all_pages(page)
            .await
            .map(|summaries| {
                summaries
                    .into_iter()
                    .map(ApiPullRequestSummary::into)
                    .collect()
            })
            .map_err(|error| map_octocrab_error("list pull requests", &error))
    }

    async fn pull_request(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<PullRequestMetadata, GithubError> {
        self.client
            .get::<ApiPullRequest, _, _>(locator.pull_request_path(), None::<&()>)
            .await
            .map(ApiPullRequest::into)
            .map_err(|error| map_octocrab_error("pull request", &error))
    }

    async fn pull_request_comments(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<Vec<String>, GithubError> {
        let page = self
            .client
            .get::<Page<ApiComment>, _, _>(locator.comments_path(), None::<&()>)
            .await
            .map_err(|error| map_octocrab_error("pull request comments", &error))?;

        self.client
            .all_pages(page)
            .await
            .map(|comments| {
                comments
                    .into_iter()
                    .filter_map(|comment| comment.body)
                    .collect()
            })
            .map_err(|error| map_octocrab_error("pull request comments", &error))
    }

    async fn pull_request_files(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<Vec<FileChange>, GithubError> {
        let page = self
            .client
            .get::<Page<ApiFile>, _, _>(locator.files_path(), None::<&()>)
            .await
            .map_err(|error| map_octocrab_error("pull request files", &error))?;

        self.client
            .all_pages(page)
            .await
            .map(|files| files.into_iter().map(ApiFile::into).collect())
            .map_err(|error| map_octocrab_error("pull request files", &error))
    }
}

// --- Error mapping helpers ---

/// Checks if a GitHub error status indicates an authentication failure.
const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

/// Maps an octocrab failure into a [`GithubError`] variant.
pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> GithubError {
    if let octocrab::Error::GitHub { source, .. } = error {
        return if source.status_code == StatusCode::NOT_FOUND {
            GithubError::NotFound {
                message: format!("{operation} failed: {message}", message = source.message),
            }
        } else if is_auth_failure(source.status_code) {
            GithubError::Authentication {
                message: format!(
                    "{operation} failed: GitHub returned {status} {message}",
                    status = source.status_code,
                    message = source.message
                ),
            }
        } else {
            GithubError::Api {
                message: format!(
                    "{operation} failed with status {status}: {message}",
                    status = source.status_code,
                    message = source.message
                ),
            }
        };
    }

    if is_network_error(error) {
        return GithubError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    GithubError::Api {
        message: format!("{operation} failed: {error}"),
    }
}
