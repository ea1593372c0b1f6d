//! High-level pull request lookup facade used by the CLI.

use super::error::GithubError;
use super::gateway::PullRequestGateway;
use super::locator::{PullRequestLocator, PullRequestNumber, RepositoryLocator};
use super::models::PullRequestRecord;

/// Flattens pull requests into records using a gateway.
pub struct PullRequestIntake<'client, Gateway>
where
    Gateway: PullRequestGateway,
{
    client: &'client Gateway,
}

impl<'client, Gateway> PullRequestIntake<'client, Gateway>
where
    Gateway: PullRequestGateway,
{
    /// Create a new intake facade using the provided gateway.
    #[must_use]
    pub const fn new(client: &'client Gateway) -> Self {
        Self { client }
    }

    /// Finds a pull request by exact title and loads its flattened record.
    ///
    /// Scans every pull request in the repository (any state) in the order
    /// the API returns them and takes the first exact title match. The scan
    /// is only declared a failure once the whole set has been examined.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::NoPullRequestWithTitle`] when no pull request
    /// carries the title, and propagates any gateway failure.
    pub async fn find_by_title(
        &self,
        repository: &RepositoryLocator,
        title: &str,
    ) -> Result<PullRequestRecord, GithubError> {
        let summaries = self.client.list_pull_requests(repository).await?;

        let matched = summaries
            .into_iter()
            .find(|summary| summary.title.as_deref() == Some(title))
            .ok_or_else(|| GithubError::NoPullRequestWithTitle {
                title: title.to_owned(),
            })?;

        let number = PullRequestNumber::new(matched.number)?;
        let locator = PullRequestLocator::for_repository(repository, number);
        self.load(&locator).await
    }

    /// Loads the flattened record for a single pull request.
    ///
    /// # Errors
    ///
    /// Propagates any failure from the underlying gateway, including GitHub
    /// authentication errors or network problems.
    pub async fn load(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<PullRequestRecord, GithubError> {
        let metadata = self.client.pull_request(locator).await?;
        let comments = self.client.pull_request_comments(locator).await?;
        let file_changes = self.client.pull_request_files(locator).await?;

        Ok(PullRequestRecord {
            title: metadata.title.unwrap_or_default(),
            number: metadata.number,
            description: metadata.body,
            comments,
            file_changes,
        })
    }
}
