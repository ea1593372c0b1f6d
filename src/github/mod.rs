//! GitHub pull request lookup.
//!
//! Wraps Octocrab to parse pull request URLs, validate personal access
//! tokens, and resolve pull requests by URL or by exact title before
//! flattening them into a single record. Errors are mapped into
//! user-friendly variants so callers never see Octocrab internals.

pub mod error;
pub mod gateway;
pub mod intake;
pub mod locator;
pub mod models;

pub use error::GithubError;
pub use gateway::{OctocrabGateway, PullRequestGateway, PullRequestMetadata};
pub use intake::PullRequestIntake;
pub use locator::{
    PersonalAccessToken, PullRequestLocator, PullRequestNumber, RepositoryLocator, RepositoryName,
    RepositoryOwner,
};
pub use models::{FileChange, PullRequestRecord, PullRequestSummary};

#[cfg(test)]
pub use gateway::MockPullRequestGateway;

#[cfg(test)]
mod tests;
