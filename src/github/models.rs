//! Data models for the flattened pull request record.

use serde::{Deserialize, Serialize};

/// One changed file in a pull request.
///
/// `patch` stays optional: GitHub omits it for binary or rename-only entries
/// and the absence must survive into the output rather than becoming `""`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChange {
    /// Path of the changed file.
    pub file: String,
    /// Unified diff hunk for the file, when GitHub provides one.
    pub patch: Option<String>,
}

/// Flattened pull request record emitted by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestRecord {
    /// Title of the pull request.
    pub title: String,
    /// Pull request number.
    pub number: u64,
    /// Pull request body, if the author wrote one.
    pub description: Option<String>,
    /// Comment bodies in API order.
    pub comments: Vec<String>,
    /// Changed files in API order.
    pub file_changes: Vec<FileChange>,
}

/// Title and number of one pull request from the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestSummary {
    /// Pull request number.
    pub number: u64,
    /// Title of the pull request.
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiPullRequest {
    pub(super) number: u64,
    pub(super) title: Option<String>,
    pub(super) body: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiPullRequestSummary {
    pub(super) number: u64,
    pub(super) title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiComment {
    pub(super) body: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiFile {
    pub(super) filename: String,
    pub(super) patch: Option<String>,
}

impl From<ApiPullRequestSummary> for PullRequestSummary {
    fn from(value: ApiPullRequestSummary) -> Self {
        Self {
            number: value.number,
            title: value.title,
        }
    }
}

impl From<ApiFile> for FileChange {
    fn from(value: ApiFile) -> Self {
        Self {
            file: value.filename,
            patch: value.patch,
        }
    }
}
