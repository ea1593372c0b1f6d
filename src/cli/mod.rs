//! CLI operation mode handlers.
//!
//! One handler per selector flag:
//! - [`pull_request`]: GitHub pull request lookup by title or URL
//! - [`google`]: Google Doc/Sheet lookup by URL
//! - [`atlassian`]: Jira ticket lookup by key and Confluence page lookup by
//!   URL
//!
//! Output formatting utilities are in [`output`].

use gleaner::{GleanerConfig, GleanerError, OperationMode};

pub mod atlassian;
pub mod google;
pub mod output;
pub mod pull_request;

/// Routes the configuration to exactly one handler.
///
/// # Errors
///
/// Returns [`GleanerError::Configuration`] when the selector flags do not
/// name exactly one operation, and propagates handler failures.
pub async fn dispatch(config: &GleanerConfig) -> Result<(), GleanerError> {
    match config.operation_mode()? {
        OperationMode::PullRequest => pull_request::run(config).await,
        OperationMode::GoogleDocument => google::run(config).await,
        OperationMode::JiraTicket => atlassian::run_ticket(config).await,
        OperationMode::ConfluencePage => atlassian::run_page(config).await,
    }
}
