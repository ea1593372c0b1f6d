//! Gleaner library crate: fetch structured content from external services.
//!
//! Four independent adapters resolve a GitHub pull request, a Google Doc or
//! Sheet, a Jira ticket, or a Confluence page into one flat record that the
//! CLI prints as indented JSON. Each adapter authenticates against one
//! external API, issues a small number of lookups, and reshapes the response;
//! errors are mapped into user-friendly variants so callers never see
//! transport internals.

pub mod atlassian;
pub mod config;
pub mod error;
pub mod github;
pub mod google;

pub use atlassian::{
    AtlassianError, HttpAtlassianGateway, PageLookup, PageRecord, TicketAndPageReader,
    TicketRecord, WorkspaceCredentials,
};
pub use config::{GleanerConfig, OperationMode};
pub use error::GleanerError;
pub use github::{
    GithubError, OctocrabGateway, PersonalAccessToken, PullRequestIntake, PullRequestLocator,
    PullRequestRecord, RepositoryLocator,
};
pub use google::{DocumentRecord, GoogleError, GoogleReader, SheetGrid};
