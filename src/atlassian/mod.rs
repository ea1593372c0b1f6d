//! Jira ticket and Confluence page lookup.
//!
//! One basic-auth gateway covers both products of a workspace. Ticket
//! lookups propagate faults; page lookups return a [`PageLookup`] value
//! because the two-stage ID-then-title fallback makes first-stage failure
//! routine rather than exceptional.

pub mod error;
pub mod gateway;
pub mod models;
pub mod reader;

pub use error::AtlassianError;
pub use gateway::{AtlassianGateway, HttpAtlassianGateway, WorkspaceCredentials};
pub use models::{PageLookup, PageRecord, TicketRecord};
pub use reader::TicketAndPageReader;

#[cfg(test)]
pub use gateway::MockAtlassianGateway;

#[cfg(test)]
mod tests;
