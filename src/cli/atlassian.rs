//! Jira ticket and Confluence page lookup handlers.
//!
//! Both operations share the same workspace credentials. Ticket lookups
//! propagate failures; page lookups report failure inside the printed
//! record so the process still exits cleanly with a JSON body.

use gleaner::atlassian::{HttpAtlassianGateway, TicketAndPageReader, WorkspaceCredentials};
use gleaner::{GleanerConfig, GleanerError};

use super::output;

/// Looks up a Jira ticket by key and prints its record.
///
/// # Errors
///
/// Returns [`GleanerError::Configuration`] when the selector value is
/// absent, and propagates workspace, gateway, and output failures.
pub async fn run_ticket(config: &GleanerConfig) -> Result<(), GleanerError> {
    let key = config
        .jira
        .as_deref()
        .ok_or_else(|| GleanerError::Configuration {
            message: "a ticket key is required".to_owned(),
        })?;
    let reader = build_reader(config)?;
    let record = reader.read_ticket(key).await?;
    output::write_json(&record)
}

/// Looks up a Confluence page by URL and prints the lookup outcome.
///
/// Resolution failures are printed as a JSON error record rather than
/// raised, so a missing page still produces output.
///
/// # Errors
///
/// Returns [`GleanerError::Configuration`] when the selector value is
/// absent, and propagates workspace and output failures.
pub async fn run_page(config: &GleanerConfig) -> Result<(), GleanerError> {
    let url = config
        .page
        .as_deref()
        .ok_or_else(|| GleanerError::Configuration {
            message: "a Confluence page URL is required".to_owned(),
        })?;
    let reader = build_reader(config)?;
    if config.debug {
        let probe = reader.check_connection().await;
        output::write_diagnostic(true, &probe);
    }
    let lookup = reader.read_page_by_url(url).await;
    output::write_json(&lookup)
}

fn build_reader(
    config: &GleanerConfig,
) -> Result<TicketAndPageReader<HttpAtlassianGateway>, GleanerError> {
    let (domain, email, token) = config.resolve_atlassian_workspace()?;
    let credentials = WorkspaceCredentials::new(&email, &token)?;
    let gateway = HttpAtlassianGateway::new(&domain, credentials)?;
    Ok(TicketAndPageReader::new(gateway))
}
