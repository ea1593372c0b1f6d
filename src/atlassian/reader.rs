//! Ticket and page lookups over an [`AtlassianGateway`].

use percent_encoding::percent_decode_str;
use url::Url;

use super::error::AtlassianError;
use super::gateway::AtlassianGateway;
use super::models::{PageLookup, TicketRecord};

/// One attempt at resolving a page, tried in order until one succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ResolutionStrategy {
    /// Fetch by numeric page identifier.
    ById(u64),
    /// Fetch by decoded title within the space.
    ByTitle(String),
}

/// Parsed Confluence page URL.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PageTarget {
    space_key: String,
    raw_token: String,
}

/// Reader combining Jira ticket lookup with Confluence page resolution.
pub struct TicketAndPageReader<Gateway>
where
    Gateway: AtlassianGateway,
{
    client: Gateway,
}

impl<Gateway> TicketAndPageReader<Gateway>
where
    Gateway: AtlassianGateway,
{
    /// Create a new reader using the provided gateway.
    #[must_use]
    pub const fn new(client: Gateway) -> Self {
        Self { client }
    }

    /// Loads and flattens a ticket by key.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures as-is, including
    /// [`AtlassianError::NotFound`] when the remote reports no such key.
    pub async fn read_ticket(&self, key: &str) -> Result<TicketRecord, AtlassianError> {
        self.client.issue(key).await
    }

    /// Probes Confluence connectivity with a one-space listing.
    ///
    /// This is a diagnostic, not a gate: the result is always a
    /// human-readable string, either a success message embedding the space
    /// count or the raw fault description.
    pub async fn check_connection(&self) -> String {
        match self.client.space_count(1).await {
            Ok(count) => format!("Connected successfully. Found {count} spaces."),
            Err(error) => error.to_string(),
        }
    }

    /// Resolves a page from its browser URL.
    ///
    /// Resolution failures are routine here (the ID-based attempt is expected
    /// to fail for title-slug URLs), so this returns a [`PageLookup`] value
    /// and never raises past this boundary.
    pub async fn read_page_by_url(&self, url: &str) -> PageLookup {
        let target = match parse_page_url(url) {
            Ok(target) => target,
            Err(message) => return PageLookup::failed(message),
        };

        if let Err(error) = self.client.space(&target.space_key).await {
            // Access failure short-circuits: the page must not be fetched.
            return PageLookup::failed(format!("Error accessing Confluence space: {error}"));
        }

        let mut last_failure = None;
        for strategy in strategies_for(&target.raw_token) {
            match self.resolve(&target.space_key, &strategy).await {
                Ok(page) => return page,
                Err(error) => {
                    tracing::debug!("page resolution strategy {strategy:?} failed: {error}");
                    last_failure = Some(error);
                }
            }
        }

        let detail = last_failure.map_or_else(
            || format!("page token '{}' is not usable", target.raw_token),
            |error| error.to_string(),
        );
        PageLookup::failed(format!("Error reading Confluence page: {detail}"))
    }

    async fn resolve(
        &self,
        space_key: &str,
        strategy: &ResolutionStrategy,
    ) -> Result<PageLookup, AtlassianError> {
        match strategy {
            ResolutionStrategy::ById(page_id) => self
                .client
                .page_by_id(*page_id)
                .await
                .map(PageLookup::Page),
            ResolutionStrategy::ByTitle(title) => self
                .client
                .page_by_title(space_key, title)
                .await
                .map(PageLookup::Page),
        }
    }
}

/// Builds the ordered resolution strategies for a raw page token.
fn strategies_for(raw_token: &str) -> Vec<ResolutionStrategy> {
    let mut strategies = Vec::new();
    if let Ok(page_id) = raw_token.parse::<u64>() {
        strategies.push(ResolutionStrategy::ById(page_id));
    }
    strategies.push(ResolutionStrategy::ByTitle(decode_title(raw_token)));
    strategies
}

/// URL-decodes a page token and maps `+` to space, for title lookups.
fn decode_title(raw_token: &str) -> String {
    percent_decode_str(raw_token)
        .decode_utf8_lossy()
        .replace('+', " ")
}

/// Parses the space key and raw page token out of a page URL.
///
/// The path must contain a literal `spaces` segment; the following segment is
/// the space key and the final segment is the raw page token.
fn parse_page_url(url: &str) -> Result<PageTarget, String> {
    let parsed =
        Url::parse(url).map_err(|_| format!("Unable to parse space key from URL: {url}"))?;

    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|segments| segments.filter(|segment| !segment.is_empty()).collect())
        .unwrap_or_default();

    let spaces_index = segments
        .iter()
        .position(|segment| *segment == "spaces")
        .ok_or_else(|| format!("Unable to parse space key from URL: {url}"))?;

    let space_key = segments
        .get(spaces_index + 1)
        .ok_or_else(|| format!("Unable to parse space key from URL: {url}"))?;
    let raw_token = segments
        .last()
        .ok_or_else(|| format!("Unable to parse space key from URL: {url}"))?;

    Ok(PageTarget {
        space_key: (*space_key).to_owned(),
        raw_token: (*raw_token).to_owned(),
    })
}

#[cfg(test)]
mod parse_tests {
    use super::{PageTarget, decode_title, parse_page_url};

    #[test]
    fn parses_space_key_and_token() {
        let target =
            parse_page_url("https://test.atlassian.net/wiki/spaces/TEST/pages/123/Test+Page")
                .expect("URL should parse");
        assert_eq!(
            target,
            PageTarget {
                space_key: String::from("TEST"),
                raw_token: String::from("Test+Page"),
            },
            "parsed target mismatch"
        );
    }

    #[test]
    fn decodes_percent_escapes_before_plus_substitution() {
        assert_eq!(decode_title("Release%20Notes+2024"), "Release Notes 2024");
    }
}
