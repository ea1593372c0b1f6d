//! Data models for tickets and pages.

use serde::{Deserialize, Serialize};

/// Flattened Jira ticket record emitted by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketRecord {
    /// Ticket key, e.g. `PROJ-123`.
    pub key: String,
    /// One-line summary.
    pub summary: String,
    /// Long description, when present.
    pub description: Option<String>,
    /// Comment bodies in API order.
    pub comments: Vec<String>,
}

/// Flattened Confluence page record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    /// Page identifier.
    pub id: String,
    /// Page title.
    pub title: String,
    /// Storage-format (HTML) body.
    pub content: String,
}

/// Outcome of a page lookup.
///
/// Page resolution runs a two-stage fallback where the first stage failing is
/// routine, so the lookup returns this value instead of raising. Callers must
/// branch on the variant; serialization matches the CLI's success shape or
/// the `{"error": …}` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PageLookup {
    /// The page was resolved.
    Page(PageRecord),
    /// Resolution failed; `error` describes the final failure.
    Failed {
        /// Human-readable failure description.
        error: String,
    },
}

impl PageLookup {
    /// Convenience constructor for the failure variant.
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiIssue {
    pub(super) key: String,
    pub(super) fields: ApiIssueFields,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiIssueFields {
    pub(super) summary: Option<String>,
    pub(super) description: Option<String>,
    #[serde(default)]
    pub(super) comment: ApiCommentContainer,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct ApiCommentContainer {
    #[serde(default)]
    pub(super) comments: Vec<ApiIssueComment>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiIssueComment {
    pub(super) body: Option<String>,
}

impl From<ApiIssue> for TicketRecord {
    fn from(value: ApiIssue) -> Self {
        Self {
            key: value.key,
            summary: value.fields.summary.unwrap_or_default(),
            description: value.fields.description,
            comments: value
                .fields
                .comment
                .comments
                .into_iter()
                .filter_map(|comment| comment.body)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiPage {
    pub(super) id: serde_json::Value,
    pub(super) title: Option<String>,
    #[serde(default)]
    pub(super) body: Option<ApiPageBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct ApiPageBody {
    #[serde(default)]
    pub(super) storage: Option<ApiPageStorage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct ApiPageStorage {
    #[serde(default)]
    pub(super) value: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct ApiPageResults {
    #[serde(default)]
    pub(super) results: Vec<ApiPage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct ApiSpaceResults {
    #[serde(default)]
    pub(super) results: Vec<serde_json::Value>,
}

impl From<ApiPage> for PageRecord {
    fn from(value: ApiPage) -> Self {
        // Confluence returns ids as strings in v1 payloads but numbers have
        // been observed; normalize either to a string.
        let id = match value.id {
            serde_json::Value::String(id) => id,
            other => other.to_string(),
        };
        Self {
            id,
            title: value.title.unwrap_or_default(),
            content: value
                .body
                .and_then(|body| body.storage)
                .and_then(|storage| storage.value)
                .unwrap_or_default(),
        }
    }
}
