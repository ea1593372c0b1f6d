//! Gateway for the Jira and Confluence REST surfaces of one workspace.
//!
//! Both products live under the same workspace domain and share a basic-auth
//! pair, so a single gateway covers the five lookups the readers need. The
//! trait keeps the readers mockable; the reqwest implementation issues the
//! real HTTP requests.

use async_trait::async_trait;
use http::StatusCode;
use url::Url;

use super::error::AtlassianError;
use super::models::{ApiIssue, ApiPage, ApiPageResults, ApiSpaceResults, PageRecord, TicketRecord};

/// Basic-auth pair for the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceCredentials {
    email: String,
    api_token: String,
}

impl WorkspaceCredentials {
    /// Validates that both halves of the pair are present.
    ///
    /// # Errors
    ///
    /// Returns [`AtlassianError::MissingConfiguration`] when either value is
    /// blank.
    pub fn new(email: impl AsRef<str>, api_token: impl AsRef<str>) -> Result<Self, AtlassianError> {
        let email = email.as_ref().trim();
        let api_token = api_token.as_ref().trim();
        if email.is_empty() {
            return Err(AtlassianError::MissingConfiguration {
                message: "email is required (set JIRA_EMAIL)".to_owned(),
            });
        }
        if api_token.is_empty() {
            return Err(AtlassianError::MissingConfiguration {
                message: "API token is required (set JIRA_TOKEN)".to_owned(),
            });
        }
        Ok(Self {
            email: email.to_owned(),
            api_token: api_token.to_owned(),
        })
    }
}

/// Gateway that can load tickets, spaces, and pages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AtlassianGateway: Send + Sync {
    /// Fetch a ticket by key and flatten it.
    async fn issue(&self, key: &str) -> Result<TicketRecord, AtlassianError>;

    /// Count the workspace's top-level spaces, up to `limit`.
    async fn space_count(&self, limit: u32) -> Result<usize, AtlassianError>;

    /// Verify that a space is reachable.
    async fn space(&self, space_key: &str) -> Result<(), AtlassianError>;

    /// Fetch a page by numeric identifier with its storage body expanded.
    async fn page_by_id(&self, page_id: u64) -> Result<PageRecord, AtlassianError>;

    /// Fetch a page by title within a space, storage body expanded.
    async fn page_by_title(
        &self,
        space_key: &str,
        title: &str,
    ) -> Result<PageRecord, AtlassianError>;
}

/// Reqwest-backed gateway over one workspace domain.
pub struct HttpAtlassianGateway {
    http: reqwest::Client,
    base: Url,
    credentials: WorkspaceCredentials,
}

impl HttpAtlassianGateway {
    /// Creates a gateway for the workspace domain.
    ///
    /// # Errors
    ///
    /// Returns [`AtlassianError::MissingConfiguration`] when the domain is
    /// blank or not a valid URL.
    pub fn new(domain: &str, credentials: WorkspaceCredentials) -> Result<Self, AtlassianError> {
        let trimmed = domain.trim();
        if trimmed.is_empty() {
            return Err(AtlassianError::MissingConfiguration {
                message: "workspace domain is required (set JIRA_DOMAIN)".to_owned(),
            });
        }
        let base =
            Url::parse(trimmed).map_err(|error| AtlassianError::MissingConfiguration {
                message: format!("workspace domain is not a valid URL: {error}"),
            })?;
        Ok(Self {
            http: reqwest::Client::new(),
            base,
            credentials,
        })
    }

    fn url(&self, path: &str) -> Result<Url, AtlassianError> {
        self.base.join(path).map_err(|error| AtlassianError::Api {
            message: format!("failed to build request URL: {error}"),
        })
    }

    async fn get_json<T>(&self, operation: &str, url: Url) -> Result<T, AtlassianError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .http
            .get(url)
            .basic_auth(&self.credentials.email, Some(&self.credentials.api_token))
            .send()
            .await
            .map_err(|error| AtlassianError::from_reqwest(operation, &error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status(operation, status, &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|error| AtlassianError::Api {
                message: format!("{operation} returned an unreadable body: {error}"),
            })
    }
}

fn map_status(operation: &str, status: StatusCode, body: &str) -> AtlassianError {
    match status {
        StatusCode::NOT_FOUND => AtlassianError::NotFound {
            message: format!("{operation} failed: {body}"),
        },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AtlassianError::Authentication {
            message: format!("{operation} failed with status {status}: {body}"),
        },
        _ => AtlassianError::Api {
            message: format!("{operation} failed with status {status}: {body}"),
        },
    }
}

#[async_trait]
impl AtlassianGateway for HttpAtlassianGateway {
    async fn issue(&self, key: &str) -> Result<TicketRecord, AtlassianError> {
        let url = self.url(&format!("rest/api/2/issue/{key}"))?;
        let issue: ApiIssue = self.get_json("fetch issue", url).await?;
        Ok(issue.into())
    }

    async fn space_count(&self, limit: u32) -> Result<usize, AtlassianError> {
        let mut url = self.url("wiki/rest/api/space")?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        let spaces: ApiSpaceResults = self.get_json("list spaces", url).await?;
        Ok(spaces.results.len())
    }

    async fn space(&self, space_key: &str) -> Result<(), AtlassianError> {
        let url = self.url(&format!("wiki/rest/api/space/{space_key}"))?;
        self.get_json::<serde_json::Value>("fetch space", url)
            .await?;
        Ok(())
    }

    async fn page_by_id(&self, page_id: u64) -> Result<PageRecord, AtlassianError> {
        let mut url = self.url(&format!("wiki/rest/api/content/{page_id}"))?;
        url.query_pairs_mut().append_pair("expand", "body.storage");
        let page: ApiPage = self.get_json("fetch page by id", url).await?;
        Ok(page.into())
    }

    async fn page_by_title(
        &self,
        space_key: &str,
        title: &str,
    ) -> Result<PageRecord, AtlassianError> {
        let mut url = self.url("wiki/rest/api/content")?;
        url.query_pairs_mut()
            .append_pair("spaceKey", space_key)
            .append_pair("title", title)
            .append_pair("expand", "body.storage");
        let results: ApiPageResults = self.get_json("fetch page by title", url).await?;
        results
            .results
            .into_iter()
            .next()
            .map(ApiPage::into)
            .ok_or_else(|| AtlassianError::NotFound {
                message: format!("no page titled '{title}' in space {space_key}"),
            })
    }
}
