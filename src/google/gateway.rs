//! Gateways for the Docs and Sheets API surfaces.
//!
//! Two independent trait-typed handles are built from the same resolved
//! bearer token, one per API surface. The HTTP implementations accept an
//! explicit base URL so tests can point them at a local mock server.

use async_trait::async_trait;
use url::Url;

use super::auth::BearerToken;
use super::error::GoogleError;
use super::models::{ApiDocument, ApiValueRange};

/// Production base URL of the Docs API.
pub const DOCS_API_BASE: &str = "https://docs.googleapis.com/";

/// Production base URL of the Sheets API.
pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/";

/// Gateway that can fetch a document resource.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentGateway: Send + Sync {
    /// Fetch the document with the given identifier.
    async fn document(&self, document_id: &str) -> Result<ApiDocument, GoogleError>;
}

/// Gateway that can fetch a cell range from a spreadsheet.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpreadsheetGateway: Send + Sync {
    /// Fetch the given range of the spreadsheet as raw strings.
    async fn values(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<String>>, GoogleError>;
}

/// Reqwest-backed Docs API handle.
pub struct HttpDocumentGateway {
    http: reqwest::Client,
    base: Url,
    token: BearerToken,
}

impl HttpDocumentGateway {
    /// Creates a handle against a base URL with the resolved token.
    ///
    /// # Errors
    ///
    /// Returns [`GoogleError::Api`] when the base URL cannot be parsed.
    pub fn new(base: &str, token: BearerToken) -> Result<Self, GoogleError> {
        Ok(Self {
            http: reqwest::Client::new(),
            base: parse_base(base)?,
            token,
        })
    }
}

#[async_trait]
impl DocumentGateway for HttpDocumentGateway {
    async fn document(&self, document_id: &str) -> Result<ApiDocument, GoogleError> {
        let url = join_path(&self.base, &format!("v1/documents/{document_id}"))?;
        let response = self
            .http
            .get(url)
            .bearer_auth(self.token.secret())
            .send()
            .await
            .map_err(|error| GoogleError::from_reqwest("fetch document", &error))?;
        decode_json(response, "fetch document").await
    }
}

/// Reqwest-backed Sheets API handle.
pub struct HttpSpreadsheetGateway {
    http: reqwest::Client,
    base: Url,
    token: BearerToken,
}

impl HttpSpreadsheetGateway {
    /// Creates a handle against a base URL with the resolved token.
    ///
    /// # Errors
    ///
    /// Returns [`GoogleError::Api`] when the base URL cannot be parsed.
    pub fn new(base: &str, token: BearerToken) -> Result<Self, GoogleError> {
        Ok(Self {
            http: reqwest::Client::new(),
            base: parse_base(base)?,
            token,
        })
    }
}

#[async_trait]
impl SpreadsheetGateway for HttpSpreadsheetGateway {
    async fn values(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<String>>, GoogleError> {
        let url = join_path(
            &self.base,
            &format!("v4/spreadsheets/{spreadsheet_id}/values/{range}"),
        )?;
        let response = self
            .http
            .get(url)
            .bearer_auth(self.token.secret())
            .send()
            .await
            .map_err(|error| GoogleError::from_reqwest("fetch sheet values", &error))?;
        let envelope: ApiValueRange = decode_json(response, "fetch sheet values").await?;
        Ok(envelope.values)
    }
}

fn parse_base(base: &str) -> Result<Url, GoogleError> {
    Url::parse(base).map_err(|error| GoogleError::Api {
        message: format!("invalid API base URL {base}: {error}"),
    })
}

fn join_path(base: &Url, path: &str) -> Result<Url, GoogleError> {
    base.join(path).map_err(|error| GoogleError::Api {
        message: format!("failed to build request URL: {error}"),
    })
}

async fn decode_json<T>(response: reqwest::Response, operation: &str) -> Result<T, GoogleError>
where
    T: serde::de::DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GoogleError::Api {
            message: format!("{operation} failed with status {status}: {body}"),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|error| GoogleError::Api {
            message: format!("{operation} returned an unreadable body: {error}"),
        })
}
