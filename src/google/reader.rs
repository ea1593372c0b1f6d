//! Document and sheet reading over a lazily-failing service state.
//!
//! Construction never fails. Credential resolution runs once, up front, and
//! any failure is captured as a [`DegradedReason`] inside the state; every
//! later read in the degraded state fails fast with `ServiceUnavailable` and
//! performs no network work.

use std::path::PathBuf;

use url::Url;

use super::auth::{Authenticator, TokenCache};
use super::credentials::{self, CredentialSource};
use super::error::{DegradedReason, GoogleError};
use super::gateway::{
    DOCS_API_BASE, DocumentGateway, HttpDocumentGateway, HttpSpreadsheetGateway, SHEETS_API_BASE,
    SpreadsheetGateway,
};
use super::models::{DocumentRecord, SheetGrid};

/// Fixed range for sheet reads: columns A through ZZ, unbounded rows.
pub const SHEET_RANGE: &str = "A1:ZZ";

/// Either both service handles, or the reason neither exists.
pub enum ServiceState<Documents, Spreadsheets> {
    /// Both API handles are usable.
    Ready {
        /// Docs API handle.
        documents: Documents,
        /// Sheets API handle.
        spreadsheets: Spreadsheets,
    },
    /// No handle exists; every call fails with this reason.
    Degraded(DegradedReason),
}

/// Reader over the Docs and Sheets APIs.
pub struct GoogleReader<Documents, Spreadsheets>
where
    Documents: DocumentGateway,
    Spreadsheets: SpreadsheetGateway,
{
    state: ServiceState<Documents, Spreadsheets>,
}

impl GoogleReader<HttpDocumentGateway, HttpSpreadsheetGateway> {
    /// Resolves credentials from the default candidate locations and builds
    /// the two API handles.
    ///
    /// Never fails: any initialization problem leaves the reader degraded
    /// and is reported by the first read call.
    pub async fn initialise() -> Self {
        Self::initialise_from(&credentials::default_candidate_paths()).await
    }

    /// Same as [`GoogleReader::initialise`] with explicit candidate paths.
    pub async fn initialise_from(candidates: &[PathBuf]) -> Self {
        match Self::resolve_services(candidates).await {
            Ok(state) => Self { state },
            Err(reason) => {
                tracing::warn!("Google reader degraded: {reason}");
                Self {
                    state: ServiceState::Degraded(reason),
                }
            }
        }
    }

    async fn resolve_services(
        candidates: &[PathBuf],
    ) -> Result<ServiceState<HttpDocumentGateway, HttpSpreadsheetGateway>, DegradedReason> {
        let file = credentials::find_credentials_file(candidates)?;
        let source = CredentialSource::from_json(&file.contents)?;
        let cache = TokenCache::new(file.token_cache_path());
        let token = Authenticator::new().resolve(&source, &cache).await?;

        let documents = HttpDocumentGateway::new(DOCS_API_BASE, token.clone()).map_err(
            |error| DegradedReason::AuthorizationFailed {
                message: format!("failed to construct Docs handle: {error}"),
            },
        )?;
        let spreadsheets = HttpSpreadsheetGateway::new(SHEETS_API_BASE, token).map_err(
            |error| DegradedReason::AuthorizationFailed {
                message: format!("failed to construct Sheets handle: {error}"),
            },
        )?;

        Ok(ServiceState::Ready {
            documents,
            spreadsheets,
        })
    }
}

impl<Documents, Spreadsheets> GoogleReader<Documents, Spreadsheets>
where
    Documents: DocumentGateway,
    Spreadsheets: SpreadsheetGateway,
{
    /// Builds a ready reader from existing handles.
    #[must_use]
    pub const fn ready(documents: Documents, spreadsheets: Spreadsheets) -> Self {
        Self {
            state: ServiceState::Ready {
                documents,
                spreadsheets,
            },
        }
    }

    /// Builds a degraded reader that fails every call with `reason`.
    #[must_use]
    pub const fn degraded(reason: DegradedReason) -> Self {
        Self {
            state: ServiceState::Degraded(reason),
        }
    }

    /// The degradation reason, when the reader is degraded.
    #[must_use]
    pub const fn degraded_reason(&self) -> Option<&DegradedReason> {
        match &self.state {
            ServiceState::Ready { .. } => None,
            ServiceState::Degraded(reason) => Some(reason),
        }
    }

    /// Reads a document and flattens its paragraph text runs.
    ///
    /// # Errors
    ///
    /// Returns [`GoogleError::ServiceUnavailable`] when the reader is
    /// degraded, [`GoogleError::InvalidDocumentUrl`] when no identifier can
    /// be extracted, and propagates gateway failures.
    pub async fn read_document(&self, url: &str) -> Result<DocumentRecord, GoogleError> {
        let documents = match &self.state {
            ServiceState::Ready { documents, .. } => documents,
            ServiceState::Degraded(reason) => {
                return Err(GoogleError::ServiceUnavailable {
                    reason: reason.clone(),
                });
            }
        };

        let document_id = extract_id_from_url(url)?;
        let document = documents.document(&document_id).await?;
        Ok(document.flatten())
    }

    /// Reads the fixed cell range of a sheet, verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`GoogleError::ServiceUnavailable`] when the reader is
    /// degraded, [`GoogleError::InvalidDocumentUrl`] when no identifier can
    /// be extracted, and propagates gateway failures.
    pub async fn read_sheet(&self, url: &str) -> Result<SheetGrid, GoogleError> {
        let spreadsheets = match &self.state {
            ServiceState::Ready { spreadsheets, .. } => spreadsheets,
            ServiceState::Degraded(reason) => {
                return Err(GoogleError::ServiceUnavailable {
                    reason: reason.clone(),
                });
            }
        };

        let spreadsheet_id = extract_id_from_url(url)?;
        spreadsheets.values(&spreadsheet_id, SHEET_RANGE).await
    }
}

/// Extracts the opaque document/spreadsheet identifier from a URL.
///
/// Prefers the `id` query parameter; falls back to the second-to-last path
/// segment (the `d/<id>/edit` shape of copied browser URLs).
pub(super) fn extract_id_from_url(url: &str) -> Result<String, GoogleError> {
    let parsed = Url::parse(url).map_err(|_| GoogleError::InvalidDocumentUrl {
        url: url.to_owned(),
    })?;

    if let Some((_, id)) = parsed.query_pairs().find(|(name, _)| name == "id") {
        if !id.is_empty() {
            return Ok(id.into_owned());
        }
    }

    let segments: Vec<&str> = parsed
        .path_segments()
        .map(Iterator::collect)
        .unwrap_or_default();
    segments
        .len()
        .checked_sub(2)
        .and_then(|index| segments.get(index))
        .filter(|segment| !segment.is_empty())
        .map(|segment| (*segment).to_owned())
        .ok_or_else(|| GoogleError::InvalidDocumentUrl {
            url: url.to_owned(),
        })
}
