//! Error types exposed by the Google Docs/Sheets adapter.

use thiserror::Error;

/// Why the reader ended up without usable service handles.
///
/// Construction of the reader never fails; instead the failure kind is
/// captured here so later calls can report what actually went wrong rather
/// than collapsing every cause into one opaque state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DegradedReason {
    /// No credentials file was found in any candidate location.
    #[error("no credentials file found (searched: {searched})")]
    CredentialsMissing {
        /// Candidate paths that were checked, comma separated.
        searched: String,
    },

    /// The credentials file exists but could not be used.
    #[error("credentials file is invalid: {message}")]
    CredentialsInvalid {
        /// Parse or validation detail.
        message: String,
    },

    /// The credential was read but authorization could not be completed.
    #[error("authorization failed: {message}")]
    AuthorizationFailed {
        /// Detail from the token exchange or refresh.
        message: String,
    },
}

/// Errors surfaced while resolving credentials or reading documents.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GoogleError {
    /// The reader is degraded; no network call was attempted.
    #[error("Google services are not initialized: {reason}")]
    ServiceUnavailable {
        /// The construction-time failure that caused the degradation.
        reason: DegradedReason,
    },

    /// No document identifier could be extracted from the URL.
    #[error("unable to extract a document id from URL: {url}")]
    InvalidDocumentUrl {
        /// The URL that was supplied.
        url: String,
    },

    /// The URL named neither a document nor a spreadsheet.
    #[error("URL is neither a Google Doc nor a Google Sheet: {url}")]
    UnrecognisedUrl {
        /// The URL that was supplied.
        url: String,
    },

    /// Google returned an API error.
    #[error("Google API error: {message}")]
    Api {
        /// Response detail from Google.
        message: String,
    },

    /// Networking failed while calling Google.
    #[error("network error talking to Google: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },
}

impl GoogleError {
    pub(crate) fn from_reqwest(operation: &str, error: &reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() || error.is_request() {
            Self::Network {
                message: format!("{operation} failed: {error}"),
            }
        } else {
            Self::Api {
                message: format!("{operation} failed: {error}"),
            }
        }
    }
}
