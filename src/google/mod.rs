//! Google Docs and Sheets lookup.
//!
//! Credential resolution is the intricate part: the credentials file is
//! searched in ordered candidate locations, its JSON shape selects either the
//! OAuth installed-app flow (with an on-disk token cache) or a
//! service-account JWT grant, and any failure along the way leaves the reader
//! in a degraded state that fails softly at call time instead of at
//! construction time.

pub mod auth;
pub mod credentials;
pub mod error;
pub mod gateway;
pub mod models;
pub mod reader;

pub use auth::{Authenticator, BearerToken, StoredToken, TokenCache};
pub use credentials::{CredentialSource, InstalledClient, ServiceAccountKey};
pub use error::{DegradedReason, GoogleError};
pub use gateway::{
    DocumentGateway, HttpDocumentGateway, HttpSpreadsheetGateway, SpreadsheetGateway,
};
pub use models::{ApiDocument, DocumentRecord, SheetGrid};
pub use reader::{GoogleReader, SHEET_RANGE, ServiceState};

#[cfg(test)]
pub use gateway::{MockDocumentGateway, MockSpreadsheetGateway};

#[cfg(test)]
mod tests;
