//! Credential file discovery and classification.
//!
//! The credentials file is searched for in an ordered list of candidate
//! locations: the current working directory first, then the user's home
//! directory. The first file that exists wins. Its JSON shape decides which
//! authorization path runs: a top-level `installed` key selects the OAuth
//! installed-app flow, anything else is treated as a service-account key.

use std::path::PathBuf;

use serde::Deserialize;

use super::error::DegradedReason;

/// File name looked up in each candidate directory.
pub const CREDENTIALS_FILE_NAME: &str = "google-credentials.json";

/// File name of the token cache, stored next to the credentials file.
pub const TOKEN_CACHE_FILE_NAME: &str = "google-token.json";

/// OAuth installed-app client configuration (the `installed` object).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InstalledClient {
    /// OAuth client identifier.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// Authorization endpoint the user is sent to.
    pub auth_uri: String,
    /// Token exchange endpoint.
    pub token_uri: String,
}

/// Service-account key material needed for the JWT grant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceAccountKey {
    /// Service account email, used as the JWT issuer.
    pub client_email: String,
    /// PEM-encoded RSA private key.
    pub private_key: String,
    /// Token exchange endpoint.
    pub token_uri: String,
}

/// Discriminated credential source resolved from the credentials file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// OAuth 2.0 installed-app client; requires the interactive flow or a
    /// cached token.
    Installed(InstalledClient),
    /// Service-account key; exchanges a signed JWT for a bearer token.
    ServiceAccount(ServiceAccountKey),
}

#[derive(Debug, Deserialize)]
struct CredentialsFile {
    installed: Option<InstalledClient>,
    #[serde(flatten)]
    rest: serde_json::Map<String, serde_json::Value>,
}

impl CredentialSource {
    /// Classifies raw credentials-file JSON into a credential source.
    ///
    /// # Errors
    ///
    /// Returns [`DegradedReason::CredentialsInvalid`] for malformed JSON or
    /// when the service-account shape is missing required fields.
    pub fn from_json(raw: &str) -> Result<Self, DegradedReason> {
        let file: CredentialsFile =
            serde_json::from_str(raw).map_err(|error| DegradedReason::CredentialsInvalid {
                message: format!("not valid JSON: {error}"),
            })?;

        if let Some(installed) = file.installed {
            tracing::debug!("OAuth client ID detected; using the installed-app flow");
            return Ok(Self::Installed(installed));
        }

        tracing::debug!(
            keys = ?file.rest.keys().collect::<Vec<_>>(),
            "no 'installed' key; treating credentials as a service-account key"
        );
        let key = serde_json::from_value::<ServiceAccountKey>(serde_json::Value::Object(file.rest))
            .map_err(|error| DegradedReason::CredentialsInvalid {
                message: format!("service-account key is missing required fields: {error}"),
            })?;
        Ok(Self::ServiceAccount(key))
    }
}

/// A credentials file that was found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCredentialsFile {
    /// Where the file was found.
    pub path: PathBuf,
    /// Raw file contents.
    pub contents: String,
}

impl ResolvedCredentialsFile {
    /// Path of the token cache adjacent to this credentials file.
    #[must_use]
    pub fn token_cache_path(&self) -> PathBuf {
        self.path.parent().map_or_else(
            || PathBuf::from(TOKEN_CACHE_FILE_NAME),
            |dir| dir.join(TOKEN_CACHE_FILE_NAME),
        )
    }
}

/// Default candidate paths: current directory, then home directory.
#[must_use]
pub fn default_candidate_paths() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(CREDENTIALS_FILE_NAME)];
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(CREDENTIALS_FILE_NAME));
    }
    candidates
}

/// Searches the candidate locations in order and reads the first match.
///
/// # Errors
///
/// Returns [`DegradedReason::CredentialsMissing`] when no candidate exists,
/// or [`DegradedReason::CredentialsInvalid`] when the winning file cannot be
/// read.
pub fn find_credentials_file(
    candidates: &[PathBuf],
) -> Result<ResolvedCredentialsFile, DegradedReason> {
    for candidate in candidates {
        if candidate.is_file() {
            let contents = std::fs::read_to_string(candidate).map_err(|error| {
                DegradedReason::CredentialsInvalid {
                    message: format!("failed to read {}: {error}", candidate.display()),
                }
            })?;
            return Ok(ResolvedCredentialsFile {
                path: candidate.clone(),
                contents,
            });
        }
    }

    let searched = candidates
        .iter()
        .map(|candidate| candidate.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Err(DegradedReason::CredentialsMissing { searched })
}
