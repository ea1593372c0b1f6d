//! Credential resolution: token cache, OAuth installed-app flow, and the
//! service-account JWT grant.
//!
//! Exactly one credential is resolved per process, at startup. The OAuth path
//! prefers the on-disk token cache, refreshes an expired-but-refreshable
//! token in place, and only falls back to the interactive loopback flow when
//! neither works. Whatever the path, a token obtained from a flow run or a
//! refresh is re-persisted wholesale before use.

use std::io::{self, Write};

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use url::Url;

use super::credentials::{CredentialSource, InstalledClient, ServiceAccountKey};
use super::error::DegradedReason;

/// Read-only scope for the Docs API.
pub const DOCUMENTS_SCOPE: &str = "https://www.googleapis.com/auth/documents.readonly";

/// Read-only scope for the Sheets API.
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";

/// Leeway subtracted from the expiry instant when judging freshness.
const EXPIRY_LEEWAY_SECONDS: i64 = 60;

/// A resolved bearer token ready for use against the Google APIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Borrow the token value.
    #[must_use]
    pub const fn secret(&self) -> &str {
        self.0.as_str()
    }
}

/// The single serialized blob persisted in the token cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    /// Current access token.
    pub access_token: String,
    /// Refresh token, when the authorization server issued one.
    pub refresh_token: Option<String>,
    /// Expiry instant of the access token.
    pub expires_at: Option<DateTime<Utc>>,
}

impl StoredToken {
    /// Whether the access token should no longer be trusted at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| {
            expires_at - Duration::seconds(EXPIRY_LEEWAY_SECONDS) <= now
        })
    }
}

/// On-disk token cache holding one [`StoredToken`].
#[derive(Debug, Clone)]
pub struct TokenCache {
    path: std::path::PathBuf,
}

impl TokenCache {
    /// Creates a cache handle for the given path.
    #[must_use]
    pub const fn new(path: std::path::PathBuf) -> Self {
        Self { path }
    }

    /// Loads the cached token, treating every failure as a cache miss.
    #[must_use]
    pub fn load(&self) -> Option<StoredToken> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(token) => Some(token),
            Err(error) => {
                tracing::debug!(
                    "token cache at {} is unreadable, treating as miss: {error}",
                    self.path.display()
                );
                None
            }
        }
    }

    /// Persists the token, overwriting any previous cache entry.
    ///
    /// # Errors
    ///
    /// Returns [`DegradedReason::AuthorizationFailed`] when the blob cannot
    /// be serialized or written.
    pub fn store(&self, token: &StoredToken) -> Result<(), DegradedReason> {
        let serialized = serde_json::to_string_pretty(token).map_err(|error| {
            DegradedReason::AuthorizationFailed {
                message: format!("failed to serialize token cache: {error}"),
            }
        })?;
        std::fs::write(&self.path, serialized).map_err(|error| {
            DegradedReason::AuthorizationFailed {
                message: format!(
                    "failed to write token cache {}: {error}",
                    self.path.display()
                ),
            }
        })
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
}

impl TokenResponse {
    fn into_stored(self, previous_refresh: Option<String>, now: DateTime<Utc>) -> StoredToken {
        StoredToken {
            access_token: self.access_token,
            refresh_token: self.refresh_token.or(previous_refresh),
            expires_at: self
                .expires_in
                .map(|seconds| now + Duration::seconds(seconds)),
        }
    }
}

#[derive(Debug, Serialize)]
struct JwtClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

/// Resolves a [`CredentialSource`] into a usable bearer token.
pub struct Authenticator {
    http: reqwest::Client,
}

impl Authenticator {
    /// Creates an authenticator with a fresh HTTP client.
    #[must_use]
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Resolves the credential source, consulting and updating the cache.
    ///
    /// # Errors
    ///
    /// Returns [`DegradedReason::AuthorizationFailed`] when no usable token
    /// can be obtained.
    pub async fn resolve(
        &self,
        source: &CredentialSource,
        cache: &TokenCache,
    ) -> Result<BearerToken, DegradedReason> {
        match source {
            CredentialSource::Installed(client) => self.resolve_installed(client, cache).await,
            CredentialSource::ServiceAccount(key) => self.resolve_service_account(key).await,
        }
    }

    async fn resolve_installed(
        &self,
        client: &InstalledClient,
        cache: &TokenCache,
    ) -> Result<BearerToken, DegradedReason> {
        let now = Utc::now();

        if let Some(cached) = cache.load() {
            if !cached.is_expired(now) {
                tracing::debug!("using cached access token");
                return Ok(BearerToken(cached.access_token));
            }
            if let Some(refresh_token) = cached.refresh_token.clone() {
                tracing::debug!("cached token expired; refreshing in place");
                let refreshed = self.refresh(client, &refresh_token, now).await?;
                cache.store(&refreshed)?;
                return Ok(BearerToken(refreshed.access_token));
            }
            tracing::debug!("cached token expired without refresh capability");
        }

        let token = self.run_loopback_flow(client, now).await?;
        cache.store(&token)?;
        Ok(BearerToken(token.access_token))
    }

    async fn refresh(
        &self,
        client: &InstalledClient,
        refresh_token: &str,
        now: DateTime<Utc>,
    ) -> Result<StoredToken, DegradedReason> {
        let response = self
            .http
            .post(&client.token_uri)
            .form(&[
                ("client_id", client.client_id.as_str()),
                ("client_secret", client.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|error| DegradedReason::AuthorizationFailed {
                message: format!("token refresh request failed: {error}"),
            })?;

        let token = decode_token_response("token refresh", response).await?;
        Ok(token.into_stored(Some(refresh_token.to_owned()), now))
    }

    /// Runs the interactive loopback authorization flow.
    ///
    /// Blocks the whole process on a local listener until the user completes
    /// the browser consent screen and Google redirects back with a code.
    async fn run_loopback_flow(
        &self,
        client: &InstalledClient,
        now: DateTime<Utc>,
    ) -> Result<StoredToken, DegradedReason> {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await.map_err(|error| {
            DegradedReason::AuthorizationFailed {
                message: format!("failed to bind local callback listener: {error}"),
            }
        })?;
        let port = listener
            .local_addr()
            .map_err(|error| DegradedReason::AuthorizationFailed {
                message: format!("failed to resolve callback address: {error}"),
            })?
            .port();
        let redirect_uri = format!("http://127.0.0.1:{port}");

        let consent_url = build_consent_url(client, &redirect_uri)?;
        prompt_user(consent_url.as_str()).map_err(|error| DegradedReason::AuthorizationFailed {
            message: format!("failed to write authorization prompt: {error}"),
        })?;

        let code = wait_for_authorization_code(&listener).await?;
        tracing::debug!("authorization code received; exchanging for tokens");

        let response = self
            .http
            .post(&client.token_uri)
            .form(&[
                ("client_id", client.client_id.as_str()),
                ("client_secret", client.client_secret.as_str()),
                ("code", code.as_str()),
                ("grant_type", "authorization_code"),
                ("redirect_uri", redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|error| DegradedReason::AuthorizationFailed {
                message: format!("authorization code exchange failed: {error}"),
            })?;

        let token = decode_token_response("authorization code exchange", response).await?;
        Ok(token.into_stored(None, now))
    }

    async fn resolve_service_account(
        &self,
        key: &ServiceAccountKey,
    ) -> Result<BearerToken, DegradedReason> {
        let assertion = sign_service_account_assertion(key)?;

        let response = self
            .http
            .post(&key.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(|error| DegradedReason::AuthorizationFailed {
                message: format!("service-account token exchange failed: {error}"),
            })?;

        let token = decode_token_response("service-account token exchange", response).await?;
        Ok(BearerToken(token.access_token))
    }
}

impl Default for Authenticator {
    fn default() -> Self {
        Self::new()
    }
}

fn sign_service_account_assertion(key: &ServiceAccountKey) -> Result<String, DegradedReason> {
    let now = Utc::now().timestamp();
    let claims = JwtClaims {
        iss: key.client_email.clone(),
        scope: format!("{DOCUMENTS_SCOPE} {SPREADSHEETS_SCOPE}"),
        aud: key.token_uri.clone(),
        iat: now,
        exp: now + 3600,
    };

    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|error| {
        DegradedReason::CredentialsInvalid {
            message: format!("service-account private key is not valid PEM: {error}"),
        }
    })?;
    encode(&Header::new(Algorithm::RS256), &claims, &encoding_key).map_err(|error| {
        DegradedReason::AuthorizationFailed {
            message: format!("failed to sign service-account assertion: {error}"),
        }
    })
}

async fn decode_token_response(
    operation: &str,
    response: reqwest::Response,
) -> Result<TokenResponse, DegradedReason> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(DegradedReason::AuthorizationFailed {
            message: format!("{operation} returned {status}: {body}"),
        });
    }

    response
        .json::<TokenResponse>()
        .await
        .map_err(|error| DegradedReason::AuthorizationFailed {
            message: format!("{operation} returned an unreadable body: {error}"),
        })
}

fn build_consent_url(
    client: &InstalledClient,
    redirect_uri: &str,
) -> Result<Url, DegradedReason> {
    let mut consent_url =
        Url::parse(&client.auth_uri).map_err(|error| DegradedReason::CredentialsInvalid {
            message: format!("auth_uri is not a valid URL: {error}"),
        })?;
    consent_url
        .query_pairs_mut()
        .append_pair("client_id", &client.client_id)
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("response_type", "code")
        .append_pair("scope", &format!("{DOCUMENTS_SCOPE} {SPREADSHEETS_SCOPE}"))
        .append_pair("access_type", "offline")
        .append_pair("prompt", "consent");
    Ok(consent_url)
}

fn prompt_user(consent_url: &str) -> io::Result<()> {
    let mut stderr = io::stderr().lock();
    writeln!(
        stderr,
        "Open this URL in your browser to authorize access:\n{consent_url}"
    )
}

/// Accepts one redirect on the listener and extracts the `code` parameter.
async fn wait_for_authorization_code(listener: &TcpListener) -> Result<String, DegradedReason> {
    let (mut stream, _) =
        listener
            .accept()
            .await
            .map_err(|error| DegradedReason::AuthorizationFailed {
                message: format!("failed to accept authorization callback: {error}"),
            })?;

    let mut buffer = vec![0_u8; 4096];
    let read = stream
        .read(&mut buffer)
        .await
        .map_err(|error| DegradedReason::AuthorizationFailed {
            message: format!("failed to read authorization callback: {error}"),
        })?;
    let request = String::from_utf8_lossy(buffer.get(..read).unwrap_or_default());

    let code = extract_code_from_request(&request);

    let body = match code {
        Some(_) => "Authorization received. You may close this window.",
        None => "Authorization failed: no code was supplied.",
    };
    let reply = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\n\r\n{body}",
        body.len()
    );
    if let Err(error) = stream.write_all(reply.as_bytes()).await {
        tracing::warn!("failed to respond to authorization callback: {error}");
    }

    code.ok_or_else(|| DegradedReason::AuthorizationFailed {
        message: "authorization callback carried no code parameter".to_owned(),
    })
}

/// Pulls the `code` query parameter out of the callback's request line.
fn extract_code_from_request(request: &str) -> Option<String> {
    let request_line = request.lines().next()?;
    let target = request_line.split_whitespace().nth(1)?;
    let parsed = Url::parse(&format!("http://127.0.0.1{target}")).ok()?;
    parsed
        .query_pairs()
        .find(|(name, _)| name == "code")
        .map(|(_, value)| value.into_owned())
}
