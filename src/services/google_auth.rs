//! Service-account authorization for the Google APIs.
//!
//! The credential file is exchanged for a short-lived bearer token using the
//! JWT bearer grant. Tokens are cached until shortly before they expire.

use async_trait::async_trait;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::services::sheets::SheetsError;
use crate::utils::logging::log_system_event;

/// Scopes requested for spreadsheet access.
pub const SCOPES: [&str; 2] = [
    "https://spreadsheets.google.com/feeds",
    "https://www.googleapis.com/auth/drive",
];

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Anything that can hand out a bearer token for the Sheets API.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// A token that is valid for at least a little while longer.
    async fn access_token(&self) -> Result<String, SheetsError>;
}

/// Fields of a service-account key file that the token exchange needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    /// Account the token is issued for.
    pub client_email: String,
    /// PEM-encoded RSA key used to sign the assertion.
    pub private_key: String,
    /// Sent as `kid` when present.
    #[serde(default)]
    pub private_key_id: Option<String>,
    /// Token endpoint; Google's default when missing.
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

impl ServiceAccountKey {
    /// Loads a key file from disk.
    pub fn from_file(path: &Path) -> Result<Self, SheetsError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            SheetsError::Credentials(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&raw)
    }

    /// Parses the contents of a key file.
    pub fn from_json(raw: &str) -> Result<Self, SheetsError> {
        serde_json::from_str(raw)
            .map_err(|e| SheetsError::Credentials(format!("malformed key file: {e}")))
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

struct CachedToken {
    token: String,
    expires_at: Instant,
}

/// Token source backed by a service-account key, with caching.
pub struct ServiceAccountTokenSource {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    http: reqwest::Client,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountTokenSource {
    /// Fails if the private key is not a valid RSA key.
    pub fn new(key: ServiceAccountKey, http: reqwest::Client) -> Result<Self, SheetsError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| SheetsError::Credentials(format!("invalid private key: {e}")))?;
        Ok(Self {
            key,
            encoding_key,
            http,
            cached: Mutex::new(None),
        })
    }

    fn signed_assertion(&self) -> Result<String, SheetsError> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            iss: &self.key.client_email,
            scope: SCOPES.join(" "),
            aud: &self.key.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| SheetsError::Credentials(format!("cannot sign assertion: {e}")))
    }

    async fn fetch(&self) -> Result<CachedToken, SheetsError> {
        let assertion = self.signed_assertion()?;
        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::Api { status: status.as_u16(), body });
        }

        let token: TokenResponse = response.json().await?;
        log_system_event(
            "Google access token refreshed",
            Some(&format!("valid for {}s", token.expires_in)),
        );
        Ok(CachedToken {
            token: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        })
    }
}

#[async_trait]
impl TokenSource for ServiceAccountTokenSource {
    async fn access_token(&self) -> Result<String, SheetsError> {
        let mut cached = self.cached.lock().await;
        if let Some(current) = cached.as_ref() {
            if current.expires_at > Instant::now() + REFRESH_MARGIN {
                return Ok(current.token.clone());
            }
        }

        let fresh = self.fetch().await?;
        let token = fresh.token.clone();
        *cached = Some(fresh);
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::State, routing::post, Form, Json, Router};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const TEST_KEY: &str = include_str!("../../tests/fixtures/service_account.json");

    async fn token_server(expires_in: u64) -> (String, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route(
                "/token",
                post(
                    move |State(hits): State<Arc<AtomicUsize>>,
                          Form(form): Form<HashMap<String, String>>| async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        let grant = form.get("grant_type").map(String::as_str);
                        assert_eq!(grant, Some(JWT_BEARER_GRANT));
                        let assertion = form.get("assertion").cloned().unwrap_or_default();
                        assert_eq!(assertion.split('.').count(), 3);
                        Json(serde_json::json!({
                            "access_token": "ya29.test",
                            "expires_in": expires_in,
                            "token_type": "Bearer",
                        }))
                    },
                ),
            )
            .with_state(hits.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}/token"), hits)
    }

    fn key_with_uri(token_uri: &str) -> ServiceAccountKey {
        let mut key = ServiceAccountKey::from_json(TEST_KEY).unwrap();
        key.token_uri = token_uri.to_string();
        key
    }

    #[test]
    fn test_key_file_parsing() {
        let key = ServiceAccountKey::from_json(TEST_KEY).unwrap();
        assert_eq!(key.client_email, "menu-bot@test-project.iam.gserviceaccount.com");
        assert_eq!(key.private_key_id.as_deref(), Some("test-key-id"));
        assert!(key.private_key.starts_with("-----BEGIN"));
    }

    #[test]
    fn test_key_file_from_disk() {
        let dir = tempfile::TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join("creds.json");
        std::fs::write(&path, TEST_KEY).unwrap();

        let key = ServiceAccountKey::from_file(&path).unwrap();
        assert_eq!(key.token_uri, "https://oauth2.googleapis.com/token");
    }

    #[test]
    fn test_malformed_key_file() {
        let err = ServiceAccountKey::from_json("{\"client_email\": 1}").unwrap_err();
        assert!(matches!(err, SheetsError::Credentials(_)));
    }

    #[test]
    fn test_missing_key_file() {
        let err = ServiceAccountKey::from_file(Path::new("/nonexistent/creds.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/creds.json"));
    }

    #[test]
    fn test_invalid_private_key_rejected() {
        let mut key = ServiceAccountKey::from_json(TEST_KEY).unwrap();
        key.private_key = "not a pem".to_string();
        assert!(ServiceAccountTokenSource::new(key, reqwest::Client::new()).is_err());
    }

    #[tokio::test]
    async fn test_token_is_fetched_and_cached() {
        let (uri, hits) = token_server(3600).await;
        let source =
            ServiceAccountTokenSource::new(key_with_uri(&uri), reqwest::Client::new()).unwrap();

        assert_eq!(source.access_token().await.unwrap(), "ya29.test");
        assert_eq!(source.access_token().await.unwrap(), "ya29.test");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expiring_token_is_refreshed() {
        // Shorter than the refresh margin, so every call goes back to the server
        let (uri, hits) = token_server(30).await;
        let source =
            ServiceAccountTokenSource::new(key_with_uri(&uri), reqwest::Client::new()).unwrap();

        source.access_token().await.unwrap();
        source.access_token().await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
