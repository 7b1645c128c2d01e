//! One-time YooMoney OAuth authorization.
//!
//! The operator opens the authorization page, grants access, and pastes the
//! redirect URL back. The code from that URL is exchanged for a long-lived
//! access token that the payment link setup uses.

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::config::YooMoneyConfig;

/// Production YooMoney host.
pub const YOOMONEY_BASE: &str = "https://yoomoney.ru";

/// Permissions requested from the wallet owner.
pub const SCOPES: [&str; 6] = [
    "account-info",
    "operation-history",
    "operation-details",
    "incoming-transfers",
    "payment-p2p",
    "payment-shop",
];

/// Errors of the authorization run.
#[derive(Debug, Error)]
pub enum YooMoneyError {
    /// Transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// Malformed base or redirect URL.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    /// YooMoney reported an error code.
    #[error("authorization was refused: {0}")]
    Refused(String),
    /// No `code` in the pasted redirect URL.
    #[error("redirect URL has no authorization code")]
    MissingCode,
    /// The token answer had neither a token nor an error.
    #[error("token endpoint returned no access token")]
    EmptyToken,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: String,
    #[serde(default)]
    error: Option<String>,
}

/// Runs the OAuth authorization code flow against YooMoney.
pub struct YooMoneyAuthorizer {
    http: reqwest::Client,
    config: YooMoneyConfig,
    base_url: Url,
}

impl YooMoneyAuthorizer {
    /// Authorizer for the production host.
    pub fn new(http: reqwest::Client, config: YooMoneyConfig) -> Result<Self, YooMoneyError> {
        Ok(Self::with_base_url(http, config, Url::parse(YOOMONEY_BASE)?))
    }

    /// Authorizer for another host, e.g. a local fake in tests.
    pub fn with_base_url(http: reqwest::Client, config: YooMoneyConfig, base_url: Url) -> Self {
        Self { http, config, base_url }
    }

    /// Authorization page address with every request parameter filled in.
    pub fn authorize_url(&self) -> Result<Url, YooMoneyError> {
        let mut url = self.base_url.join("/oauth/authorize")?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", self.config.redirect_uri.as_str())
            .append_pair("scope", &SCOPES.join(" "));
        Ok(url)
    }

    /// Submits the authorization request and returns the page the operator
    /// has to open (YooMoney answers with a redirect to its login form).
    pub async fn start(&self) -> Result<Url, YooMoneyError> {
        let response = self
            .http
            .post(self.authorize_url()?)
            .header(reqwest::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .send()
            .await?;
        Ok(response.url().clone())
    }

    /// Trades the authorization code for an access token.
    pub async fn exchange_code(&self, code: &str) -> Result<String, YooMoneyError> {
        let url = self.base_url.join("/oauth/token")?;
        let mut form = vec![
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];
        if let Some(secret) = &self.config.client_secret {
            form.push(("client_secret", secret.as_str()));
        }

        let token: TokenResponse = self.http.post(url).form(&form).send().await?.json().await?;
        if let Some(error) = token.error {
            return Err(YooMoneyError::Refused(error));
        }
        if token.access_token.is_empty() {
            return Err(YooMoneyError::EmptyToken);
        }
        Ok(token.access_token)
    }
}

/// Pulls the `code` parameter out of the URL the operator was redirected to.
pub fn extract_code(redirected: &str) -> Result<String, YooMoneyError> {
    let url = Url::parse(redirected.trim())?;
    let mut code = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "error" => return Err(YooMoneyError::Refused(value.into_owned())),
            "code" if !value.is_empty() => code = Some(value.into_owned()),
            _ => {}
        }
    }
    code.ok_or(YooMoneyError::MissingCode)
}
