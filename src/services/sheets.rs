//! Google Sheets access for single cells.
//!
//! Ranges are plain A1 references without a sheet name, so every call
//! addresses the first sheet of the spreadsheet.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use url::Url;

use crate::services::google_auth::TokenSource;
use crate::utils::logging::{log_sheet_error, log_sheet_operation};

/// Production Sheets API host.
pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com";

/// Errors from the spreadsheet and its credentials.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// Key file missing, malformed, or unusable for signing.
    #[error("credentials error: {0}")]
    Credentials(String),
    /// Transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-success answer from Google.
    #[error("Sheets API returned {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body as returned.
        body: String,
    },
    /// Base URL cannot hold path segments.
    #[error("invalid spreadsheet address: {0}")]
    Address(String),
}

/// Read and write access to individual cells of one spreadsheet.
#[async_trait]
pub trait CellStore: Send + Sync {
    /// Formatted value of `cell`; an empty cell reads as `""`.
    async fn read_cell(&self, cell: &str) -> Result<String, SheetsError>;

    /// Stores `value` in `cell` exactly as given.
    async fn write_cell(&self, cell: &str, value: &str) -> Result<(), SheetsError>;

    /// Checks that the spreadsheet is reachable with the current credentials.
    async fn ping(&self) -> Result<(), SheetsError>;
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueUpdate<'a> {
    range: &'a str,
    major_dimension: &'static str,
    values: [[&'a str; 1]; 1],
}

/// `CellStore` over the Sheets v4 REST API.
pub struct SheetsClient {
    http: reqwest::Client,
    tokens: Arc<dyn TokenSource>,
    base_url: Url,
    spreadsheet_id: String,
}

impl SheetsClient {
    /// Client for the production API.
    pub fn new(
        http: reqwest::Client,
        tokens: Arc<dyn TokenSource>,
        spreadsheet_id: impl Into<String>,
    ) -> Result<Self, SheetsError> {
        let base_url = Url::parse(SHEETS_API_BASE)
            .map_err(|e| SheetsError::Address(e.to_string()))?;
        Ok(Self::with_base_url(http, tokens, spreadsheet_id, base_url))
    }

    /// Client for another API host, e.g. a local fake in tests.
    pub fn with_base_url(
        http: reqwest::Client,
        tokens: Arc<dyn TokenSource>,
        spreadsheet_id: impl Into<String>,
        base_url: Url,
    ) -> Self {
        Self {
            http,
            tokens,
            base_url,
            spreadsheet_id: spreadsheet_id.into(),
        }
    }

    fn spreadsheet_url(&self, tail: &[&str]) -> Result<Url, SheetsError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| SheetsError::Address(self.base_url.to_string()))?;
            segments
                .pop_if_empty()
                .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str()])
                .extend(tail);
        }
        Ok(url)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, SheetsError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(SheetsError::Api { status: status.as_u16(), body })
    }

    async fn get_cell(&self, cell: &str) -> Result<String, SheetsError> {
        let url = self.spreadsheet_url(&["values", cell])?;
        let token = self.tokens.access_token().await?;
        let response = self.http.get(url).bearer_auth(token).send().await?;
        let range: ValueRange = Self::check(response).await?.json().await?;

        Ok(range
            .values
            .into_iter()
            .next()
            .and_then(|row| row.into_iter().next())
            .unwrap_or_default())
    }

    async fn put_cell(&self, cell: &str, value: &str) -> Result<(), SheetsError> {
        let mut url = self.spreadsheet_url(&["values", cell])?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");
        let token = self.tokens.access_token().await?;

        let body = ValueUpdate {
            range: cell,
            major_dimension: "ROWS",
            values: [[value]],
        };
        let response = self.http.put(url).bearer_auth(token).json(&body).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl CellStore for SheetsClient {
    async fn read_cell(&self, cell: &str) -> Result<String, SheetsError> {
        log_sheet_operation("read", cell, None);
        let result = self.get_cell(cell).await;
        if let Err(e) = &result {
            log_sheet_error("read", cell, &e.to_string());
        }
        result
    }

    async fn write_cell(&self, cell: &str, value: &str) -> Result<(), SheetsError> {
        log_sheet_operation("write", cell, Some(value));
        let result = self.put_cell(cell, value).await;
        if let Err(e) = &result {
            log_sheet_error("write", cell, &e.to_string());
        }
        result
    }

    async fn ping(&self) -> Result<(), SheetsError> {
        let mut url = self.spreadsheet_url(&[])?;
        url.query_pairs_mut().append_pair("fields", "spreadsheetId");
        let token = self.tokens.access_token().await?;
        let response = self.http.get(url).bearer_auth(token).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}
