//! Settings read from the environment.

use anyhow::{anyhow, Result};
use std::env;
use std::path::PathBuf;
use url::Url;

/// Address shown by the map button.
pub const MAP_URL: &str = "https://yandex.ru/maps/?text=Ленина 1";
/// Image sent by the `show_image` callback, relative to the working directory.
pub const DEFAULT_IMAGE_PATH: &str = "img1.jpg";
/// Cell read by the `get_a2_value` callback.
pub const DEFAULT_VALUE_CELL: &str = "A2";
/// Cell the date flow writes to.
pub const DEFAULT_DATE_CELL: &str = "B2";
/// Where YooMoney sends the operator after authorization.
pub const DEFAULT_REDIRECT_URI: &str = "https://t.me/my_test2_bot";

/// Bot settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bot API token (`TELEGRAM_TOKEN`).
    pub telegram_token: String,
    /// Target of the payment button (`YOOMONEY_LINK`).
    pub payment_link: Url,
    /// Target of the map button.
    pub map_url: Url,
    /// Spreadsheet the cell actions use (`SPREADSHEET_ID`).
    pub spreadsheet_id: String,
    /// Service-account key file (`CREDS_FILE`).
    pub credentials_path: PathBuf,
    /// Picture sent by the image button.
    pub image_path: PathBuf,
    /// Cell the value button reads.
    pub value_cell: String,
    /// Cell the date flow writes.
    pub date_cell: String,
    /// Port of the health endpoint (`HTTP_PORT`, default 3000).
    pub http_port: u16,
}

impl Config {
    /// Reads the settings from the environment. Every variable except
    /// `HTTP_PORT` is required.
    pub fn from_env() -> Result<Self> {
        let telegram_token = required("TELEGRAM_TOKEN")?;

        let payment_link = required("YOOMONEY_LINK")?;
        let payment_link = Url::parse(payment_link.trim())
            .map_err(|e| anyhow!("Invalid YOOMONEY_LINK: {e}"))?;

        let spreadsheet_id = required("SPREADSHEET_ID")?;
        let credentials_path = PathBuf::from(required("CREDS_FILE")?);

        let port_str = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "3000".to_string());
        let http_port = port_str.trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        Ok(Config {
            telegram_token,
            payment_link,
            map_url: Url::parse(MAP_URL)?,
            spreadsheet_id: spreadsheet_id.trim().to_string(),
            credentials_path,
            image_path: PathBuf::from(DEFAULT_IMAGE_PATH),
            value_cell: DEFAULT_VALUE_CELL.to_string(),
            date_cell: DEFAULT_DATE_CELL.to_string(),
            http_port,
        })
    }
}

/// Settings for the one-off YooMoney authorization run.
#[derive(Debug, Clone)]
pub struct YooMoneyConfig {
    /// Application id (`YOOMONEY_CLIENT_ID`).
    pub client_id: String,
    /// Registered redirect address (`YOOMONEY_REDIRECT_URI`).
    pub redirect_uri: Url,
    /// Only for applications registered with a secret.
    pub client_secret: Option<String>,
}

impl YooMoneyConfig {
    /// Reads the settings from the environment.
    pub fn from_env() -> Result<Self> {
        let client_id = required("YOOMONEY_CLIENT_ID")?;

        let redirect_uri = env::var("YOOMONEY_REDIRECT_URI")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string());
        let redirect_uri = Url::parse(redirect_uri.trim())
            .map_err(|e| anyhow!("Invalid YOOMONEY_REDIRECT_URI: {e}"))?;

        let client_secret = env::var("YOOMONEY_CLIENT_SECRET")
            .ok()
            .filter(|v| !v.trim().is_empty());

        Ok(YooMoneyConfig {
            client_id,
            redirect_uri,
            client_secret,
        })
    }
}

fn required(name: &str) -> Result<String> {
    let value = env::var(name).map_err(|_| anyhow!("{name} must be set"))?;
    if value.trim().is_empty() {
        return Err(anyhow!("{name} must be set"));
    }
    Ok(value)
}
