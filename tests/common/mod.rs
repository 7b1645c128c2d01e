#![allow(dead_code)]

use async_trait::async_trait;
use sheets_menu_bot::config::{Config, DEFAULT_DATE_CELL, DEFAULT_VALUE_CELL, MAP_URL};
use sheets_menu_bot::services::sheets::{CellStore, SheetsError};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use url::Url;

pub fn test_config() -> Config {
    Config {
        telegram_token: "test_token".to_string(),
        payment_link: Url::parse("https://yoomoney.ru/quickpay/confirm?receiver=4100&sum=2")
            .unwrap(),
        map_url: Url::parse(MAP_URL).unwrap(),
        spreadsheet_id: "sheet-123".to_string(),
        credentials_path: PathBuf::from("creds.json"),
        image_path: PathBuf::from("img1.jpg"),
        value_cell: DEFAULT_VALUE_CELL.to_string(),
        date_cell: DEFAULT_DATE_CELL.to_string(),
        http_port: 3000,
    }
}

/// Spreadsheet double that keeps cells in memory and records every write.
#[derive(Default)]
pub struct MemoryStore {
    pub cells: Mutex<HashMap<String, String>>,
    pub writes: Mutex<Vec<(String, String)>>,
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl CellStore for MemoryStore {
    async fn read_cell(&self, cell: &str) -> Result<String, SheetsError> {
        Ok(self.cells.lock().unwrap().get(cell).cloned().unwrap_or_default())
    }

    async fn write_cell(&self, cell: &str, value: &str) -> Result<(), SheetsError> {
        if self.fail_writes {
            return Err(SheetsError::Api { status: 503, body: "unavailable".into() });
        }
        self.writes.lock().unwrap().push((cell.to_string(), value.to_string()));
        self.cells.lock().unwrap().insert(cell.to_string(), value.to_string());
        Ok(())
    }

    async fn ping(&self) -> Result<(), SheetsError> {
        Ok(())
    }
}
