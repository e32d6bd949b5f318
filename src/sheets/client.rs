use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info};

use super::{a1_range, RowStore, SheetInfo, SpreadsheetMeta, TokenProvider};
use crate::{config::SheetsConfig, error::StoreError};

/// Клиент Google Sheets API v4.
#[derive(Clone)]
pub struct SheetsClient {
    http_client: reqwest::Client,
    /// Базовый URL API, в тестах подменяется адресом mock-сервера.
    base_url: String,
    spreadsheet_id: Option<String>,
    auth: Arc<dyn TokenProvider>,
}

// --- Ответы API ---

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetResponse {
    properties: SpreadsheetProperties,
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetProperties {
    #[serde(default)]
    title: String,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetInfo,
}

impl SheetsClient {
    pub fn from_config(
        config: &SheetsConfig,
        http_client: reqwest::Client,
        auth: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            http_client,
            base_url: config.api_url.clone(),
            spreadsheet_id: config.spreadsheet_id.clone(),
            auth,
        }
    }

    fn spreadsheet_id(&self) -> Result<&str, StoreError> {
        self.spreadsheet_id
            .as_deref()
            .ok_or(StoreError::NotConfigured("SPREADSHEET_ID"))
    }

    /// `{base}/v4/spreadsheets/{id}/{extra...}` с экранированием сегментов.
    fn endpoint(&self, extra: &[&str]) -> Result<Url, StoreError> {
        let id = self.spreadsheet_id()?;
        let mut url =
            Url::parse(&self.base_url).map_err(|e| StoreError::InvalidUrl(e.to_string()))?;

        url.path_segments_mut()
            .map_err(|_| StoreError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", id])
            .extend(extra);

        Ok(url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, StoreError> {
        let token = self.auth.access_token().await?;
        let response = request.bearer_auth(token).send().await?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(StoreError::from_response(response).await)
        }
    }
}

#[async_trait]
impl RowStore for SheetsClient {
    async fn append_row(&self, sheet: &str, row: Vec<Value>) -> Result<(), StoreError> {
        let target = format!("{}:append", a1_range(sheet, "A1"));
        let url = self.endpoint(&["values", &target])?;

        let request = self
            .http_client
            .post(url)
            .query(&[("valueInputOption", "USER_ENTERED")])
            .json(&json!({ "values": [row] }));

        self.send(request).await?;
        info!("Appended row to sheet '{}'", sheet);
        Ok(())
    }

    async fn read_range(&self, sheet: &str, range: &str) -> Result<Vec<Vec<String>>, StoreError> {
        let url = self.endpoint(&["values", &a1_range(sheet, range)])?;

        let response = self.send(self.http_client.get(url)).await?;
        let body: ValueRange = response.json().await?;
        debug!("Read {} rows from {}", body.values.len(), a1_range(sheet, range));

        Ok(body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    async fn spreadsheet_meta(&self) -> Result<SpreadsheetMeta, StoreError> {
        let url = self.endpoint(&[])?;

        let request = self
            .http_client
            .get(url)
            .query(&[("fields", "properties.title,sheets.properties(sheetId,title)")]);

        let body: SpreadsheetResponse = self.send(request).await?.json().await?;

        Ok(SpreadsheetMeta {
            title: body.properties.title,
            sheets: body.sheets.into_iter().map(|s| s.properties).collect(),
        })
    }
}

// По умолчанию API отдаёт FORMATTED_VALUE (строки), но числа тоже встречаются
fn cell_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
