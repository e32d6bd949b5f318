//! Google Sheets как row-store: дописывание строк и чтение диапазонов.

pub mod auth;
pub mod client;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StoreError;

pub use auth::{ServiceAccountAuth, TokenProvider, SPREADSHEETS_SCOPE};
pub use client::SheetsClient;

/// Метаданные таблицы, нужны только для проверки связи.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpreadsheetMeta {
    pub title: String,
    pub sheets: Vec<SheetInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetInfo {
    // API опускает нулевой sheetId у первого листа
    #[serde(default)]
    pub sheet_id: i64,
    pub title: String,
}

#[async_trait]
pub trait RowStore: Send + Sync {
    /// Дописывает одну строку после последней заполненной строки листа.
    async fn append_row(&self, sheet: &str, row: Vec<Value>) -> Result<(), StoreError>;

    /// Читает значения диапазона `range` (A1-нотация без имени листа) листа `sheet`.
    /// Пустой диапазон - пустой вектор, не ошибка.
    async fn read_range(&self, sheet: &str, range: &str) -> Result<Vec<Vec<String>>, StoreError>;

    async fn spreadsheet_meta(&self) -> Result<SpreadsheetMeta, StoreError>;
}

/// `'Sheet1'!A:A`; апостроф в имени листа удваивается.
pub fn a1_range(sheet: &str, range: &str) -> String {
    format!("'{}'!{}", sheet.replace('\'', "''"), range)
}
