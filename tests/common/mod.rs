#![allow(dead_code)]

use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use dj_booking_api::{
    config::Config,
    error::StoreError,
    sanity::ContentStore,
    sheets::{RowStore, SheetInfo, SpreadsheetMeta, TokenProvider},
    AppState,
};

pub const SERVICE_ACCOUNT_KEY: &str = include_str!("../fixtures/service_account_key.pem");
pub const SERVICE_ACCOUNT_PUBLIC_KEY: &str = include_str!("../fixtures/service_account_pub.pem");

pub fn test_config(overrides: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = overrides
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|name| vars.get(name).cloned()).expect("test config must parse")
}

/// In-memory row-store: листы как вектора строк, все append записываются.
#[derive(Default)]
pub struct FakeRowStore {
    pub sheets: Mutex<HashMap<String, Vec<Vec<String>>>>,
    pub appended: Mutex<Vec<(String, Vec<Value>)>>,
    pub reads: Mutex<Vec<(String, String)>>,
    pub fail_reads: bool,
    pub fail_appends: bool,
    pub fail_meta: bool,
}

impl FakeRowStore {
    pub fn with_sheet(sheet: &str, rows: Vec<Vec<&str>>) -> Self {
        let store = Self::default();
        store.set_rows(sheet, rows);
        store
    }

    pub fn set_rows(&self, sheet: &str, rows: Vec<Vec<&str>>) {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(str::to_string).collect())
            .collect();
        self.sheets.lock().unwrap().insert(sheet.to_string(), rows);
    }

    pub fn appended(&self) -> Vec<(String, Vec<Value>)> {
        self.appended.lock().unwrap().clone()
    }

    fn unavailable() -> StoreError {
        StoreError::Upstream {
            status: 503,
            message: "The service is currently unavailable.".to_string(),
        }
    }
}

#[async_trait]
impl RowStore for FakeRowStore {
    async fn append_row(&self, sheet: &str, row: Vec<Value>) -> Result<(), StoreError> {
        if self.fail_appends {
            return Err(Self::unavailable());
        }
        let cells = row
            .iter()
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect();
        self.sheets
            .lock()
            .unwrap()
            .entry(sheet.to_string())
            .or_default()
            .push(cells);
        self.appended.lock().unwrap().push((sheet.to_string(), row));
        Ok(())
    }

    // Диапазон не разбирается: колонка A:A отдаёт первые ячейки, A2:* - строки без заголовка
    async fn read_range(&self, sheet: &str, range: &str) -> Result<Vec<Vec<String>>, StoreError> {
        self.reads
            .lock()
            .unwrap()
            .push((sheet.to_string(), range.to_string()));
        if self.fail_reads {
            return Err(Self::unavailable());
        }

        let rows = self
            .sheets
            .lock()
            .unwrap()
            .get(sheet)
            .cloned()
            .unwrap_or_default();

        Ok(match range {
            "A:A" => rows
                .into_iter()
                .map(|row| row.into_iter().take(1).collect())
                .collect(),
            r if r.starts_with("A2") => rows.into_iter().skip(1).collect(),
            _ => rows,
        })
    }

    async fn spreadsheet_meta(&self) -> Result<SpreadsheetMeta, StoreError> {
        if self.fail_meta {
            return Err(StoreError::NotConfigured("SPREADSHEET_ID"));
        }
        let sheets = self.sheets.lock().unwrap();
        let mut titles: Vec<&String> = sheets.keys().collect();
        titles.sort();
        Ok(SpreadsheetMeta {
            title: "DJ Bookings".to_string(),
            sheets: titles
                .into_iter()
                .enumerate()
                .map(|(i, title)| SheetInfo {
                    sheet_id: i as i64,
                    title: title.clone(),
                })
                .collect(),
        })
    }
}

/// Content-store, отвечающий заранее заданным JSON на конкретный GROQ-запрос.
#[derive(Default)]
pub struct FakeContentStore {
    pub responses: HashMap<String, Value>,
    pub queries: Mutex<Vec<String>>,
    pub fail: bool,
}

impl FakeContentStore {
    pub fn with_response(query: &str, result: Value) -> Self {
        let mut store = Self::default();
        store.responses.insert(query.to_string(), result);
        store
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl ContentStore for FakeContentStore {
    async fn query(&self, expression: &str) -> Result<Value, StoreError> {
        self.queries.lock().unwrap().push(expression.to_string());
        if self.fail {
            return Err(StoreError::Upstream {
                status: 401,
                message: "Unauthorized - Session not found".to_string(),
            });
        }
        Ok(self
            .responses
            .get(expression)
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new())))
    }
}

/// Фиксированный токен, чтобы тесты Sheets-клиента не ходили в token endpoint.
pub struct StaticToken(pub &'static str);

#[async_trait]
impl TokenProvider for StaticToken {
    async fn access_token(&self) -> Result<String, StoreError> {
        Ok(self.0.to_string())
    }
}

pub fn router(config: Config, rows: Arc<FakeRowStore>, content: Arc<FakeContentStore>) -> Router {
    dj_booking_api::app(AppState::with_stores(config, rows, content))
}

/// Отправляет запрос в роутер и возвращает статус, заголовки и тело как JSON (или строку).
pub async fn send(
    app: Router,
    request: Request<Body>,
) -> (axum::http::StatusCode, axum::http::HeaderMap, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, headers, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
