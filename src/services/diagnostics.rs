//! diagnostics.rs
//!
//! Отчёт для `/api/debug`: какие переменные окружения заданы, в порядке ли ключ
//! и отвечают ли оба хранилища. Ошибки хранилищ попадают в тело отчёта, сам
//! отчёт собирается всегда.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    config::{ContentSource, DEFAULT_PORT},
    credentials::key_format,
    sanity::{ContentStore, EVENT_COUNT_QUERY},
    sheets::RowStore,
    AppState,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugReport {
    pub env: EnvReport,
    pub sanity: SanityReport,
    pub sheets: SheetsReport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvReport {
    #[serde(rename = "PORT")]
    pub port: String,
    #[serde(rename = "SPREADSHEET_ID")]
    pub spreadsheet_id: String,
    #[serde(rename = "GOOGLE_CLIENT_EMAIL")]
    pub google_client_email: String,
    #[serde(rename = "GOOGLE_PRIVATE_KEY")]
    pub google_private_key: String,
    #[serde(rename = "SANITY_PROJECT_ID")]
    pub sanity_project_id: String,
    #[serde(rename = "SANITY_TOKEN")]
    pub sanity_token: String,
    #[serde(rename = "CONTENT_SOURCE")]
    pub content_source: ContentSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanityReport {
    pub project_id: Option<String>,
    pub dataset: String,
    pub token: String,
    pub connection: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetsReport {
    pub connection: String,
}

fn presence(value: Option<&String>) -> String {
    let label = if value.is_some() { "Set" } else { "MISSING" };
    label.to_string()
}

fn optional_presence(value: Option<&String>) -> String {
    let label = if value.is_some() { "Set" } else { "Not Set" };
    label.to_string()
}

pub fn env_report(state: &AppState) -> EnvReport {
    let config = &state.config;

    EnvReport {
        port: if config.app.port_from_env {
            config.app.port.to_string()
        } else {
            format!("Not Set (Default {})", DEFAULT_PORT)
        },
        spreadsheet_id: presence(config.sheets.spreadsheet_id.as_ref()),
        google_client_email: presence(config.sheets.client_email.as_ref()),
        google_private_key: key_format(config.sheets.private_key.as_deref())
            .as_str()
            .to_string(),
        sanity_project_id: presence(config.sanity.project_id.as_ref()),
        sanity_token: optional_presence(config.sanity.token.as_ref()),
        content_source: config.app.content_source,
    }
}

// Вызовы к хранилищам идут последовательно, как и в обычных обработчиках
pub async fn debug_report(state: &AppState) -> DebugReport {
    let config = &state.config;

    DebugReport {
        env: env_report(state),
        sanity: SanityReport {
            project_id: config.sanity.project_id.clone(),
            dataset: config.sanity.dataset.clone(),
            token: optional_presence(config.sanity.token.as_ref()),
            connection: probe_sanity(state.content.as_ref()).await,
        },
        sheets: SheetsReport {
            connection: probe_sheets(state.sheets.as_ref()).await,
        },
    }
}

async fn probe_sanity(store: &dyn ContentStore) -> String {
    match store.query(EVENT_COUNT_QUERY).await {
        Ok(Value::Number(count)) => format!("Success (Found {} events)", count),
        Ok(_) => "Success".to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "Sanity connectivity check failed");
            format!("Failed: {}", e)
        }
    }
}

async fn probe_sheets(store: &dyn RowStore) -> String {
    match store.spreadsheet_meta().await {
        Ok(meta) => format!("Success ({}, {} sheets)", meta.title, meta.sheets.len()),
        Err(e) => {
            tracing::warn!(error = %e, "Sheets connectivity check failed");
            format!("Failed: {}", e)
        }
    }
}
