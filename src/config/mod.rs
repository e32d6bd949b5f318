use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub sheets: SheetsConfig,
    pub sanity: SanityConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `true`, если PORT явно задан в окружении (для отчёта `/api/debug`).
    pub port_from_env: bool,
    pub rust_log: String,
    pub log_format: LogFormat,
    pub static_dir: Option<String>,
    pub content_source: ContentSource,
}

// Настройки Google Sheets (row-store). Учётные данные не проверяются на старте.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetsConfig {
    pub client_email: Option<String>,
    /// Сырой ключ из окружения, нормализуется при использовании.
    pub private_key: Option<String>,
    pub spreadsheet_id: Option<String>,
    pub submissions_sheet: String,
    pub api_url: String,
    pub token_url: String,
}

// Настройки Sanity (content-store)
#[derive(Debug, Clone, Deserialize)]
pub struct SanityConfig {
    pub project_id: Option<String>,
    pub dataset: String,
    pub api_version: String,
    pub token: Option<String>,
    pub use_cdn: bool,
    /// Переопределение базового URL, иначе `https://{project}.api.sanity.io`.
    pub api_url: Option<String>,
}

/// Откуда читают `/api/events`, `/api/mixes` и `/api/gallery`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    Sanity,
    Sheets,
}

impl FromStr for ContentSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sanity" => Ok(ContentSource::Sanity),
            "sheets" => Ok(ContentSource::Sheets),
            other => Err(format!("unknown content source '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Собирает конфигурацию из произвольного источника переменных (в тестах - HashMap).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Пустые значения считаем незаданными
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port_raw = var("PORT");
        let port_from_env = port_raw.is_some();

        Ok(Config {
            app: AppConfig {
                host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_or("PORT", port_raw, DEFAULT_PORT)?,
                port_from_env,
                rust_log: var("RUST_LOG")
                    .unwrap_or_else(|| "dj_booking_api=debug,tower_http=debug".to_string()),
                log_format: parse_or("LOG_FORMAT", var("LOG_FORMAT"), LogFormat::Text)?,
                static_dir: var("STATIC_DIR"),
                content_source: parse_or(
                    "CONTENT_SOURCE",
                    var("CONTENT_SOURCE"),
                    ContentSource::Sanity,
                )?,
            },
            sheets: SheetsConfig {
                client_email: var("GOOGLE_CLIENT_EMAIL"),
                private_key: var("GOOGLE_PRIVATE_KEY"),
                spreadsheet_id: var("SPREADSHEET_ID"),
                submissions_sheet: var("SUBMISSIONS_SHEET").unwrap_or_else(|| "Sheet1".to_string()),
                api_url: var("GOOGLE_SHEETS_API_URL")
                    .unwrap_or_else(|| "https://sheets.googleapis.com".to_string()),
                token_url: var("GOOGLE_TOKEN_URL")
                    .unwrap_or_else(|| "https://oauth2.googleapis.com/token".to_string()),
            },
            sanity: SanityConfig {
                project_id: var("SANITY_PROJECT_ID"),
                dataset: var("SANITY_DATASET").unwrap_or_else(|| "production".to_string()),
                api_version: var("SANITY_API_VERSION").unwrap_or_else(|| "2023-05-03".to_string()),
                token: var("SANITY_TOKEN"),
                use_cdn: parse_or("SANITY_USE_CDN", var("SANITY_USE_CDN"), false)?,
                api_url: var("SANITY_API_URL"),
            },
        })
    }
}

fn parse_or<T>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.app.port, 3000);
        assert!(!config.app.port_from_env);
        assert_eq!(config.app.host, "0.0.0.0");
        assert_eq!(config.app.content_source, ContentSource::Sanity);
        assert_eq!(config.app.log_format, LogFormat::Text);
        assert_eq!(config.sheets.submissions_sheet, "Sheet1");
        assert_eq!(config.sheets.token_url, "https://oauth2.googleapis.com/token");
        assert_eq!(config.sanity.dataset, "production");
        assert_eq!(config.sanity.api_version, "2023-05-03");
        assert!(!config.sanity.use_cdn);
        assert!(config.sheets.private_key.is_none());
        assert!(config.sanity.project_id.is_none());
    }

    #[test]
    fn missing_credentials_are_not_an_error() {
        let config = config_from(&[("SPREADSHEET_ID", "")]).unwrap();
        assert!(config.sheets.spreadsheet_id.is_none());
        assert!(config.sheets.client_email.is_none());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("CONTENT_SOURCE", "Sheets"),
            ("LOG_FORMAT", "json"),
            ("SANITY_PROJECT_ID", "abc123"),
            ("SANITY_USE_CDN", "true"),
            ("SUBMISSIONS_SHEET", "Bookings"),
        ])
        .unwrap();

        assert_eq!(config.app.port, 8080);
        assert!(config.app.port_from_env);
        assert_eq!(config.app.content_source, ContentSource::Sheets);
        assert_eq!(config.app.log_format, LogFormat::Json);
        assert_eq!(config.sanity.project_id.as_deref(), Some("abc123"));
        assert!(config.sanity.use_cdn);
        assert_eq!(config.sheets.submissions_sheet, "Bookings");
    }

    #[test]
    fn unparsable_port_is_rejected() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn unknown_content_source_is_rejected() {
        let err = config_from(&[("CONTENT_SOURCE", "airtable")]).unwrap_err();
        assert!(err.to_string().contains("airtable"));
    }
}
