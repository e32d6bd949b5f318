//! auth.rs
//!
//! OAuth2 для сервисного аккаунта Google: подписываем JWT-утверждение ключом
//! аккаунта (RS256), меняем его на access token в token endpoint и держим токен
//! в памяти до истечения. Один экземпляр живёт всё время работы процесса.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::{config::SheetsConfig, credentials::normalize_private_key, error::StoreError};

pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
/// Google выдаёт утверждения максимум на час.
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Обновляем токен заранее, чтобы он не истёк посреди запроса.
const REFRESH_MARGIN_SECS: i64 = 60;

/// Источник bearer-токена для Sheets API.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, StoreError>;
}

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(REFRESH_MARGIN_SECS) > now
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Токены сервисного аккаунта с кешированием.
pub struct ServiceAccountAuth {
    http_client: reqwest::Client,
    client_email: Option<String>,
    /// Уже нормализованный PEM.
    private_key: Option<String>,
    token_url: String,
    scope: String,
    cached: RwLock<Option<AccessToken>>,
}

impl ServiceAccountAuth {
    pub fn from_config(config: &SheetsConfig, http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            client_email: config.client_email.clone(),
            private_key: config.private_key.as_deref().map(normalize_private_key),
            token_url: config.token_url.clone(),
            scope: SPREADSHEETS_SCOPE.to_string(),
            cached: RwLock::new(None),
        }
    }

    fn sign_assertion(&self, now: DateTime<Utc>) -> Result<String, StoreError> {
        let email = self
            .client_email
            .as_deref()
            .ok_or(StoreError::NotConfigured("GOOGLE_CLIENT_EMAIL"))?;
        let key = self
            .private_key
            .as_deref()
            .ok_or(StoreError::NotConfigured("GOOGLE_PRIVATE_KEY"))?;

        let claims = AssertionClaims {
            iss: email,
            scope: &self.scope,
            aud: &self.token_url,
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        };

        let encoding_key = EncodingKey::from_rsa_pem(key.as_bytes())?;
        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::RS256),
            &claims,
            &encoding_key,
        )?)
    }

    async fn fetch_token(&self) -> Result<AccessToken, StoreError> {
        let now = Utc::now();
        let assertion = self.sign_assertion(now)?;

        let body = serde_urlencoded::to_string([
            ("grant_type", JWT_BEARER_GRANT),
            ("assertion", assertion.as_str()),
        ])
        .map_err(|e| StoreError::Auth(e.to_string()))?;

        let response = self
            .http_client
            .post(&self.token_url)
            .header(reqwest::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let err = StoreError::from_response(response).await;
            return Err(StoreError::Auth(err.to_string()));
        }

        let token: TokenResponse = response.json().await?;
        info!("Obtained Google access token, expires in {}s", token.expires_in);

        Ok(AccessToken {
            value: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        })
    }
}

#[async_trait]
impl TokenProvider for ServiceAccountAuth {
    async fn access_token(&self) -> Result<String, StoreError> {
        // Быстрый путь: свежий токен в кеше
        {
            let cached = self.cached.read().await;
            if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(Utc::now())) {
                return Ok(token.value.clone());
            }
        }

        let mut cached = self.cached.write().await;
        // Пока ждали блокировку, токен мог обновить другой запрос
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(Utc::now())) {
            return Ok(token.value.clone());
        }

        debug!("Refreshing Google access token");
        let token = self.fetch_token().await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }
}
