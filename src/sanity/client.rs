use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::ContentStore;
use crate::{config::SanityConfig, error::StoreError};

/// Клиент Sanity HTTP Query API (`/v{apiVersion}/data/query/{dataset}`).
#[derive(Clone)]
pub struct SanityClient {
    http_client: reqwest::Client,
    project_id: Option<String>,
    dataset: String,
    api_version: String,
    token: Option<String>,
    use_cdn: bool,
    api_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Value,
}

impl SanityClient {
    pub fn from_config(config: &SanityConfig, http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            project_id: config.project_id.clone(),
            dataset: config.dataset.clone(),
            api_version: config.api_version.clone(),
            token: config.token.clone(),
            use_cdn: config.use_cdn,
            api_url: config.api_url.clone(),
        }
    }

    fn base_url(&self) -> Result<String, StoreError> {
        if let Some(url) = &self.api_url {
            return Ok(url.clone());
        }

        let project_id = self
            .project_id
            .as_deref()
            .ok_or(StoreError::NotConfigured("SANITY_PROJECT_ID"))?;
        // CDN не видит приватные датасеты и отдаёт данные с задержкой
        let host = if self.use_cdn && self.token.is_none() {
            "apicdn.sanity.io"
        } else {
            "api.sanity.io"
        };

        Ok(format!("https://{}.{}", project_id, host))
    }

    fn query_url(&self) -> Result<Url, StoreError> {
        let base = self.base_url()?;
        let mut url = Url::parse(&base).map_err(|e| StoreError::InvalidUrl(e.to_string()))?;

        let version = format!("v{}", self.api_version.trim_start_matches('v'));
        url.path_segments_mut()
            .map_err(|_| StoreError::InvalidUrl(base.clone()))?
            .pop_if_empty()
            .extend([version.as_str(), "data", "query", self.dataset.as_str()]);

        Ok(url)
    }
}

#[async_trait]
impl ContentStore for SanityClient {
    async fn query(&self, expression: &str) -> Result<Value, StoreError> {
        let url = self.query_url()?;
        debug!("Sanity query: {}", expression);

        let mut request = self.http_client.get(url).query(&[("query", expression)]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(StoreError::from_response(response).await);
        }

        let body: QueryResponse = response.json().await?;
        Ok(body.result)
    }
}
