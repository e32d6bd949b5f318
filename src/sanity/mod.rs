//! Sanity как content-store: GROQ-запросы к HTTP API.

pub mod client;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

pub use client::SanityClient;

// Сортировка идёт до проекции: в проекции нет `_createdAt`
pub const EVENTS_QUERY: &str =
    r#"*[_type == "event"] | order(date asc){date, title, location, ticketLink, status}"#;
pub const MIXES_QUERY: &str =
    r#"*[_type == "mix"] | order(_createdAt desc){title, genre, link, "imageUrl": image.asset->url}"#;
pub const GALLERY_QUERY: &str = r#"*[_type == "gallery"] | order(_createdAt desc){type, caption, videoUrl, "image": image.asset->url}"#;
pub const EVENT_COUNT_QUERY: &str = r#"count(*[_type == "event"])"#;

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Выполняет GROQ-выражение и возвращает поле `result` ответа.
    async fn query(&self, expression: &str) -> Result<Value, StoreError>;
}
