use serde::{Deserialize, Serialize};

use super::cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Photo,
    Video,
}

impl MediaType {
    // В схеме CMS initialValue = 'photo', поэтому всё, что не video, считаем фото
    fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()) {
            Some(kind) if kind == "video" => MediaType::Video,
            _ => MediaType::Photo,
        }
    }
}

/// Документ `gallery` в том виде, в каком его возвращает GROQ-запрос:
/// `image` уже развёрнут в URL ассета.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryDocument {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub caption: Option<String>,
    pub video_url: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub caption: Option<String>,
    pub url: Option<String>,
    pub thumbnail: Option<String>,
}

impl From<GalleryDocument> for GalleryItem {
    fn from(doc: GalleryDocument) -> Self {
        let media_type = MediaType::from_raw(doc.kind.as_deref());
        let url = match media_type {
            MediaType::Video => doc.video_url,
            MediaType::Photo => doc.image.clone(),
        };

        Self {
            media_type,
            caption: doc.caption,
            url,
            thumbnail: doc.image,
        }
    }
}

impl GalleryItem {
    /// Строка листа `Gallery`: Type | Caption | Url | Thumbnail.
    pub fn from_row(row: &[String]) -> Self {
        Self {
            media_type: MediaType::from_raw(row.first().map(String::as_str)),
            caption: cell(row, 1),
            url: cell(row, 2),
            thumbnail: cell(row, 3),
        }
    }
}
