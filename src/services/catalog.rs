//! Списки для публичных секций сайта: события, миксы, галерея.
//!
//! Порядок всегда тот, что отдало хранилище; здесь ничего не пересортировывается.

use serde::de::DeserializeOwned;

use crate::{
    config::ContentSource,
    error::StoreError,
    models::{Event, GalleryDocument, GalleryItem, Mix},
    sanity::{ContentStore, EVENTS_QUERY, GALLERY_QUERY, MIXES_QUERY},
    AppState,
};

pub const EVENTS_SHEET: &str = "Events";
pub const MIXES_SHEET: &str = "Mixes";
pub const GALLERY_SHEET: &str = "Gallery";

// Первая строка листа - заголовок
const EVENTS_RANGE: &str = "A2:E";
const MIXES_RANGE: &str = "A2:D";
const GALLERY_RANGE: &str = "A2:D";

pub async fn list_events(state: &AppState) -> Result<Vec<Event>, StoreError> {
    match state.config.app.content_source {
        ContentSource::Sanity => query_list(state.content.as_ref(), EVENTS_QUERY).await,
        ContentSource::Sheets => {
            let rows = state.sheets.read_range(EVENTS_SHEET, EVENTS_RANGE).await?;
            Ok(rows.iter().map(|row| Event::from_row(row)).collect())
        }
    }
}

pub async fn list_mixes(state: &AppState) -> Result<Vec<Mix>, StoreError> {
    match state.config.app.content_source {
        ContentSource::Sanity => query_list(state.content.as_ref(), MIXES_QUERY).await,
        ContentSource::Sheets => {
            let rows = state.sheets.read_range(MIXES_SHEET, MIXES_RANGE).await?;
            Ok(rows.iter().map(|row| Mix::from_row(row)).collect())
        }
    }
}

pub async fn list_gallery(state: &AppState) -> Result<Vec<GalleryItem>, StoreError> {
    match state.config.app.content_source {
        ContentSource::Sanity => {
            let docs: Vec<GalleryDocument> =
                query_list(state.content.as_ref(), GALLERY_QUERY).await?;
            Ok(docs.into_iter().map(GalleryItem::from).collect())
        }
        ContentSource::Sheets => {
            let rows = state.sheets.read_range(GALLERY_SHEET, GALLERY_RANGE).await?;
            Ok(rows.iter().map(|row| GalleryItem::from_row(row)).collect())
        }
    }
}

// null в result (пустой датасет у некоторых версий API) - это пустой список
async fn query_list<T: DeserializeOwned>(
    store: &dyn ContentStore,
    query: &str,
) -> Result<Vec<T>, StoreError> {
    let result = store.query(query).await?;
    if result.is_null() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_value(result)?)
}
