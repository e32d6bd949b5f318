use serde::{Deserialize, Serialize};

use super::cell;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mix {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub link: Option<String>,
    pub image_url: Option<String>,
}

impl Mix {
    /// Строка листа `Mixes`: Title | Genre | Link | ImageUrl.
    pub fn from_row(row: &[String]) -> Self {
        Self {
            title: cell(row, 0),
            genre: cell(row, 1),
            link: cell(row, 2),
            image_url: cell(row, 3),
        }
    }
}
