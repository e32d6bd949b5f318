use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use super::cell;

/// Статус события, как его задаёт редактор в CMS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Coming,
    Available,
    Filling,
    Soldout,
    Concluded,
}

impl FromStr for EventStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coming" => Ok(EventStatus::Coming),
            "available" => Ok(EventStatus::Available),
            "filling" => Ok(EventStatus::Filling),
            "soldout" => Ok(EventStatus::Soldout),
            "concluded" => Ok(EventStatus::Concluded),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub date: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub ticket_link: Option<String>,
    // Неизвестный статус не должен ронять весь список
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<EventStatus>,
}

impl Event {
    /// Строка листа `Events`: Date | Title | Location | TicketLink | Status.
    pub fn from_row(row: &[String]) -> Self {
        Self {
            date: cell(row, 0),
            title: cell(row, 1),
            location: cell(row, 2),
            ticket_link: cell(row, 3),
            status: cell(row, 4).and_then(|s| s.parse().ok()),
        }
    }
}

fn lenient_status<'de, D>(deserializer: D) -> Result<Option<EventStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}
