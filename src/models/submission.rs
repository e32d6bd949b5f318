use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Тело POST /api/submit. Все поля - непрозрачные строки, сервер их не проверяет;
/// отсутствующее поле уходит в таблицу пустой строкой. `serialNo` от клиента игнорируется.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmissionRequest {
    #[serde(deserialize_with = "opaque_string")]
    pub timestamp: String,
    #[serde(rename = "type", deserialize_with = "opaque_string")]
    pub kind: String,
    #[serde(deserialize_with = "opaque_string")]
    pub name: String,
    #[serde(deserialize_with = "opaque_string")]
    pub phone: String,
    #[serde(deserialize_with = "opaque_string")]
    pub email: String,
    #[serde(deserialize_with = "opaque_string")]
    pub event_date: String,
    #[serde(deserialize_with = "opaque_string")]
    pub message: String,
}

// null -> "", число или bool -> их текстовое представление
fn opaque_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Заявка с вычисленным серийным номером, ровно одна строка в листе.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub serial_no: u64,
    #[serde(flatten)]
    pub request: SubmissionRequest,
}

impl SubmissionRecord {
    pub fn new(serial_no: u64, request: SubmissionRequest) -> Self {
        Self { serial_no, request }
    }

    /// Serial No | Timestamp | Type | Name | Phone | Email | Event Date | Message
    pub fn into_row(self) -> Vec<Value> {
        let SubmissionRequest {
            timestamp,
            kind,
            name,
            phone,
            email,
            event_date,
            message,
        } = self.request;

        vec![
            Value::from(self.serial_no),
            Value::from(timestamp),
            Value::from(kind),
            Value::from(name),
            Value::from(phone),
            Value::from(email),
            Value::from(event_date),
            Value::from(message),
        ]
    }
}
