use serde::Serialize;
use serde_json::{Map, Value};

use crate::{api::NOTIFICATION_ICON, error::PresenterError};

const TITLE: &str = "title";
const BODY: &str = "body";

/// The data carried by a push message.
///
/// Neither field is checked on the way in. Whatever the sender left out stays
/// `None` all the way to the notification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PushPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl PushPayload {
    pub fn new<T: Into<String>, B: Into<String>>(title: T, body: B) -> Self {
        Self {
            title: Some(title.into()),
            body: Some(body.into()),
        }
    }

    /// Reads `title` and `body` out of any JSON document.
    ///
    /// Only malformed JSON and a bare `null` fail. Other non-object documents
    /// have neither field, and non-string values are rendered to text the way
    /// the browser would when handed them as a notification title or body.
    pub fn decode(data: &[u8]) -> Result<Self, PresenterError> {
        let value: Value = serde_json::from_slice(data).map_err(PresenterError::payload_decode)?;

        match value {
            Value::Null => Err(PresenterError::payload_decode(
                "payload is null, it has no fields to read",
            )),
            Value::Object(fields) => Ok(Self {
                title: text_field(&fields, TITLE),
                body: text_field(&fields, BODY),
            }),
            _ => Ok(Self::default()),
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Splits the payload into the title and the options to display it with
    pub fn into_notification(self) -> (Option<String>, NotificationOptions) {
        let options = NotificationOptions {
            body: self.body,
            icon: NOTIFICATION_ICON,
        };
        (self.title, options)
    }
}

fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).map(js_string)
}

// Mirrors JS `String(value)` for anything JSON can carry
fn js_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            // JS has no separate integer type, 5.0 prints as 5
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => {
                format!("{f:.0}")
            }
            _ => n.to_string(),
        },
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                item => js_string(item),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub icon: &'static str,
}
