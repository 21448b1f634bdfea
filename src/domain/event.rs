//! Inbound webhook payloads sent by Vonage.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::response::ResponseError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Voice `completed` call status event.
///
/// Durations and prices are kept as the strings Vonage sends.
pub struct CallCompleted {
    pub uuid: String,
    pub conversation_uuid: String,
    pub status: String,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Network used for the call.
    #[serde(default)]
    pub network: Option<String>,
    /// Call length in seconds.
    #[serde(default)]
    pub duration: Option<String>,
    /// Cost per minute (EUR).
    #[serde(default)]
    pub rate: Option<String>,
    /// Total cost (EUR).
    #[serde(default)]
    pub price: Option<String>,
}

impl CallCompleted {
    pub fn from_json(json: &str) -> Result<Self, ResponseError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_completed_event() {
        let json = r#"
        {
          "uuid": "63f61863-4a51-4f6b-86e1-46edebcf9356",
          "conversation_uuid": "CON-f972836a-550f-45fa-956c-12a2ab5b7d22",
          "status": "completed",
          "direction": "outbound",
          "timestamp": "2020-01-01T12:00:00.000Z",
          "from": "447700900000",
          "to": "447700900001",
          "start_time": "2020-01-01T11:59:00.000Z",
          "end_time": "2020-01-01T12:00:00.000Z",
          "network": "65512",
          "duration": "60",
          "rate": "0.00450000",
          "price": "0.00450000"
        }
        "#;
        let event = CallCompleted::from_json(json).unwrap();
        assert_eq!(event.status, "completed");
        assert_eq!(event.duration.as_deref(), Some("60"));
        assert_eq!(event.price.as_deref(), Some("0.00450000"));
        assert_eq!((event.end_time - event.start_time).num_seconds(), 60);
    }

    #[test]
    fn rejects_event_without_times() {
        let json = r#"{ "uuid": "u", "conversation_uuid": "c", "status": "completed" }"#;
        let err = CallCompleted::from_json(json).unwrap_err();
        assert!(matches!(err, ResponseError::Json(_)));
    }
}
