//! JSON envelope for API payloads
//!
//! `{"success": true, "data": ..., "timestamp": ...}` on success and
//! `{"success": false, "error": ..., "timestamp": ...}` on failure.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: String,
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn success<T: Serialize>(data: T) -> Envelope<T> {
    Envelope {
        success: true,
        data: Some(data),
        error: None,
        timestamp: now(),
    }
}

pub fn failure(message: impl Into<String>) -> Envelope<()> {
    Envelope {
        success: false,
        data: None,
        error: Some(message.into()),
        timestamp: now(),
    }
}
