// File: ./src/protocol.rs
//! Wire types exchanged between a host and the engine.
//!
//! Requests carry a caller-chosen correlation `id`, a `type` string and a
//! type-specific `payload`. Every request yields exactly one [`Response`]
//! echoing the id; PROCESS_EVENTS may emit [`Progress`] messages before it,
//! and a crashed worker emits an uncorrelated [`Fault`].
use crate::batch::ProcessOptions;
use crate::model::{CalendarEvent, DateRange, RecurrencePattern, SearchOptions};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumIter, EnumString};

pub const PROGRESS_ID: &str = "progress";
pub const PROGRESS_TYPE: &str = "PROGRESS";
pub const FAULT_ID: &str = "global";
pub const FAULT_TYPE: &str = "ERROR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestType {
    ProcessEvents,
    CalculateOverlaps,
    GenerateRecurring,
    SearchEvents,
    OptimizeLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub id: String,
    /// Kept as a raw string so unknown types can be answered instead of rejected at decode time.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Value,
}

impl Request {
    pub fn new(id: impl Into<String>, kind: RequestType, payload: Value) -> Self {
        Self {
            id: id.into(),
            kind: kind.to_string(),
            payload,
        }
    }
}

// --- PAYLOADS ---

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessEventsPayload {
    pub events: Vec<CalendarEvent>,
    #[serde(default)]
    pub options: ProcessOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateOverlapsPayload {
    pub events: Vec<CalendarEvent>,
    pub date_range: DateRange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRecurringPayload {
    pub base_event: CalendarEvent,
    pub pattern: RecurrencePattern,
    pub date_range: DateRange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEventsPayload {
    pub events: Vec<CalendarEvent>,
    pub query: String,
    #[serde(default)]
    pub options: SearchOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeLayoutPayload {
    pub events: Vec<CalendarEvent>,
    pub container_width: f64,
}

// --- OUTBOUND ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    pub duration_ms: f64,
    /// Best effort; 0 when the platform offers no memory introspection.
    pub memory_used_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance: Option<Performance>,
}

impl Response {
    pub fn success(id: &str, kind: &str, result: Value, performance: Performance) -> Self {
        Self {
            id: id.to_string(),
            kind: kind.to_string(),
            result: Some(result),
            error: None,
            performance: Some(performance),
        }
    }

    pub fn failure(id: &str, kind: &str, error: String, performance: Performance) -> Self {
        Self {
            id: id.to_string(),
            kind: kind.to_string(),
            result: None,
            error: Some(error),
            performance: Some(performance),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub progress: f64,
}

impl Progress {
    pub fn new(progress: f64) -> Self {
        Self {
            id: PROGRESS_ID.to_string(),
            kind: PROGRESS_TYPE.to_string(),
            progress,
        }
    }
}

/// Failure of the worker itself, not tied to any request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fault {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub error: String,
}

impl Fault {
    pub fn new(error: String) -> Self {
        Self {
            id: FAULT_ID.to_string(),
            kind: FAULT_TYPE.to_string(),
            error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EngineEvent {
    Response(Response),
    Progress(Progress),
    Fault(Fault),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn request_type_names_match_wire() {
        let names: Vec<String> = RequestType::iter().map(|t| t.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "PROCESS_EVENTS",
                "CALCULATE_OVERLAPS",
                "GENERATE_RECURRING",
                "SEARCH_EVENTS",
                "OPTIMIZE_LAYOUT"
            ]
        );
        assert_eq!(
            RequestType::from_str("SEARCH_EVENTS").unwrap(),
            RequestType::SearchEvents
        );
        assert!(RequestType::from_str("DELETE_EVERYTHING").is_err());
    }

    #[test]
    fn response_omits_absent_fields() {
        let perf = Performance {
            duration_ms: 1.5,
            memory_used_bytes: 0,
        };
        let value = serde_json::to_value(Response::failure("7", "X", "boom".into(), perf)).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "7",
                "type": "X",
                "error": "boom",
                "performance": {"durationMs": 1.5, "memoryUsedBytes": 0}
            })
        );
    }

    #[test]
    fn progress_serializes_flat() {
        let value = serde_json::to_value(EngineEvent::Progress(Progress::new(50.0))).unwrap();
        assert_eq!(value, json!({"id": "progress", "type": "PROGRESS", "progress": 50.0}));
    }
}
