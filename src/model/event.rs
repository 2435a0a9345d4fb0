// File: ./src/model/event.rs
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::de::{Deserializer, IgnoredAny};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

fn default_uid() -> String {
    Uuid::new_v4().to_string()
}

/// Zone-less layouts accepted for date fields. These are read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Truncates an instant to millisecond precision, the resolution every
/// event date is carried at.
pub fn canonical_instant(dt: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(dt.timestamp_millis()).unwrap_or(dt)
}

/// Parses the textual date forms a host record may carry.
///
/// RFC 3339 strings keep their offset. Zone-less date-times and bare dates are
/// read as UTC (bare dates at midnight). Returns `None` for anything else.
pub fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(canonical_instant(dt.with_timezone(&Utc)));
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(canonical_instant(naive.and_utc()));
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Formats an instant the way dates leave the engine: `2024-01-01T09:00:00.000Z`.
pub fn format_instant(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Any JSON shape a date field can arrive in.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    /// Epoch milliseconds.
    Millis(f64),
    Text(String),
    Unsupported(IgnoredAny),
}

impl DateInput {
    pub fn to_instant(&self) -> Option<DateTime<Utc>> {
        match self {
            DateInput::Millis(ms) if ms.is_finite() => {
                Utc.timestamp_millis_opt(*ms as i64).single()
            }
            DateInput::Millis(_) => None,
            DateInput::Text(s) => parse_instant(s),
            DateInput::Unsupported(_) => None,
        }
    }
}

/// Serde adapters for date fields.
pub mod instant {
    use super::*;
    use serde::Serializer;

    pub mod optional {
        use super::*;

        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            s: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(dt) => s.serialize_str(&format_instant(dt)),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            let raw = Option::<DateInput>::deserialize(d)?;
            Ok(raw.and_then(|r| r.to_instant()))
        }
    }

    pub mod required {
        use super::*;

        pub fn serialize<S: Serializer>(value: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
            s.serialize_str(&format_instant(value))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
            let raw = DateInput::deserialize(d)?;
            raw.to_instant()
                .ok_or_else(|| serde::de::Error::custom(format!("unrecognized date: {:?}", raw)))
        }
    }
}

// `null` in the input is treated like a missing field.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    #[serde(default = "default_uid")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(
        default,
        with = "instant::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "instant::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub color: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_event_id: Option<String>,
    /// Host fields the engine does not interpret. Carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CalendarEvent {
    pub fn new(title: &str) -> Self {
        Self {
            id: default_uid(),
            title: title.to_string(),
            start_date: None,
            end_date: None,
            color: String::new(),
            tags: Vec::new(),
            description: None,
            location: None,
            parent_event_id: None,
            extra: Map::new(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn with_span(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Both endpoints, when the event has them.
    pub fn span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        Some((self.start_date?, self.end_date?))
    }
}

/// Inclusive window of instants used by overlap and recurrence requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(with = "instant::required")]
    pub start: DateTime<Utc>,
    #[serde(with = "instant::required")]
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        *instant >= self.start && *instant <= self.end
    }
}
