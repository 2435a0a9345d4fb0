// File: ./src/model/normalize.rs
// Canonicalizes host records before any other processing.
use crate::model::event::{CalendarEvent, canonical_instant};

pub const DEFAULT_EVENT_COLOR: &str = "#3b82f6";

/// Returns a cleaned copy of `event`; the input is left untouched.
///
/// Trims the title, falls back to `default_color` for a blank color, and
/// re-canonicalizes both dates. Applying it twice yields the same event.
pub fn normalize_event(event: &CalendarEvent, default_color: &str) -> CalendarEvent {
    let mut normalized = event.clone();
    normalized.title = event.title.trim().to_string();

    if event.color.trim().is_empty() {
        normalized.color = default_color.to_string();
    }

    normalized.start_date = event.start_date.map(canonical_instant);
    normalized.end_date = event.end_date.map(canonical_instant);
    normalized
}

impl CalendarEvent {
    pub fn normalized(&self) -> CalendarEvent {
        normalize_event(self, DEFAULT_EVENT_COLOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::event::parse_instant;

    #[test]
    fn trims_and_defaults() {
        let mut raw = CalendarEvent::new("  Review  ");
        raw.start_date = parse_instant("2024-01-01T09:00");
        let ev = raw.normalized();

        assert_eq!(ev.title, "Review");
        assert_eq!(ev.color, DEFAULT_EVENT_COLOR);
        assert!(ev.tags.is_empty());
        assert_eq!(raw.title, "  Review  ");
    }

    #[test]
    fn keeps_explicit_color() {
        let mut raw = CalendarEvent::new("x");
        raw.color = "#ff0000".to_string();
        assert_eq!(raw.normalized().color, "#ff0000");
    }

    #[test]
    fn is_idempotent() {
        let mut raw = CalendarEvent::new(" Planning ");
        raw.start_date = parse_instant("2024-01-01T09:00:00.987654Z");
        raw.end_date = parse_instant("2024-01-01T10:00");
        let once = raw.normalized();
        assert_eq!(once.normalized(), once);
    }
}
