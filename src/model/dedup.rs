// File: ./src/model/dedup.rs
use crate::model::event::CalendarEvent;
use std::collections::HashSet;

/// Identity used to spot duplicates: title (case-sensitive) plus both
/// instants in epoch milliseconds. The event id is ignored.
pub type DedupKey = (String, Option<i64>, Option<i64>);

pub fn dedup_key(event: &CalendarEvent) -> DedupKey {
    (
        event.title.clone(),
        event.start_date.map(|d| d.timestamp_millis()),
        event.end_date.map(|d| d.timestamp_millis()),
    )
}

/// Drops later duplicates. The first occurrence wins and survivor order is kept.
pub fn dedup_events(mut events: Vec<CalendarEvent>) -> Vec<CalendarEvent> {
    let mut seen: HashSet<DedupKey> = HashSet::with_capacity(events.len());
    events.retain(|ev| seen.insert(dedup_key(ev)));
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::event::parse_instant;

    fn ev(id: &str, title: &str, start: &str, end: &str) -> CalendarEvent {
        CalendarEvent::new(title)
            .with_id(id)
            .with_span(parse_instant(start).unwrap(), parse_instant(end).unwrap())
    }

    #[test]
    fn first_occurrence_wins() {
        let events = vec![
            ev("1", "A", "2024-01-01T09:00", "2024-01-01T10:00"),
            ev("2", "B", "2024-01-01T09:00", "2024-01-01T10:00"),
            ev("3", "A", "2024-01-01T09:00", "2024-01-01T10:00"),
            ev("4", "B", "2024-01-01T09:00", "2024-01-01T10:00"),
        ];
        let ids: Vec<_> = dedup_events(events).into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn missing_dates_share_a_key() {
        let events = vec![CalendarEvent::new("x"), CalendarEvent::new("x")];
        assert_eq!(dedup_events(events).len(), 1);
    }
}
