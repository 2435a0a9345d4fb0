// File: tests/overlap_windowing.rs
use calengine::model::event::parse_instant;
use calengine::model::{CalendarEvent, DateRange, calculate_overlaps};

fn event(id: &str, start: &str, end: &str) -> CalendarEvent {
    CalendarEvent::new(id)
        .with_id(id)
        .with_span(parse_instant(start).unwrap(), parse_instant(end).unwrap())
}

fn january() -> DateRange {
    DateRange::new(
        parse_instant("2024-01-01").unwrap(),
        parse_instant("2024-01-31T23:59:59").unwrap(),
    )
}

#[test]
fn test_basic_pair() {
    let events = vec![
        event("a", "2024-01-10T09:00", "2024-01-10T10:00"),
        event("b", "2024-01-10T09:30", "2024-01-10T11:00"),
    ];
    let results = calculate_overlaps(&events, &january());

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].event_id, "a");
    assert_eq!(results[0].overlaps.len(), 1);
    let entry = &results[0].overlaps[0];
    assert_eq!(entry.event_id, "b");
    assert_eq!(entry.overlap_duration, 30 * 60 * 1000);
    assert!((entry.overlap_percentage - 50.0).abs() < 1e-9);
}

#[test]
fn test_event_outside_window_is_never_a_key() {
    // Starts in December but runs into January, overlapping "inside".
    let events = vec![
        event("outside", "2023-12-31T23:00", "2024-01-01T02:00"),
        event("inside", "2024-01-01T01:00", "2024-01-01T03:00"),
    ];
    let results = calculate_overlaps(&events, &january());
    assert!(results.iter().all(|r| r.event_id != "outside"));
    assert!(
        results
            .iter()
            .flat_map(|r| r.overlaps.iter())
            .all(|o| o.event_id != "outside")
    );
}

#[test]
fn test_touching_and_disjoint_are_not_reported() {
    let events = vec![
        event("a", "2024-01-10T09:00", "2024-01-10T10:00"),
        event("b", "2024-01-10T10:00", "2024-01-10T11:00"),
        event("c", "2024-01-10T12:00", "2024-01-10T13:00"),
    ];
    assert!(calculate_overlaps(&events, &january()).is_empty());
}

#[test]
fn test_zero_length_event_has_no_nan() {
    let events = vec![
        event("point", "2024-01-10T09:30", "2024-01-10T09:30"),
        event("block", "2024-01-10T09:00", "2024-01-10T10:00"),
    ];
    let results = calculate_overlaps(&events, &january());
    for entry in results.iter().flat_map(|r| r.overlaps.iter()) {
        assert!(entry.overlap_percentage.is_finite());
    }
}

#[test]
fn test_events_without_end_are_skipped() {
    let mut open = CalendarEvent::new("open").with_id("open");
    open.start_date = parse_instant("2024-01-10T09:00");
    let events = vec![open, event("b", "2024-01-10T09:00", "2024-01-10T10:00")];
    assert!(calculate_overlaps(&events, &january()).is_empty());
}

#[test]
fn test_only_later_events_are_listed() {
    let events = vec![
        event("a", "2024-01-10T09:00", "2024-01-10T12:00"),
        event("b", "2024-01-10T10:00", "2024-01-10T11:00"),
        event("c", "2024-01-10T10:30", "2024-01-10T13:00"),
    ];
    let results = calculate_overlaps(&events, &january());

    let a = results.iter().find(|r| r.event_id == "a").unwrap();
    let ids: Vec<_> = a.overlaps.iter().map(|o| o.event_id.as_str()).collect();
    assert_eq!(ids, vec!["b", "c"]);

    let b = results.iter().find(|r| r.event_id == "b").unwrap();
    assert_eq!(b.overlaps.len(), 1);
    assert_eq!(b.overlaps[0].event_id, "c");
    // 30 of b's 60 minutes.
    assert!((b.overlaps[0].overlap_percentage - 50.0).abs() < 1e-9);

    assert!(results.iter().all(|r| r.event_id != "c"));
}
