// File: tests/layout_tests.rs
use calengine::model::event::parse_instant;
use calengine::model::{CalendarEvent, optimize_layout};
use std::collections::HashSet;

fn event(id: &str, start: &str, end: &str) -> CalendarEvent {
    CalendarEvent::new(id)
        .with_id(id)
        .with_span(parse_instant(start).unwrap(), parse_instant(end).unwrap())
}

#[test]
fn test_concurrent_events_get_distinct_columns() {
    let events = vec![
        event("a", "2024-01-01T09:00", "2024-01-01T11:00"),
        event("b", "2024-01-01T09:30", "2024-01-01T10:30"),
        event("c", "2024-01-01T10:00", "2024-01-01T10:45"),
        event("d", "2024-01-01T10:15", "2024-01-01T12:00"),
    ];
    let layout = optimize_layout(&events, 400.0);

    assert_eq!(layout.len(), 4);
    let columns: HashSet<usize> = layout.iter().map(|l| l.column).collect();
    assert_eq!(columns, (0..4).collect());
}

#[test]
fn test_width_and_offsets() {
    let events = vec![
        event("a", "2024-01-01T09:00", "2024-01-01T10:00"),
        event("b", "2024-01-01T09:15", "2024-01-01T10:00"),
        event("c", "2024-01-01T09:30", "2024-01-01T10:00"),
    ];
    let layout = optimize_layout(&events, 300.0);

    let lefts: Vec<f64> = layout.iter().map(|l| l.left).collect();
    assert_eq!(lefts, vec![2.0, 102.0, 202.0]);
    assert!(layout.iter().all(|l| (l.width - 96.0).abs() < 1e-9));
}

#[test]
fn test_separate_clusters_use_full_width() {
    let events = vec![
        event("morning", "2024-01-01T09:00", "2024-01-01T10:00"),
        event("afternoon", "2024-01-01T14:00", "2024-01-01T15:00"),
    ];
    let layout = optimize_layout(&events, 200.0);

    assert_eq!(layout.len(), 2);
    for entry in &layout {
        assert_eq!(entry.column, 0);
        assert!((entry.width - 196.0).abs() < 1e-9);
        assert!((entry.left - 2.0).abs() < 1e-9);
    }
}

#[test]
fn test_chain_overallocates_columns() {
    // a-b and b-c overlap, a and c do not: still three columns.
    let events = vec![
        event("a", "2024-01-01T09:00", "2024-01-01T10:00"),
        event("b", "2024-01-01T09:30", "2024-01-01T10:30"),
        event("c", "2024-01-01T10:15", "2024-01-01T11:00"),
    ];
    let layout = optimize_layout(&events, 300.0);
    let c = layout.iter().find(|l| l.event_id == "c").unwrap();
    assert_eq!(c.column, 2);
}

#[test]
fn test_untimed_events_have_no_entry() {
    let events = vec![
        CalendarEvent::new("todo").with_id("todo"),
        event("a", "2024-01-01T09:00", "2024-01-01T10:00"),
    ];
    let layout = optimize_layout(&events, 100.0);
    assert_eq!(layout.len(), 1);
    assert_eq!(layout[0].event_id, "a");
}
