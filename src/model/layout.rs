// File: ./src/model/layout.rs
//! Side-by-side column layout for concurrent events in a day view.
//!
//! Events are clustered by transitive overlap, then every member of a cluster
//! gets an equal-width column of its own. This never places two overlapping
//! events in the same column, but it does not try to minimize the number of
//! columns: a chain A-B-C where A and C are disjoint still takes three.
use crate::model::event::CalendarEvent;
use crate::model::interval;
use serde::{Deserialize, Serialize};

/// Horizontal gap kept on each side of an event box, in pixels.
pub const COLUMN_MARGIN: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOptimization {
    pub event_id: String,
    pub column: usize,
    pub width: f64,
    pub left: f64,
}

/// Groups timed events into overlap clusters, sorted by start.
///
/// An event joins the first cluster holding any member it overlaps, otherwise
/// it opens a new one. Events missing either date are ignored.
pub fn group_overlapping(events: &[CalendarEvent]) -> Vec<Vec<&CalendarEvent>> {
    let mut timed: Vec<&CalendarEvent> = events.iter().filter(|ev| ev.span().is_some()).collect();
    timed.sort_by_key(|ev| ev.start_date);

    let mut groups: Vec<Vec<&CalendarEvent>> = Vec::new();
    for ev in timed {
        let Some((start, end)) = ev.span() else {
            continue;
        };

        let target = groups.iter().position(|group| {
            group.iter().any(|member| {
                member
                    .span()
                    .is_some_and(|(s, e)| interval::overlaps(start, end, s, e))
            })
        });

        match target {
            Some(idx) => groups[idx].push(ev),
            None => groups.push(vec![ev]),
        }
    }
    groups
}

pub fn optimize_layout(events: &[CalendarEvent], container_width: f64) -> Vec<LayoutOptimization> {
    let mut layout = Vec::with_capacity(events.len());
    for group in group_overlapping(events) {
        let column_width = container_width / group.len() as f64;
        for (column, ev) in group.into_iter().enumerate() {
            layout.push(LayoutOptimization {
                event_id: ev.id.clone(),
                column,
                width: column_width - 2.0 * COLUMN_MARGIN,
                left: column as f64 * column_width + COLUMN_MARGIN,
            });
        }
    }
    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::event::parse_instant;

    fn ev(id: &str, start: &str, end: &str) -> CalendarEvent {
        CalendarEvent::new(id)
            .with_id(id)
            .with_span(parse_instant(start).unwrap(), parse_instant(end).unwrap())
    }

    #[test]
    fn chains_join_one_cluster() {
        let events = vec![
            ev("c", "2024-01-01T10:30", "2024-01-01T11:30"),
            ev("a", "2024-01-01T09:00", "2024-01-01T10:00"),
            ev("b", "2024-01-01T09:30", "2024-01-01T11:00"),
        ];
        let groups = group_overlapping(&events);
        assert_eq!(groups.len(), 1);
        let ids: Vec<_> = groups[0].iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn untimed_events_are_skipped() {
        let mut half = CalendarEvent::new("half").with_id("half");
        half.start_date = parse_instant("2024-01-01T09:00");
        let events = vec![half, CalendarEvent::new("none")];
        assert!(group_overlapping(&events).is_empty());
    }
}
