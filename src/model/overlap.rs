// File: ./src/model/overlap.rs
use crate::model::event::{CalendarEvent, DateRange};
use crate::model::interval;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapEntry {
    pub event_id: String,
    pub overlap_duration: i64,
    pub overlap_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapResult {
    pub event_id: String,
    pub overlaps: Vec<OverlapEntry>,
}

/// Lists, for each event starting inside `range`, the later events it overlaps.
///
/// Only the start date is checked against the window: an event that starts
/// before `range.start` is left out even if it runs into the window. Events are
/// compared in input order, each against the ones after it, and percentages are
/// relative to the earlier event of the pair.
pub fn calculate_overlaps(events: &[CalendarEvent], range: &DateRange) -> Vec<OverlapResult> {
    let windowed: Vec<&CalendarEvent> = events
        .iter()
        .filter(|ev| ev.start_date.is_some_and(|s| range.contains(&s)))
        .collect();

    let mut results = Vec::new();
    for (i, a) in windowed.iter().enumerate() {
        let Some((start_a, end_a)) = a.span() else {
            continue;
        };

        let overlaps: Vec<OverlapEntry> = windowed[i + 1..]
            .iter()
            .filter_map(|b| {
                let (start_b, end_b) = b.span()?;
                let o = interval::overlap(start_a, end_a, start_b, end_b);
                (o.duration_ms > 0).then(|| OverlapEntry {
                    event_id: b.id.clone(),
                    overlap_duration: o.duration_ms,
                    overlap_percentage: o.percentage_of_a,
                })
            })
            .collect();

        if !overlaps.is_empty() {
            results.push(OverlapResult {
                event_id: a.id.clone(),
                overlaps,
            });
        }
    }
    results
}
