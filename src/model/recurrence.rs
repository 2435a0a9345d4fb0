// File: ./src/model/recurrence.rs
use crate::model::event::{CalendarEvent, DateRange, instant};
use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// Step bound applied when the pattern carries no `count`.
pub const MAX_OCCURRENCES: u32 = 1000;

fn default_interval() -> NonZeroU32 {
    NonZeroU32::MIN
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrencePattern {
    pub frequency: Frequency,
    #[serde(default = "default_interval")]
    pub interval: NonZeroU32,
    #[serde(
        default,
        with = "instant::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    // Accepted on the wire but not used for stepping. Kept as raw values so
    // negative positions like `-1` (last day of month) still decode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_week_day: Option<Vec<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_month_day: Option<Vec<i32>>,
}

impl RecurrencePattern {
    pub fn new(frequency: Frequency, interval: u32) -> Self {
        Self {
            frequency,
            interval: NonZeroU32::new(interval).unwrap_or(NonZeroU32::MIN),
            end_date: None,
            count: None,
            by_week_day: None,
            by_month_day: None,
        }
    }

    /// Step budget: the requested count, or [`MAX_OCCURRENCES`] without one.
    pub fn step_limit(&self) -> u32 {
        self.count.unwrap_or(MAX_OCCURRENCES)
    }
}

pub struct RecurrenceEngine;

impl RecurrenceEngine {
    /// Materializes occurrences of `base` that start inside `range`.
    ///
    /// Steps before `range.start` still consume the count budget. Stepping stops
    /// once the next start passes `range.end` or the pattern's `end_date`, or
    /// when a start or end would leave chrono's representable range.
    /// Occurrence ids are `<base id>_<step index>`.
    pub fn generate(
        base: &CalendarEvent,
        pattern: &RecurrencePattern,
        range: &DateRange,
    ) -> Vec<CalendarEvent> {
        let Some((start, end)) = base.span() else {
            return Vec::new();
        };
        let duration = end - start;
        let limit = pattern.step_limit();

        let mut occurrences = Vec::new();
        let mut current = start;
        let mut count: u32 = 0;

        while current <= range.end && count < limit {
            if current >= range.start {
                let Some(occ) = Self::occurrence(base, count, current, duration) else {
                    log::debug!(
                        "Occurrence {} of {} ends past the representable range",
                        count,
                        base.id
                    );
                    break;
                };
                occurrences.push(occ);
            }

            let Some(next) = Self::nth_start(start, pattern, count + 1) else {
                log::debug!(
                    "Recurrence of {} left the representable range after {} steps",
                    base.id,
                    count + 1
                );
                break;
            };
            current = next;
            count += 1;

            if let Some(until) = pattern.end_date
                && current > until
            {
                break;
            }
        }

        occurrences
    }

    /// Start of step `n`, measured from the base start so month-end clamping
    /// does not accumulate (Jan 31 -> Feb 29 -> Mar 31).
    fn nth_start(
        anchor: DateTime<Utc>,
        pattern: &RecurrencePattern,
        n: u32,
    ) -> Option<DateTime<Utc>> {
        let steps = pattern.interval.get().checked_mul(n)?;
        match pattern.frequency {
            Frequency::Daily => anchor.checked_add_signed(Duration::try_days(steps as i64)?),
            Frequency::Weekly => {
                anchor.checked_add_signed(Duration::try_days(steps as i64 * 7)?)
            }
            Frequency::Monthly => anchor.checked_add_months(Months::new(steps)),
            Frequency::Yearly => anchor.checked_add_months(Months::new(steps.checked_mul(12)?)),
        }
    }

    fn occurrence(
        base: &CalendarEvent,
        index: u32,
        start: DateTime<Utc>,
        duration: Duration,
    ) -> Option<CalendarEvent> {
        let end = start.checked_add_signed(duration)?;
        let mut occ = base.clone();
        occ.id = format!("{}_{}", base.id, index);
        occ.start_date = Some(start);
        occ.end_date = Some(end);
        occ.parent_event_id = Some(base.id.clone());
        Some(occ)
    }
}
