// File: ./src/model/mod.rs
pub mod dedup;
pub mod event;
pub mod interval;
pub mod layout;
pub mod matcher;
pub mod normalize;
pub mod overlap;
pub mod recurrence;

pub use dedup::dedup_events;
pub use event::{CalendarEvent, DateRange};
pub use layout::{LayoutOptimization, optimize_layout};
pub use matcher::{SearchField, SearchOptions, search_events};
pub use normalize::{DEFAULT_EVENT_COLOR, normalize_event};
pub use overlap::{OverlapEntry, OverlapResult, calculate_overlaps};
pub use recurrence::{Frequency, MAX_OCCURRENCES, RecurrenceEngine, RecurrencePattern};
