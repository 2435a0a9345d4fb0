// File: ./src/batch.rs
// Chunked normalization and deduplication of large event collections.
use crate::config::EngineConfig;
use crate::model::{CalendarEvent, dedup_events, normalize_event};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CHUNK_SIZE: usize = 1000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessOptions {
    #[serde(default, alias = "reportProgress")]
    pub enable_progress: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_size: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessOutcome {
    pub events: Vec<CalendarEvent>,
    /// Number of input records, malformed ones included.
    pub total_processed: usize,
    pub unique_count: usize,
    /// `total_processed - unique_count`: dropped malformed records count here too.
    pub duplicates_removed: usize,
}

#[derive(Debug, Clone)]
pub struct BatchProcessor {
    chunk_size: usize,
    default_color: String,
}

impl Default for BatchProcessor {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl BatchProcessor {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            chunk_size: config.chunk_size.max(1),
            default_color: config.default_color.clone(),
        }
    }

    /// Runs filter, normalize and sort chunk by chunk, then deduplicates the
    /// whole processed set so duplicates across chunk boundaries are caught.
    ///
    /// The sort is per chunk; the concatenated output is only globally ordered
    /// when everything fits in one chunk. `on_progress` receives a percentage
    /// after each chunk when `options.enable_progress` is set.
    pub fn process<F>(
        &self,
        events: Vec<CalendarEvent>,
        options: &ProcessOptions,
        mut on_progress: F,
    ) -> ProcessOutcome
    where
        F: FnMut(f64),
    {
        let total = events.len();
        let chunk_size = options.chunk_size.unwrap_or(self.chunk_size).max(1);
        let mut processed: Vec<CalendarEvent> = Vec::with_capacity(total);
        let mut done = 0usize;

        for chunk in events.chunks(chunk_size) {
            let mut normalized: Vec<CalendarEvent> = chunk
                .iter()
                .filter(|ev| ev.start_date.is_some() && !ev.title.trim().is_empty())
                .map(|ev| normalize_event(ev, &self.default_color))
                .collect();
            normalized.sort_by_key(|ev| ev.start_date);
            processed.extend(normalized);

            done += chunk.len();
            if options.enable_progress {
                let progress = (done as f64 / total as f64 * 100.0).min(100.0);
                on_progress(progress);
            }
        }

        let kept = processed.len();
        let events = dedup_events(processed);
        let unique_count = events.len();
        log::debug!(
            "Batch: {} in, {} well-formed, {} unique (chunk size {})",
            total,
            kept,
            unique_count,
            chunk_size
        );

        ProcessOutcome {
            events,
            total_processed: total,
            unique_count,
            duplicates_removed: total - unique_count,
        }
    }
}
