// File: ./src/metrics.rs
// Process-wide request counters. The only state that outlives a request.
use once_cell::sync::Lazy;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

static METRICS: Lazy<EngineMetrics> = Lazy::new(EngineMetrics::default);

pub fn global() -> &'static EngineMetrics {
    &METRICS
}

#[derive(Debug, Default)]
pub struct EngineMetrics {
    requests: AtomicU64,
    failures: AtomicU64,
    unknown_types: AtomicU64,
    panics: AtomicU64,
    busy_micros: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub requests: u64,
    pub failures: u64,
    pub unknown_types: u64,
    pub panics: u64,
    pub busy_micros: u64,
}

impl EngineMetrics {
    pub fn record_request(&self, elapsed: Duration, failed: bool) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        if failed {
            self.failures.fetch_add(1, Ordering::Relaxed);
        }
        let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        self.busy_micros.fetch_add(micros, Ordering::Relaxed);
    }

    pub fn record_unknown_type(&self) {
        self.unknown_types.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_panic(&self) {
        self.panics.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            unknown_types: self.unknown_types.load(Ordering::Relaxed),
            panics: self.panics.load(Ordering::Relaxed),
            busy_micros: self.busy_micros.load(Ordering::Relaxed),
        }
    }
}

/// Resident set size of this process in bytes, or 0 when unknown.
#[cfg(target_os = "linux")]
pub fn resident_memory_bytes() -> u64 {
    // statm reports pages; 4 KiB pages assumed.
    const PAGE_SIZE: u64 = 4096;
    std::fs::read_to_string("/proc/self/statm")
        .ok()
        .and_then(|s| s.split_whitespace().nth(1)?.parse::<u64>().ok())
        .map(|pages| pages * PAGE_SIZE)
        .unwrap_or(0)
}

#[cfg(not(target_os = "linux"))]
pub fn resident_memory_bytes() -> u64 {
    0
}
