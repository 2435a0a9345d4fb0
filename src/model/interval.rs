// File: ./src/model/interval.rs
//! Overlap geometry for pairs of time intervals.
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    pub duration_ms: i64,
    /// Share of interval A covered by B, 0..=100.
    pub percentage_of_a: f64,
}

impl Overlap {
    pub const NONE: Overlap = Overlap {
        duration_ms: 0,
        percentage_of_a: 0.0,
    };
}

/// Computes how much of `[start_a, end_a]` is shared with `[start_b, end_b]`.
///
/// Total: disjoint, touching, inverted and zero-length intervals all yield a
/// zero percentage instead of a division by zero.
pub fn overlap(
    start_a: DateTime<Utc>,
    end_a: DateTime<Utc>,
    start_b: DateTime<Utc>,
    end_b: DateTime<Utc>,
) -> Overlap {
    let shared_start = start_a.max(start_b);
    let shared_end = end_a.min(end_b);
    let duration_ms = (shared_end - shared_start).num_milliseconds().max(0);

    let span_a = (end_a - start_a).num_milliseconds();
    if duration_ms == 0 || span_a <= 0 {
        return Overlap {
            duration_ms,
            percentage_of_a: 0.0,
        };
    }

    Overlap {
        duration_ms,
        percentage_of_a: duration_ms as f64 / span_a as f64 * 100.0,
    }
}

/// Half-open overlap test: intervals that only touch do not overlap.
pub fn overlaps(
    start_a: DateTime<Utc>,
    end_a: DateTime<Utc>,
    start_b: DateTime<Utc>,
    end_b: DateTime<Utc>,
) -> bool {
    start_a < end_b && start_b < end_a
}
