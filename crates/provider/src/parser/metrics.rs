use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters for one or more file reads.
///
/// All operations use `Ordering::Relaxed`: the pipeline is sequential per
/// file and these are observability counters, so eventual consistency is
/// sufficient. The two skip tiers are counted separately and are never
/// folded together.
#[derive(Debug, Default)]
pub struct DecodeMetrics {
    /// Lines read from the source, accepted or not.
    lines: AtomicU64,
    /// Lines that produced a canonical message.
    accepted: AtomicU64,
    /// Tier-1 skips: payload was not a JSON object of the expected shape.
    skipped_malformed: AtomicU64,
    /// Tier-1 skips: valid payload that failed the channel gate.
    skipped_gated: AtomicU64,
    /// Tier-2 skips: well-formed gated records whose severity token the
    /// decoder does not know.
    skipped_undecodable: AtomicU64,
}

impl DecodeMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_line(&self) {
        self.lines.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_accepted(&self) {
        self.accepted.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_malformed(&self) {
        self.skipped_malformed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_gated(&self) {
        self.skipped_gated.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_undecodable(&self) {
        self.skipped_undecodable.fetch_add(1, Ordering::Relaxed);
    }

    /// Create a snapshot of the current counters.
    ///
    /// Individual reads are atomic but the snapshot as a whole is not
    /// transactional; slight tearing between counters is acceptable for
    /// observability data.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            lines: self.lines.load(Ordering::Relaxed),
            accepted: self.accepted.load(Ordering::Relaxed),
            skipped_malformed: self.skipped_malformed.load(Ordering::Relaxed),
            skipped_gated: self.skipped_gated.load(Ordering::Relaxed),
            skipped_undecodable: self.skipped_undecodable.load(Ordering::Relaxed),
        }
    }
}

/// A read-only snapshot of [`DecodeMetrics`], serializable for logging or
/// health endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub lines: u64,
    pub accepted: u64,
    pub skipped_malformed: u64,
    pub skipped_gated: u64,
    pub skipped_undecodable: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_metrics_are_empty() {
        let snap = DecodeMetrics::new().snapshot();
        assert_eq!(snap.lines, 0);
        assert_eq!(snap.accepted, 0);
        assert_eq!(snap.skipped_malformed, 0);
        assert_eq!(snap.skipped_gated, 0);
        assert_eq!(snap.skipped_undecodable, 0);
    }

    #[test]
    fn tiers_are_counted_separately() {
        let metrics = DecodeMetrics::new();
        for _ in 0..4 {
            metrics.record_line();
        }
        metrics.record_accepted();
        metrics.record_malformed();
        metrics.record_gated();
        metrics.record_undecodable();

        let snap = metrics.snapshot();
        assert_eq!(snap.lines, 4);
        assert_eq!(snap.accepted, 1);
        assert_eq!(snap.skipped_malformed, 1);
        assert_eq!(snap.skipped_gated, 1);
        assert_eq!(snap.skipped_undecodable, 1);
    }

    #[test]
    fn snapshot_serializes() {
        let metrics = DecodeMetrics::new();
        metrics.record_line();
        metrics.record_accepted();
        let json = serde_json::to_string(&metrics.snapshot()).unwrap();
        assert!(json.contains("\"lines\":1"));
        assert!(json.contains("\"accepted\":1"));
    }
}
