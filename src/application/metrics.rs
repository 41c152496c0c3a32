//! Delivery metrics for the deprecation registry.
//!
//! Tracks per-epoch delivery outcomes for monitoring and debugging. These
//! counters are observability only; test assertions use the per-link
//! occurrence counters of the registry's query API instead.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics tracking delivery outcomes.
///
/// All counters use atomic operations for thread-safe updates and reads.
/// Cloning is cheap and shares the underlying counters.
#[derive(Debug, Clone, Default)]
pub struct DeliveryMetrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug, Default)]
struct MetricsInner {
    /// Notices delivered to at least one backend
    delivered: AtomicU64,
    /// Notices dropped because the link was already seen this epoch
    deduplicated: AtomicU64,
    /// Notices dropped by a package ignore, link silence or active scope
    suppressed: AtomicU64,
}

impl DeliveryMetrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_delivered(&self) {
        self.inner.delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_deduplicated(&self) {
        self.inner.deduplicated.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_suppressed(&self) {
        self.inner.suppressed.fetch_add(1, Ordering::Relaxed);
    }

    /// Total notices delivered to at least one backend.
    pub fn delivered(&self) -> u64 {
        self.inner.delivered.load(Ordering::Relaxed)
    }

    /// Total notices dropped by deduplication.
    pub fn deduplicated(&self) -> u64 {
        self.inner.deduplicated.load(Ordering::Relaxed)
    }

    /// Total notices dropped by ignores or suppression scopes.
    pub fn suppressed(&self) -> u64 {
        self.inner.suppressed.load(Ordering::Relaxed)
    }

    /// Get a point-in-time snapshot of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            delivered: self.delivered(),
            deduplicated: self.deduplicated(),
            suppressed: self.suppressed(),
        }
    }

    /// Reset all counters to zero for a new tracking epoch.
    pub fn reset(&self) {
        self.inner.delivered.store(0, Ordering::Relaxed);
        self.inner.deduplicated.store(0, Ordering::Relaxed);
        self.inner.suppressed.store(0, Ordering::Relaxed);
    }
}

/// A point-in-time snapshot of delivery metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Notices delivered to at least one backend
    pub delivered: u64,
    /// Notices dropped by deduplication
    pub deduplicated: u64,
    /// Notices dropped by ignores or suppression scopes
    pub suppressed: u64,
}

impl MetricsSnapshot {
    /// Total trigger calls that reached a delivery decision.
    pub fn total(&self) -> u64 {
        self.delivered
            .saturating_add(self.deduplicated)
            .saturating_add(self.suppressed)
    }
}
