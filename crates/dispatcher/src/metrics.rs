//! Dispatch metrics for observability

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for a fan-out coordinator
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    /// Total dispatches issued
    dispatch_count: AtomicU64,
    /// Total per-platform successes
    success_count: AtomicU64,
    /// Total per-platform failures (all kinds)
    failure_count: AtomicU64,
    /// Failures attributed to timeouts (subset of failure_count)
    timeout_count: AtomicU64,
}

impl DispatchMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total dispatch count
    pub fn dispatch_count(&self) -> u64 {
        self.dispatch_count.load(Ordering::Relaxed)
    }

    /// Increment dispatch count
    pub fn inc_dispatch_count(&self) {
        self.dispatch_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get success count
    pub fn success_count(&self) -> u64 {
        self.success_count.load(Ordering::Relaxed)
    }

    /// Increment success count
    pub fn inc_success_count(&self) {
        self.success_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get failure count
    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    /// Increment failure count
    pub fn inc_failure_count(&self) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get timeout count
    pub fn timeout_count(&self) -> u64 {
        self.timeout_count.load(Ordering::Relaxed)
    }

    /// Increment timeout count
    pub fn inc_timeout_count(&self) {
        self.timeout_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            dispatch_count: self.dispatch_count(),
            success_count: self.success_count(),
            failure_count: self.failure_count(),
            timeout_count: self.timeout_count(),
        }
    }
}

/// Snapshot of dispatch metrics (for reporting)
#[derive(Debug, Clone, Copy)]
pub struct MetricsSnapshot {
    pub dispatch_count: u64,
    pub success_count: u64,
    pub failure_count: u64,
    pub timeout_count: u64,
}
