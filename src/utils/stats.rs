//! Query statistics collector
//!
//! Lightweight atomic counters surfaced through `GET /stats` and logged on
//! shutdown. No events are persisted and nothing about the query text is
//! recorded.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Thread-safe counters for the query UI
#[derive(Debug, Default)]
pub struct StatsCollector {
    /// Queries answered (including fallback answers)
    queries_served: AtomicU64,
    /// Queries answered from placeholder data after a retrieval failure
    fallbacks_served: AtomicU64,
    /// Health probes executed against the remote server
    health_checks: AtomicU64,
    /// Cumulative query handling latency
    total_latency_ms: AtomicU64,
}

/// Point-in-time view of the counters
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub queries_served: u64,
    pub fallbacks_served: u64,
    pub health_checks: u64,
    pub avg_latency_ms: f64,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a handled query and whether it was served from fallback data
    pub fn record_query(&self, latency_ms: u64, fell_back: bool) {
        self.queries_served.fetch_add(1, Ordering::Relaxed);
        self.total_latency_ms.fetch_add(latency_ms, Ordering::Relaxed);
        if fell_back {
            self.fallbacks_served.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a health probe against the remote server
    pub fn record_health_check(&self) {
        self.health_checks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let queries = self.queries_served.load(Ordering::Relaxed);
        let total_latency = self.total_latency_ms.load(Ordering::Relaxed);
        let avg_latency_ms = if queries > 0 {
            total_latency as f64 / queries as f64
        } else {
            0.0
        };

        StatsSnapshot {
            queries_served: queries,
            fallbacks_served: self.fallbacks_served.load(Ordering::Relaxed),
            health_checks: self.health_checks.load(Ordering::Relaxed),
            avg_latency_ms,
        }
    }
}
