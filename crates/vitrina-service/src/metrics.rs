//! Prometheus metrics for the response cache.

use crate::cache::CacheStatus;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::time::Duration;

/// Metric names for the cache layer.
pub mod names {
    /// Cache lookups by outcome (hit, miss, bypass).
    pub const CACHE_LOOKUPS_TOTAL: &str = "vitrina_cache_lookups_total";
    /// Remote cache calls answered by the in-process store instead.
    pub const CACHE_FALLBACK_TOTAL: &str = "vitrina_cache_fallback_total";
    /// Expired entries removed by the background sweep.
    pub const CACHE_SWEEP_EVICTED_TOTAL: &str = "vitrina_cache_sweep_evicted_total";
    /// Remote cache call duration in seconds.
    pub const CACHE_REMOTE_LATENCY_SECONDS: &str = "vitrina_cache_remote_latency_seconds";
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(
        names::CACHE_LOOKUPS_TOTAL,
        "Total number of cache lookups by outcome"
    );
    describe_counter!(
        names::CACHE_FALLBACK_TOTAL,
        "Total number of remote cache calls that fell back to the in-process store"
    );
    describe_counter!(
        names::CACHE_SWEEP_EVICTED_TOTAL,
        "Total number of expired entries evicted by the sweep"
    );
    describe_histogram!(
        names::CACHE_REMOTE_LATENCY_SECONDS,
        "Remote cache call duration in seconds"
    );
}

/// Cache metrics recorder.
#[derive(Clone)]
pub struct CacheMetrics;

impl CacheMetrics {
    /// Record a lookup outcome.
    pub fn lookup(status: CacheStatus) {
        counter!(names::CACHE_LOOKUPS_TOTAL, "outcome" => status.as_label()).increment(1);
    }

    /// Record a fallback to the in-process store.
    pub fn fallback(op: &'static str) {
        counter!(names::CACHE_FALLBACK_TOTAL, "op" => op).increment(1);
    }

    /// Record entries evicted by a sweep.
    pub fn swept(evicted: usize) {
        counter!(names::CACHE_SWEEP_EVICTED_TOTAL).increment(evicted as u64);
    }

    /// Record the duration of a remote call.
    pub fn remote_latency(op: &'static str, duration: Duration) {
        histogram!(names::CACHE_REMOTE_LATENCY_SECONDS, "op" => op).record(duration.as_secs_f64());
    }
}
