//! Metrics collection for batch tokenization.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Metrics collected across batch runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchMetrics {
    /// Number of batch runs.
    pub total_batches: u64,

    /// Documents tokenized successfully.
    pub documents_processed: u64,

    /// Documents whose tokenization failed.
    pub documents_failed: u64,

    /// Chunks executed by workers.
    pub chunks_processed: u64,

    /// Chunks skipped after cancellation or abort.
    pub chunks_skipped: u64,

    /// Wall-clock time spent in batch runs.
    pub total_execution_time: Duration,
}

impl BatchMetrics {
    /// Documents per second over all runs.
    pub fn throughput(&self) -> f64 {
        let secs = self.total_execution_time.as_secs_f64();
        if secs > 0.0 {
            (self.documents_processed + self.documents_failed) as f64 / secs
        } else {
            0.0
        }
    }
}

/// Thread-safe collector for [`BatchMetrics`].
#[derive(Debug)]
pub struct BatchMetricsCollector {
    total_batches: Arc<AtomicU64>,
    documents_processed: Arc<AtomicU64>,
    documents_failed: Arc<AtomicU64>,
    chunks_processed: Arc<AtomicU64>,
    chunks_skipped: Arc<AtomicU64>,
    total_execution_nanos: Arc<AtomicU64>,
}

impl BatchMetricsCollector {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            total_batches: Arc::new(AtomicU64::new(0)),
            documents_processed: Arc::new(AtomicU64::new(0)),
            documents_failed: Arc::new(AtomicU64::new(0)),
            chunks_processed: Arc::new(AtomicU64::new(0)),
            chunks_skipped: Arc::new(AtomicU64::new(0)),
            total_execution_nanos: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record a finished chunk.
    pub fn record_chunk(&self, succeeded: u64, failed: u64) {
        self.chunks_processed.fetch_add(1, Ordering::Relaxed);
        self.documents_processed
            .fetch_add(succeeded, Ordering::Relaxed);
        self.documents_failed.fetch_add(failed, Ordering::Relaxed);
    }

    /// Record a chunk that never started.
    pub fn record_skipped_chunk(&self) {
        self.chunks_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the end of a batch run.
    pub fn record_batch(&self, execution_time: Duration) {
        self.total_batches.fetch_add(1, Ordering::Relaxed);
        self.total_execution_nanos
            .fetch_add(execution_time.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Get the current metrics snapshot.
    pub fn snapshot(&self) -> BatchMetrics {
        BatchMetrics {
            total_batches: self.total_batches.load(Ordering::Relaxed),
            documents_processed: self.documents_processed.load(Ordering::Relaxed),
            documents_failed: self.documents_failed.load(Ordering::Relaxed),
            chunks_processed: self.chunks_processed.load(Ordering::Relaxed),
            chunks_skipped: self.chunks_skipped.load(Ordering::Relaxed),
            total_execution_time: Duration::from_nanos(
                self.total_execution_nanos.load(Ordering::Relaxed),
            ),
        }
    }

    /// Reset all metrics.
    pub fn reset(&self) {
        self.total_batches.store(0, Ordering::Relaxed);
        self.documents_processed.store(0, Ordering::Relaxed);
        self.documents_failed.store(0, Ordering::Relaxed);
        self.chunks_processed.store(0, Ordering::Relaxed);
        self.chunks_skipped.store(0, Ordering::Relaxed);
        self.total_execution_nanos.store(0, Ordering::Relaxed);
    }
}

impl Default for BatchMetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper for timing operations.
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed time.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_snapshot() {
        let collector = BatchMetricsCollector::new();
        collector.record_chunk(9, 1);
        collector.record_chunk(5, 0);
        collector.record_skipped_chunk();
        collector.record_batch(Duration::from_millis(10));

        let metrics = collector.snapshot();
        assert_eq!(metrics.total_batches, 1);
        assert_eq!(metrics.documents_processed, 14);
        assert_eq!(metrics.documents_failed, 1);
        assert_eq!(metrics.chunks_processed, 2);
        assert_eq!(metrics.chunks_skipped, 1);
        assert!(metrics.throughput() > 0.0);

        collector.reset();
        assert_eq!(collector.snapshot(), BatchMetrics::default());
    }
}
