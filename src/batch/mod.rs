//! Batch tokenization module for processing document collections in parallel.
//!
//! This module provides functionality to:
//! - Split a collection into chunks and tokenize them on a worker pool
//! - Reassemble results so that output `i` belongs to input `i`
//! - Substitute or propagate per-document failures
//! - Cancel a running batch and monitor throughput

pub mod config;
pub mod engine;
pub mod metrics;

pub use config::{BatchConfig, FailurePolicy};
pub use engine::{BatchTokenizer, CancellationToken};
pub use metrics::{BatchMetrics, BatchMetricsCollector, Timer};
