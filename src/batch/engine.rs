//! Main batch tokenization engine implementation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crossbeam_channel::unbounded;
use log::{info, warn};
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::batch::config::{BatchConfig, FailurePolicy};
use crate::batch::metrics::{BatchMetrics, BatchMetricsCollector, Timer};
use crate::error::{Result, SocialtokError};
use crate::social_tokenizer::SocialTokenizer;

/// Token lists of one chunk, tagged with the index of its first document.
type ChunkResult = (usize, Vec<Result<Vec<String>>>);

/// Cooperative cancellation flag shared between a batch and its caller.
///
/// Cancelling stops chunks that have not started yet; chunks already running
/// finish normally.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Tokenizes document collections on a worker pool.
///
/// Documents are split into chunks of `batch_size`; every chunk is one task.
/// Workers send `(index, tokens)` results back over a channel and the engine
/// reassembles them by index, so `output[i]` always belongs to `input[i]`.
pub struct BatchTokenizer {
    /// Tokenizer shared by all workers.
    tokenizer: SocialTokenizer,

    /// Configuration for the engine.
    config: BatchConfig,

    /// Thread pool, absent when running on the calling thread.
    thread_pool: Option<Arc<ThreadPool>>,

    /// Metrics collector.
    metrics: Arc<BatchMetricsCollector>,

    /// Cancellation flag checked before each chunk.
    cancellation: CancellationToken,
}

impl BatchTokenizer {
    /// Create a new batch engine.
    pub fn new(tokenizer: SocialTokenizer, config: BatchConfig) -> Result<Self> {
        let thread_pool = Self::build_thread_pool(config.workers)?;
        Self::with_thread_pool(tokenizer, config, thread_pool)
    }

    /// Build the worker pool for `workers` threads; `None` means the calling
    /// thread does the work.
    pub(crate) fn build_thread_pool(workers: usize) -> Result<Option<Arc<ThreadPool>>> {
        if workers <= 1 {
            return Ok(None);
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("socialtok-batch-{i}"))
            .build()
            .map_err(|e| SocialtokError::internal(format!("Failed to create thread pool: {e}")))?;
        Ok(Some(Arc::new(pool)))
    }

    /// Create an engine around an existing pool.
    pub(crate) fn with_thread_pool(
        tokenizer: SocialTokenizer,
        config: BatchConfig,
        thread_pool: Option<Arc<ThreadPool>>,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            tokenizer,
            config,
            thread_pool,
            metrics: Arc::new(BatchMetricsCollector::new()),
            cancellation: CancellationToken::new(),
        })
    }

    /// Use an existing cancellation token.
    pub fn with_cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Get a handle that cancels this engine's batches.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Get the configuration.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Get the tokenizer.
    pub fn tokenizer(&self) -> &SocialTokenizer {
        &self.tokenizer
    }

    /// Get the current metrics.
    pub fn metrics(&self) -> BatchMetrics {
        self.metrics.snapshot()
    }

    /// Tokenize every document.
    pub fn tokenize<S>(&self, documents: &[S]) -> Result<Vec<Vec<String>>>
    where
        S: AsRef<str> + Sync,
    {
        self.run(documents, |tokenizer, document| {
            tokenizer.tokenize(document.as_ref())
        })
    }

    /// Tokenize every raw-byte document. Invalid UTF-8 is a per-document
    /// failure handled by the failure policy.
    pub fn tokenize_bytes<B>(&self, documents: &[B]) -> Result<Vec<Vec<String>>>
    where
        B: AsRef<[u8]> + Sync,
    {
        self.run(documents, |tokenizer, document| {
            tokenizer.tokenize_bytes(document.as_ref())
        })
    }

    fn run<D, F>(&self, documents: &[D], tokenize_one: F) -> Result<Vec<Vec<String>>>
    where
        D: Sync,
        F: Fn(&SocialTokenizer, &D) -> Result<Vec<String>> + Sync,
    {
        let timer = Timer::start();
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let batch_size = self.config.batch_size;
        // Lowest failing document index under Abort; chunks starting after it are skipped.
        let first_failure = AtomicUsize::new(usize::MAX);

        let process_chunk = |start: usize, chunk: &[D]| -> Option<ChunkResult> {
            if self.cancellation.is_cancelled() || start > first_failure.load(Ordering::SeqCst) {
                if self.config.enable_metrics {
                    self.metrics.record_skipped_chunk();
                }
                return None;
            }

            let results: Vec<Result<Vec<String>>> = chunk
                .iter()
                .map(|document| tokenize_one(&self.tokenizer, document))
                .collect();

            let failed = results.iter().filter(|r| r.is_err()).count() as u64;
            if self.config.failure_policy == FailurePolicy::Abort {
                if let Some(offset) = results.iter().position(|r| r.is_err()) {
                    first_failure.fetch_min(start + offset, Ordering::SeqCst);
                }
            }
            if self.config.enable_metrics {
                self.metrics
                    .record_chunk(results.len() as u64 - failed, failed);
            }

            Some((start, results))
        };

        let mut slots: Vec<Option<Result<Vec<String>>>> =
            (0..documents.len()).map(|_| None).collect();
        let mut place = |(start, results): ChunkResult| {
            for (offset, result) in results.into_iter().enumerate() {
                slots[start + offset] = Some(result);
            }
        };

        match &self.thread_pool {
            None => {
                for (i, chunk) in documents.chunks(batch_size).enumerate() {
                    if let Some(result) = process_chunk(i * batch_size, chunk) {
                        place(result);
                    }
                }
            }
            Some(pool) => {
                let (tx, rx) = unbounded();
                pool.scope(|scope| {
                    for (i, chunk) in documents.chunks(batch_size).enumerate() {
                        let tx = tx.clone();
                        let process_chunk = &process_chunk;
                        scope.spawn(move |_| {
                            if let Some(result) = process_chunk(i * batch_size, chunk) {
                                let _ = tx.send(result);
                            }
                        });
                    }
                });

                // Drop the original sender so the receiver sees the end
                drop(tx);
                for result in rx {
                    place(result);
                }
            }
        }

        self.assemble(slots, timer)
    }

    /// Turn per-document slots into the output, applying the failure policy.
    fn assemble(
        &self,
        slots: Vec<Option<Result<Vec<String>>>>,
        timer: Timer,
    ) -> Result<Vec<Vec<String>>> {
        let total = slots.len();
        let mut output = Vec::with_capacity(total);
        let mut first_error = None;
        let mut failed = 0usize;
        let mut missing = 0usize;

        for (index, slot) in slots.into_iter().enumerate() {
            match slot {
                Some(Ok(tokens)) => output.push(tokens),
                Some(Err(e)) => {
                    failed += 1;
                    match self.config.failure_policy {
                        FailurePolicy::SubstituteEmpty => {
                            warn!("document {index} failed, substituting no tokens: {e}");
                        }
                        FailurePolicy::Abort => {
                            if first_error.is_none() {
                                first_error = Some(e);
                            }
                        }
                    }
                    output.push(Vec::new());
                }
                None => {
                    missing += 1;
                    output.push(Vec::new());
                }
            }
        }

        let elapsed = timer.elapsed();
        if self.config.enable_metrics {
            self.metrics.record_batch(elapsed);
        }
        info!(
            "tokenized {} of {total} documents ({failed} failed, {missing} skipped) in {elapsed:?}",
            total - missing - failed
        );

        if let Some(e) = first_error {
            return Err(e);
        }
        if missing > 0 {
            return Err(SocialtokError::cancelled(format!(
                "batch cancelled with {missing} of {total} documents not tokenized"
            )));
        }
        Ok(output)
    }
}

impl std::fmt::Debug for BatchTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchTokenizer")
            .field("config", &self.config)
            .field("tokenizer", &self.tokenizer)
            .field("cancelled", &self.cancellation.is_cancelled())
            .finish()
    }
}
