//! Configuration for batch tokenization.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SocialtokError};

/// What happens to a document whose tokenization fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Log the failure and return an empty token list for that document.
    #[default]
    SubstituteEmpty,

    /// Fail the whole batch with the first failure in input order.
    Abort,
}

/// Configuration for a [`BatchTokenizer`](super::BatchTokenizer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Number of documents handed to a worker at a time.
    pub batch_size: usize,

    /// Number of worker threads. 1 runs on the calling thread.
    pub workers: usize,

    /// Per-document failure handling.
    pub failure_policy: FailurePolicy,

    /// Whether to collect metrics.
    pub enable_metrics: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 256,
            workers: num_cpus::get(),
            failure_policy: FailurePolicy::SubstituteEmpty,
            enable_metrics: true,
        }
    }
}

impl BatchConfig {
    /// Create a configuration with the given chunk size and worker count.
    pub fn new(batch_size: usize, workers: usize) -> Self {
        Self {
            batch_size,
            workers,
            ..Default::default()
        }
    }

    /// Set the failure policy.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Check that the sizes are usable.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(SocialtokError::configuration("batch_size must be at least 1"));
        }
        if self.workers == 0 {
            return Err(SocialtokError::configuration("workers must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BatchConfig::default();
        assert_eq!(config.batch_size, 256);
        assert!(config.workers >= 1);
        assert_eq!(config.failure_policy, FailurePolicy::SubstituteEmpty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(BatchConfig::new(0, 4).validate().is_err());
        assert!(BatchConfig::new(10, 0).validate().is_err());
        assert!(BatchConfig::new(1, 1).validate().is_ok());
    }

    #[test]
    fn test_policy_serialization() {
        let json = serde_json::to_string(&FailurePolicy::SubstituteEmpty).unwrap();
        assert_eq!(json, "\"substitute_empty\"");
        let policy: FailurePolicy = serde_json::from_str("\"abort\"").unwrap();
        assert_eq!(policy, FailurePolicy::Abort);
    }
}
