use std::path::PathBuf;
use std::time::Duration;

use crate::store::DEFAULT_OUTPUT_DIR;
use crate::FetchSettings;

pub const DEFAULT_CONCURRENCY: usize = 4;

/// How failed document fetches are retried. Only transient failures are
/// retried; listing pages never are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    /// Delay before the first retry; grows linearly with each attempt.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            backoff: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(attempt.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Maximum number of candidates processed at once.
    pub concurrency: usize,
    /// Upper bound on a single fetch attempt, whatever the fetcher does.
    pub fetch_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            fetch_timeout: Duration::from_secs(60),
            retry: RetryPolicy::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub output_dir: PathBuf,
    pub pipeline: PipelineConfig,
    pub fetch: FetchSettings,
}

impl EngineConfig {
    pub fn default_with_output(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            pipeline: PipelineConfig::default(),
            fetch: FetchSettings::default(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::default_with_output(DEFAULT_OUTPUT_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_delay_grows_linearly() {
        let policy = RetryPolicy {
            max_retries: 3,
            backoff: Duration::from_millis(100),
        };
        assert_eq!(policy.delay_for(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for(3), Duration::from_millis(300));
    }

    #[test]
    fn defaults_use_input_dataset() {
        let config = EngineConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("input_dataset"));
        assert_eq!(config.pipeline.concurrency, 4);
        assert_eq!(config.pipeline.retry.max_retries, 0);
    }
}
