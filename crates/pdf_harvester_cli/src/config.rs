//! Configuration: RON file values, then command-line overrides.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use harvest_logging::harvest_info;
use pdf_harvester_engine::EngineConfig;
use serde::Deserialize;

use crate::cli::Cli;

pub const DEFAULT_CONFIG_FILE: &str = "harvester.ron";

/// On-disk configuration. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub output_dir: PathBuf,
    pub concurrency: usize,
    pub fetch_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub redirect_limit: usize,
    pub max_listing_bytes: u64,
    pub max_document_bytes: u64,
    pub retries: u32,
    pub retry_backoff_ms: u64,
    pub user_agent: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            output_dir: engine.output_dir,
            concurrency: engine.pipeline.concurrency,
            fetch_timeout_secs: engine.pipeline.fetch_timeout.as_secs(),
            connect_timeout_secs: engine.fetch.connect_timeout.as_secs(),
            request_timeout_secs: engine.fetch.request_timeout.as_secs(),
            redirect_limit: engine.fetch.redirect_limit,
            max_listing_bytes: engine.fetch.max_listing_bytes,
            max_document_bytes: engine.fetch.max_document_bytes,
            retries: engine.pipeline.retry.max_retries,
            retry_backoff_ms: engine.pipeline.retry.backoff.as_millis() as u64,
            user_agent: engine.fetch.user_agent,
        }
    }
}

impl FileConfig {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        ron::from_str(text).context("invalid configuration")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Like [`FileConfig::load`], but a missing file yields the defaults.
    pub fn load_optional(path: &Path) -> anyhow::Result<Self> {
        match fs::metadata(path) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            _ => Self::load(path),
        }
    }

    /// Zero concurrency and zero timeouts are raised to their minimum of one.
    pub fn into_engine_config(self) -> EngineConfig {
        let mut config = EngineConfig::default_with_output(self.output_dir);
        config.pipeline.concurrency = self.concurrency.max(1);
        config.pipeline.fetch_timeout = seconds_at_least_one(self.fetch_timeout_secs);
        config.pipeline.retry.max_retries = self.retries;
        config.pipeline.retry.backoff = Duration::from_millis(self.retry_backoff_ms);
        config.fetch.connect_timeout = seconds_at_least_one(self.connect_timeout_secs);
        config.fetch.request_timeout = seconds_at_least_one(self.request_timeout_secs);
        config.fetch.redirect_limit = self.redirect_limit;
        config.fetch.max_listing_bytes = self.max_listing_bytes;
        config.fetch.max_document_bytes = self.max_document_bytes;
        config.fetch.user_agent = self.user_agent;
        config
    }
}

fn seconds_at_least_one(secs: u64) -> Duration {
    Duration::from_secs(secs.max(1))
}

/// Build the engine configuration from the config file and CLI flags.
pub fn resolve(cli: &Cli) -> anyhow::Result<EngineConfig> {
    let file = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::load_optional(Path::new(DEFAULT_CONFIG_FILE))?,
    };
    let mut config = file.into_engine_config();

    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(concurrency) = cli.concurrency {
        config.pipeline.concurrency = concurrency.max(1);
    }
    if let Some(retries) = cli.retries {
        config.pipeline.retry.max_retries = retries;
    }
    harvest_info!(
        "output dir {:?}, concurrency {}, retries {}",
        config.output_dir,
        config.pipeline.concurrency,
        config.pipeline.retry.max_retries
    );
    Ok(config)
}
