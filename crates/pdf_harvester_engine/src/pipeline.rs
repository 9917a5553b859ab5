use std::collections::HashSet;
use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use harvest_logging::{harvest_debug, harvest_info, harvest_warn};
use pdf_harvester_core::{
    derive_document_name, CandidateUrl, DocumentName, FailureReason, FetchResult,
};
use tokio_util::sync::CancellationToken;

use crate::{
    FailureKind, FetchError, FetchOutput, Fetcher, OutputStore, PipelineConfig, ResourceKind,
};

/// Fetches candidates and persists them, one [`FetchResult`] per distinct URL.
///
/// Names already in the store are skipped without touching the network.
/// A failure on one candidate never stops the others.
pub struct FetchPipeline {
    fetcher: Arc<dyn Fetcher>,
    store: Arc<dyn OutputStore>,
    config: PipelineConfig,
}

struct Job {
    index: usize,
    url: CandidateUrl,
    name: DocumentName,
}

impl FetchPipeline {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        store: Arc<dyn OutputStore>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            fetcher,
            store,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process `candidates` with bounded concurrency.
    ///
    /// Duplicate URLs are collapsed to their first occurrence. Results come
    /// back in that de-duplicated input order. On cancellation, candidates
    /// not yet finished are recorded as cancelled.
    pub async fn run(
        &self,
        site: &str,
        candidates: Vec<CandidateUrl>,
        cancel: &CancellationToken,
    ) -> Vec<FetchResult> {
        let (mut slots, jobs) = plan(site, candidates);
        harvest_debug!(
            site: site,
            "{} candidates, {} to process (concurrency {})",
            slots.len(),
            jobs.len(),
            self.config.concurrency
        );

        let completed: Vec<(usize, FetchResult)> = stream::iter(jobs)
            .map(|job| async move {
                let index = job.index;
                (index, self.process(site, job, cancel).await)
            })
            .buffer_unordered(self.config.concurrency.max(1))
            .collect()
            .await;

        for (index, result) in completed {
            slots[index] = Some(result);
        }
        slots.into_iter().flatten().collect()
    }

    async fn process(&self, site: &str, job: Job, cancel: &CancellationToken) -> FetchResult {
        if cancel.is_cancelled() {
            return FetchResult::failed(&job.url, FailureReason::Cancelled);
        }
        let store = Arc::clone(&self.store);
        let name = job.name.clone();
        match tokio::task::spawn_blocking(move || store.exists(&name)).await {
            Ok(true) => {
                harvest_debug!(site: site, "{} already present, skipping {}", job.name, job.url);
                return FetchResult::AlreadyPresent { name: job.name };
            }
            Ok(false) => {}
            Err(err) => {
                harvest_warn!(site: site, "store lookup for {} failed: {}", job.name, err);
                return FetchResult::failed(&job.url, FailureReason::Persist(err.to_string()));
            }
        }

        harvest_debug!(site: site, "fetching {}", job.url);
        let output = match fetch_guarded(
            self.fetcher.as_ref(),
            job.url.as_str(),
            ResourceKind::Document,
            &self.config,
            cancel,
        )
        .await
        {
            Ok(output) => output,
            Err(err) => {
                harvest_warn!(site: site, "fetch failed for {}: {}", job.url, err);
                return FetchResult::failed(&job.url, FailureReason::from(&err));
            }
        };

        let byte_len = output.bytes.len() as u64;
        let store = Arc::clone(&self.store);
        let name = job.name.clone();
        let bytes = output.bytes;
        // Writes are never interrupted by cancellation.
        let written = tokio::task::spawn_blocking(move || store.write(&name, &bytes)).await;
        match written {
            Ok(Ok(path)) => {
                harvest_info!(
                    site: site,
                    "saved {} ({} bytes) to {}",
                    job.name,
                    byte_len,
                    path.display()
                );
                FetchResult::Saved {
                    name: job.name,
                    bytes: byte_len,
                }
            }
            Ok(Err(err)) => {
                harvest_warn!(site: site, "could not write {}: {}", job.name, err);
                FetchResult::failed(&job.url, FailureReason::Persist(err.to_string()))
            }
            Err(err) => {
                harvest_warn!(site: site, "write task for {} failed: {}", job.name, err);
                FetchResult::failed(&job.url, FailureReason::Persist(err.to_string()))
            }
        }
    }
}

/// Split candidates into result slots and fetch jobs.
///
/// Slots with a result already filled need no network work: unrecognized
/// names and names claimed by an earlier URL in the same run.
fn plan(site: &str, candidates: Vec<CandidateUrl>) -> (Vec<Option<FetchResult>>, Vec<Job>) {
    let mut seen_urls = HashSet::new();
    let mut claimed = HashSet::new();
    let mut slots = Vec::with_capacity(candidates.len());
    let mut jobs = Vec::new();

    for url in candidates {
        if !seen_urls.insert(url.clone()) {
            harvest_debug!(site: site, "dropping duplicate candidate {}", url);
            continue;
        }
        let index = slots.len();
        match derive_document_name(url.as_str()) {
            Err(_) => {
                harvest_warn!(site: site, "unrecognized name pattern: {}", url);
                slots.push(Some(FetchResult::failed(&url, FailureReason::UnrecognizedName)));
            }
            Ok(name) if !claimed.insert(name.clone()) => {
                harvest_warn!(site: site, "{} maps to already claimed name {}", url, name);
                slots.push(Some(FetchResult::failed(&url, FailureReason::NameCollision(name))));
            }
            Ok(name) => {
                slots.push(None);
                jobs.push(Job { index, url, name });
            }
        }
    }
    (slots, jobs)
}

/// One fetch bounded by the pipeline's timeout and cancellation. Never retried.
pub(crate) async fn fetch_once(
    fetcher: &dyn Fetcher,
    url: &str,
    kind: ResourceKind,
    config: &PipelineConfig,
    cancel: &CancellationToken,
) -> Result<FetchOutput, FetchError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(cancelled()),
        res = tokio::time::timeout(config.fetch_timeout, fetcher.fetch(url, kind)) => {
            res.unwrap_or_else(|_| {
                Err(FetchError::new(
                    FailureKind::Timeout,
                    format!("no response within {:?}", config.fetch_timeout),
                ))
            })
        }
    }
}

/// [`fetch_once`] under the pipeline's retry policy.
async fn fetch_guarded(
    fetcher: &dyn Fetcher,
    url: &str,
    kind: ResourceKind,
    config: &PipelineConfig,
    cancel: &CancellationToken,
) -> Result<FetchOutput, FetchError> {
    let mut attempt = 0;
    loop {
        match fetch_once(fetcher, url, kind, config, cancel).await {
            Err(err) if err.is_retryable() && attempt < config.retry.max_retries => {
                attempt += 1;
                let delay = config.retry.delay_for(attempt);
                harvest_debug!("retrying {} in {:?} after: {}", url, delay, err);
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(cancelled()),
                    _ = tokio::time::sleep(delay) => {}
                }
            }
            other => return other,
        }
    }
}

fn cancelled() -> FetchError {
    FetchError::new(FailureKind::Cancelled, "harvest cancelled")
}
