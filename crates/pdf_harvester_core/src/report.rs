use std::fmt;

use serde::Serialize;

use crate::{CandidateUrl, DocumentName};

/// Why a single candidate (or the listing page) did not end up in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FailureReason {
    /// The URL does not follow the document naming convention.
    UnrecognizedName,
    /// An earlier candidate in the same run already claimed this name.
    NameCollision(DocumentName),
    HttpStatus(u16),
    Timeout,
    /// Any other network-level failure, with the collaborator's message.
    Fetch(String),
    /// The store could not persist the bytes.
    Persist(String),
    /// The listing page itself could not be retrieved or decoded.
    ListingFetch(String),
    Cancelled,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::UnrecognizedName => write!(f, "unrecognized name pattern"),
            FailureReason::NameCollision(name) => {
                write!(f, "name {name} already claimed by another url")
            }
            FailureReason::HttpStatus(code) => write!(f, "http status {code}"),
            FailureReason::Timeout => write!(f, "timeout"),
            FailureReason::Fetch(message) => write!(f, "fetch failed: {message}"),
            FailureReason::Persist(message) => write!(f, "write failed: {message}"),
            FailureReason::ListingFetch(message) => {
                write!(f, "listing page unavailable: {message}")
            }
            FailureReason::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Outcome for exactly one candidate URL within a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchResult {
    Saved { name: DocumentName, bytes: u64 },
    AlreadyPresent { name: DocumentName },
    Failed { url: String, reason: FailureReason },
}

impl FetchResult {
    pub fn failed(url: &CandidateUrl, reason: FailureReason) -> Self {
        FetchResult::Failed {
            url: url.to_string(),
            reason,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchResult::Failed { .. })
    }
}

impl fmt::Display for FetchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchResult::Saved { name, bytes } => write!(f, "saved {name} ({bytes} bytes)"),
            FetchResult::AlreadyPresent { name } => write!(f, "already present {name}"),
            FetchResult::Failed { url, reason } => write!(f, "failed {url}: {reason}"),
        }
    }
}

/// How the run as a whole went, independent of per-candidate results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Candidates were found and handed to the pipeline.
    Completed,
    /// The listing page was read but the adapter found nothing to fetch.
    NoCandidatesFound,
    /// The listing page could not be fetched; `results` holds one failure for it.
    ListingFailed,
}

/// Result of one harvest run against one site.
///
/// Built through [`ReportBuilder`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HarvestReport {
    site: String,
    outcome: RunOutcome,
    candidates: usize,
    results: Vec<FetchResult>,
    cancelled: bool,
}

impl HarvestReport {
    pub fn site(&self) -> &str {
        &self.site
    }

    pub fn outcome(&self) -> RunOutcome {
        self.outcome
    }

    /// Number of distinct candidates the adapter produced.
    pub fn candidates(&self) -> usize {
        self.candidates
    }

    pub fn results(&self) -> &[FetchResult] {
        &self.results
    }

    pub fn cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn saved(&self) -> usize {
        self.count(|r| matches!(r, FetchResult::Saved { .. }))
    }

    pub fn already_present(&self) -> usize {
        self.count(|r| matches!(r, FetchResult::AlreadyPresent { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(FetchResult::is_failed)
    }

    /// True when anything, including the listing page, failed.
    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    /// Total bytes written during this run.
    pub fn bytes_saved(&self) -> u64 {
        self.results
            .iter()
            .map(|r| match r {
                FetchResult::Saved { bytes, .. } => *bytes,
                _ => 0,
            })
            .sum()
    }

    fn count(&self, pred: impl Fn(&FetchResult) -> bool) -> usize {
        self.results.iter().filter(|r| pred(*r)).count()
    }
}

impl fmt::Display for HarvestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} candidates, {} saved, {} already present, {} failed",
            self.site,
            self.candidates,
            self.saved(),
            self.already_present(),
            self.failed()
        )?;
        match self.outcome {
            RunOutcome::Completed => {}
            RunOutcome::NoCandidatesFound => write!(f, " (no candidates found)")?,
            RunOutcome::ListingFailed => write!(f, " (listing page failed)")?,
        }
        if self.cancelled {
            write!(f, " (cancelled)")?;
        }
        Ok(())
    }
}

/// Mutable accumulator for a [`HarvestReport`] while a run is in progress.
#[derive(Debug)]
pub struct ReportBuilder {
    report: HarvestReport,
}

impl ReportBuilder {
    pub fn new(site: impl Into<String>) -> Self {
        Self {
            report: HarvestReport {
                site: site.into(),
                outcome: RunOutcome::Completed,
                candidates: 0,
                results: Vec::new(),
                cancelled: false,
            },
        }
    }

    pub fn set_candidates(&mut self, count: usize) -> &mut Self {
        self.report.candidates = count;
        self
    }

    pub fn push(&mut self, result: FetchResult) -> &mut Self {
        self.report.results.push(result);
        self
    }

    pub fn extend(&mut self, results: impl IntoIterator<Item = FetchResult>) -> &mut Self {
        self.report.results.extend(results);
        self
    }

    pub fn mark_cancelled(&mut self) -> &mut Self {
        self.report.cancelled = true;
        self
    }

    /// Finish a run whose listing page could not be retrieved.
    pub fn listing_failed(mut self, listing_url: &str, reason: FailureReason) -> HarvestReport {
        self.report.outcome = RunOutcome::ListingFailed;
        self.report.candidates = 0;
        self.report.results = vec![FetchResult::Failed {
            url: listing_url.to_string(),
            reason,
        }];
        self.report
    }

    /// Finish a run in which the adapter found nothing to fetch.
    pub fn no_candidates(mut self) -> HarvestReport {
        self.report.outcome = RunOutcome::NoCandidatesFound;
        self.report.candidates = 0;
        self.report
    }

    pub fn finish(self) -> HarvestReport {
        self.report
    }
}
