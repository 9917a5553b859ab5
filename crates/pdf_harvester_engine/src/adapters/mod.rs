//! Site adapters: turn one site's listing page into candidate document URLs.
//!
//! Adapters are pure. They receive already-fetched page text and the URL it
//! was served from, and never perform IO.
mod archive;
mod first_match;

pub use archive::ArchiveAdapter;
pub use first_match::FirstMatchAdapter;

use pdf_harvester_core::CandidateUrl;
use scraper::{Html, Selector};
use thiserror::Error;
use url::Url;

/// The listing page was readable but held nothing worth fetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no candidate documents found on listing page")]
pub struct NoCandidatesFound;

/// Adapter configuration that cannot work on any page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    #[error("invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },
    #[error("invalid site root `{root}`: {message}")]
    SiteRoot { root: String, message: String },
}

pub trait SiteAdapter: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    /// Candidate document URLs found on `page_html`, in page order.
    ///
    /// `base_url` is the URL the page was served from.
    fn list_candidates(
        &self,
        page_html: &str,
        base_url: &Url,
    ) -> Result<Vec<CandidateUrl>, NoCandidatesFound>;
}

pub(crate) fn parse_selector(selector: &str) -> Result<Selector, AdapterError> {
    Selector::parse(selector).map_err(|err| AdapterError::Selector {
        selector: selector.to_string(),
        message: err.to_string(),
    })
}

/// Raw `href` values of every element matched by `selector`, in document order.
pub(crate) fn select_hrefs(doc: &Html, selector: &Selector) -> Vec<String> {
    doc.select(selector)
        .filter_map(|el| el.value().attr("href"))
        .map(str::to_string)
        .collect()
}
