use pdf_harvester_core::{filter_links, has_pdf_suffix, CandidateUrl};
use scraper::{Html, Selector};
use url::Url;

use super::{parse_selector, AdapterError, NoCandidatesFound, SiteAdapter};

/// Adapter for archive pages listing many years of reports.
///
/// Takes every anchor inside the elements matched by `container_selector`
/// whose href ends in `.pdf`, completed against the page URL. No cap.
#[derive(Debug, Clone)]
pub struct ArchiveAdapter {
    container: Selector,
    anchor: Selector,
}

impl ArchiveAdapter {
    pub fn new(container_selector: &str) -> Result<Self, AdapterError> {
        Ok(Self {
            container: parse_selector(container_selector)?,
            anchor: parse_selector("a[href]")?,
        })
    }
}

impl SiteAdapter for ArchiveAdapter {
    fn name(&self) -> &'static str {
        "archive"
    }

    fn list_candidates(
        &self,
        page_html: &str,
        base_url: &Url,
    ) -> Result<Vec<CandidateUrl>, NoCandidatesFound> {
        let doc = Html::parse_document(page_html);
        let hrefs = doc
            .select(&self.container)
            .flat_map(|container| container.select(&self.anchor))
            .filter_map(|anchor| anchor.value().attr("href"));

        let candidates: Vec<CandidateUrl> =
            filter_links(hrefs, base_url, |href| has_pdf_suffix(href.trim()))
                .into_iter()
                .filter(|url| matches!(url.as_url().scheme(), "http" | "https"))
                .collect();

        if candidates.is_empty() {
            Err(NoCandidatesFound)
        } else {
            Ok(candidates)
        }
    }
}
