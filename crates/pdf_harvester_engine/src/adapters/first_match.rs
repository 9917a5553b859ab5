use pdf_harvester_core::{filter_links, CandidateUrl};
use scraper::{Html, Selector};
use url::Url;

use super::{parse_selector, select_hrefs, AdapterError, NoCandidatesFound, SiteAdapter};

/// Adapter for sites that list their latest report first.
///
/// Selects anchors matching `anchor_selector`, keeps hrefs containing
/// `keyword` (case-insensitive), and returns only the first one. Relative
/// hrefs are completed against the fixed site root, not the page URL.
#[derive(Debug, Clone)]
pub struct FirstMatchAdapter {
    anchors: Selector,
    keyword: String,
    site_root: Url,
}

impl FirstMatchAdapter {
    pub fn new(
        anchor_selector: &str,
        keyword: &str,
        site_root: &str,
    ) -> Result<Self, AdapterError> {
        let site_root = Url::parse(site_root).map_err(|err| AdapterError::SiteRoot {
            root: site_root.to_string(),
            message: err.to_string(),
        })?;
        Ok(Self {
            anchors: parse_selector(anchor_selector)?,
            keyword: keyword.to_lowercase(),
            site_root,
        })
    }

    fn matches_keyword(&self, href: &str) -> bool {
        href.to_lowercase().contains(&self.keyword)
    }
}

impl SiteAdapter for FirstMatchAdapter {
    fn name(&self) -> &'static str {
        "first-match"
    }

    fn list_candidates(
        &self,
        page_html: &str,
        _base_url: &Url,
    ) -> Result<Vec<CandidateUrl>, NoCandidatesFound> {
        let doc = Html::parse_document(page_html);
        let hrefs = select_hrefs(&doc, &self.anchors);
        let first = filter_links(hrefs, &self.site_root, |href| self.matches_keyword(href))
            .into_iter()
            .next()
            .ok_or(NoCandidatesFound)?;
        Ok(vec![first])
    }
}
