use std::sync::Arc;

use futures_util::future::join_all;
use harvest_logging::{harvest_error, harvest_info, harvest_warn};
use pdf_harvester_core::{FailureReason, HarvestReport, ReportBuilder};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::adapters::NoCandidatesFound;
use crate::decode::decode_listing_page;
use crate::pipeline::{fetch_once, FetchPipeline};
use crate::registry::Site;
use crate::{
    DirectoryStore, EngineConfig, FailureKind, Fetcher, OutputStore, PipelineConfig, ReqwestFetcher,
    ResourceKind,
};

/// Runs harvests: listing page, adapter, then the fetch pipeline.
pub struct Harvester {
    fetcher: Arc<dyn Fetcher>,
    pipeline: FetchPipeline,
}

impl Harvester {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        store: Arc<dyn OutputStore>,
        config: PipelineConfig,
    ) -> Self {
        let pipeline = FetchPipeline::new(Arc::clone(&fetcher), store, config);
        Self { fetcher, pipeline }
    }

    /// Harvester backed by reqwest and a [`DirectoryStore`] at `config.output_dir`.
    pub fn from_config(config: &EngineConfig) -> Self {
        let fetcher: Arc<dyn Fetcher> = Arc::new(ReqwestFetcher::new(config.fetch.clone()));
        let store: Arc<dyn OutputStore> =
            Arc::new(DirectoryStore::new(config.output_dir.clone()));
        Self::new(fetcher, store, config.pipeline.clone())
    }

    /// One harvest run against one site.
    ///
    /// Always returns a report. Only a listing page that cannot be fetched or
    /// decoded makes the run itself fail; per-document failures are recorded
    /// in the report.
    pub async fn harvest_site(&self, site: &Site, cancel: &CancellationToken) -> HarvestReport {
        let mut report = ReportBuilder::new(site.id());
        let listing_url = site.listing_url().as_str();
        harvest_info!(site: site.id(), "fetching listing page {}", listing_url);

        // The listing page is fetched once; a failure ends this site's run.
        let output = match fetch_once(
            self.fetcher.as_ref(),
            listing_url,
            ResourceKind::ListingPage,
            self.pipeline.config(),
            cancel,
        )
        .await
        {
            Ok(output) => output,
            Err(err) => {
                harvest_error!(site: site.id(), "listing page unavailable: {}", err);
                if err.kind == FailureKind::Cancelled {
                    report.mark_cancelled();
                }
                return report
                    .listing_failed(listing_url, FailureReason::ListingFetch(err.to_string()));
            }
        };

        let content_type = output.metadata.content_type.as_deref();
        let page = match decode_listing_page(&output.bytes, content_type) {
            Ok(page) => page,
            Err(err) => {
                harvest_error!(site: site.id(), "listing page unreadable: {}", err);
                return report
                    .listing_failed(listing_url, FailureReason::ListingFetch(err.to_string()));
            }
        };

        // Relative links resolve against where the page actually came from.
        let base_url =
            Url::parse(&output.metadata.final_url).unwrap_or_else(|_| site.listing_url().clone());
        let candidates = match site.adapter().list_candidates(&page.html, &base_url) {
            Ok(candidates) => candidates,
            Err(NoCandidatesFound) => {
                harvest_warn!(
                    site: site.id(),
                    "{} adapter found no candidates",
                    site.adapter().name()
                );
                return report.no_candidates();
            }
        };
        harvest_info!(site: site.id(), "{} candidate(s) found", candidates.len());

        let results = self.pipeline.run(site.id(), candidates, cancel).await;
        report.set_candidates(results.len()).extend(results);
        if cancel.is_cancelled() {
            report.mark_cancelled();
        }
        let report = report.finish();
        harvest_info!(site: site.id(), "{}", report);
        report
    }

    /// Harvest several sites concurrently; reports come back in `sites` order.
    pub async fn harvest_all(
        &self,
        sites: &[&Site],
        cancel: &CancellationToken,
    ) -> Vec<HarvestReport> {
        join_all(sites.iter().map(|site| self.harvest_site(site, cancel))).await
    }
}
