//! Sites this binary knows how to harvest.

use pdf_harvester_engine::{
    AdapterError, ArchiveAdapter, FirstMatchAdapter, RegistryError, Site, SiteRegistry,
};

#[derive(Debug, thiserror::Error)]
pub enum SiteSetupError {
    #[error(transparent)]
    Adapter(#[from] AdapterError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

pub fn default_registry() -> Result<SiteRegistry, SiteSetupError> {
    let mut registry = SiteRegistry::new();

    // Latest annual report is the first "annual" link among the call-to-action anchors.
    registry.register(Site::new(
        "anto",
        "https://www.antofagasta.co.uk/investors/reports-presentations/",
        FirstMatchAdapter::new(
            r#"a[class="cta-small"]"#,
            "annual",
            "https://www.antofagasta.co.uk",
        )?,
    )?)?;

    registry.register(Site::new(
        "teck",
        "https://www.teck.com/investors/financial-reports/annual-reports-archive/",
        ArchiveAdapter::new(r#"div[class="row row-cols-4 justify-content-center"]"#)?,
    )?)?;

    Ok(registry)
}
